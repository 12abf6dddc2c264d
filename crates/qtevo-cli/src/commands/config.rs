//! Config command implementation.
//!
//! Print the settings after file and environment overrides are applied.

use anyhow::{Context, Result};
use qtevo_varqte::EvolutionSettings;

/// Execute the config command.
pub fn execute(settings: &EvolutionSettings, format: &str) -> Result<()> {
    let rendered = match format.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml_ng::to_string(settings).context("YAML serialization failed")?,
        "json" => serde_json::to_string_pretty(settings).context("JSON serialization failed")?,
        other => anyhow::bail!("Unknown format: '{other}'. Available: yaml, json"),
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
