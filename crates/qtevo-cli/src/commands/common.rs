//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array2;

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
        }
    }
}

/// Load a graph from a Gset file.
pub fn load_graph(path: &str) -> Result<Array2<f64>> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    qtevo_ising::gset::read_file(path).with_context(|| format!("Failed to read graph: {path}"))
}

/// Parse a bitstring such as `"0110"`.
pub fn parse_bitstring(bits: &str) -> Result<Vec<u8>> {
    bits.trim()
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => anyhow::bail!("Invalid character '{other}' at position {i}, expected 0 or 1"),
        })
        .collect()
}

/// Render a bitstring as `"0110"`.
pub fn format_bitstring(bits: &[u8]) -> String {
    bits.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect()
}
