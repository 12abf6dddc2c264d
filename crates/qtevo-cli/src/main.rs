//! qtevo Command-Line Interface
//!
//! Encodes maximum stable set instances as Ising Hamiltonians, checks
//! candidate solutions against them, and prints the resolved evolution
//! settings.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use qtevo_varqte::{EvolutionSettings, LoggingSettings};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{config, stable_set, version};

/// qtevo - variational time evolution and Ising encodings
#[derive(Parser)]
#[command(name = "qtevo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (YAML)
    #[arg(short, long, global = true, env = "QTEVO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Maximum stable set as an Ising problem
    StableSet {
        #[command(subcommand)]
        action: StableSetAction,
    },

    /// Print the resolved settings
    Config {
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum StableSetAction {
    /// Print the Hamiltonian and shift for a graph
    Encode {
        /// Gset graph file
        #[arg(short, long, conflicts_with = "random", required_unless_present = "random")]
        input: Option<String>,

        /// Generate a random graph with this many nodes
        #[arg(long)]
        random: Option<usize>,

        /// Edge probability for --random
        #[arg(short, long, default_value = "0.5")]
        probability: f64,

        /// Seed for --random
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Evaluate a spin-format bitstring on a graph
    Evaluate {
        /// Gset graph file
        #[arg(short, long)]
        input: String,

        /// Bitstring, one character per node (0 = in the set)
        #[arg(long)]
        solution: String,
    },

    /// Find a maximum stable set by exhaustive search
    Solve {
        /// Gset graph file
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Only `config` needs the settings; other commands fall back to defaults.
    let (settings, load_error) = match EvolutionSettings::load(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => (EvolutionSettings::default(), Some(e)),
    };

    init_logging(cli.verbose, &settings.logging);

    match &load_error {
        Some(e) if !matches!(cli.command, Commands::Config { .. }) => {
            warn!(error = %e, "ignoring settings, using defaults");
        }
        _ => {}
    }

    // Execute command
    let result = match cli.command {
        Commands::StableSet { action } => match action {
            StableSetAction::Encode {
                input,
                random,
                probability,
                seed,
                format,
            } => stable_set::execute_encode(input.as_deref(), random, probability, seed, &format),
            StableSetAction::Evaluate { input, solution } => {
                stable_set::execute_evaluate(&input, &solution)
            }
            StableSetAction::Solve { input, format } => stable_set::execute_solve(&input, &format),
        },

        Commands::Config { format } => match load_error {
            Some(e) => Err(anyhow::Error::new(e).context("Failed to load settings")),
            None => config::execute(&settings, &format),
        },

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// `QTEVO_LOG` wins, then `-v`, then the settings file.
fn init_logging(verbose: u8, logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_env("QTEVO_LOG").unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new(&logging.level),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
