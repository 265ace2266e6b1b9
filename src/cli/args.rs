//! CLI argument definitions using clap
//!
//! Commands:
//! - critmetrics summary  --config <path>
//! - critmetrics entities --config <path>
//! - critmetrics top      --config <path> [--metric <key>] [--limit <n>]
//! - critmetrics category --config <path> --metric <key>
//! - critmetrics entity   --config <path> --name <entity>
//! - critmetrics export   --config <path> [--sort <key>] [--output <file>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::selection::Metric;

/// Evaluation-criteria metrics per entity
#[derive(Parser, Debug)]
#[command(name = "critmetrics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Category totals and breakdown over the filtered entities
    Summary {
        /// Path to configuration file
        #[arg(long, default_value = "./critmetrics.json")]
        config: PathBuf,
    },

    /// Names of the filtered entities and the threshold bounds
    Entities {
        #[arg(long, default_value = "./critmetrics.json")]
        config: PathBuf,
    },

    /// Highest entities by one metric
    Top {
        #[arg(long, default_value = "./critmetrics.json")]
        config: PathBuf,

        /// Metric to rank by (defaults to the configured sort)
        #[arg(long)]
        metric: Option<Metric>,

        /// Number of entities (defaults to the configured display limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Entities with a positive value for one category
    Category {
        #[arg(long, default_value = "./critmetrics.json")]
        config: PathBuf,

        #[arg(long)]
        metric: Metric,
    },

    /// Category profile of one entity
    Entity {
        #[arg(long, default_value = "./critmetrics.json")]
        config: PathBuf,

        /// Entity display name
        #[arg(long)]
        name: String,
    },

    /// Write the filtered, sorted table as CSV
    Export {
        #[arg(long, default_value = "./critmetrics.json")]
        config: PathBuf,

        /// Metric to sort by, highest first (defaults to the configured sort)
        #[arg(long)]
        sort: Option<Metric>,

        /// Output file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
