pub mod lookup;
pub mod shell;
pub mod stats;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn};

use tagscope_common::config::Config;
use tagscope_core::dataset::Dataset;
use tagscope_core::matcher::BuildReport;

#[derive(Parser)]
#[command(name = "tagscope")]
#[command(about = "Find which service tags claim an IP address.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Service tag JSON document or plain CIDR list
    #[arg(short, long, global = true, default_value = "ServiceTags_Public.json")]
    pub data: PathBuf,

    /// Less output, repeat for even less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up one or more IP addresses
    #[command(alias = "l")]
    Lookup {
        #[arg(required = true)]
        ips: Vec<String>,
    },
    /// Read addresses from stdin, one per line
    #[command(alias = "s")]
    Shell,
    /// Summarize the loaded dataset
    #[command(alias = "i")]
    Stats,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Loads the dataset and builds the table, logging every skipped entry.
///
/// A dataset where every entry was skipped is an error.
pub fn load_table(cfg: &Config) -> anyhow::Result<BuildReport> {
    let dataset = Dataset::from_path(&cfg.data_path)
        .with_context(|| format!("could not load {}", cfg.data_path.display()))?;

    if let Some(cloud) = &dataset.cloud {
        info!(
            "Dataset cloud: {cloud}, change number {}",
            dataset.change_number.map_or_else(|| "n/a".to_string(), |n| n.to_string())
        );
    }

    let report = dataset.into_table();

    for skipped in &report.skipped {
        warn!("Skipping '{}': {}", skipped.entry.cidr, skipped.error);
    }

    if report.table.is_empty() {
        anyhow::bail!(
            "none of the {} entries in {} are valid CIDR blocks",
            report.skipped.len(),
            cfg.data_path.display()
        );
    }

    info!("Loaded {} ranges", report.table.len());
    Ok(report)
}
