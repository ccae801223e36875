//! Configuration handling for the scanner.

use crate::types::{Ecosystem, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dependency confusion exposure scanner.
#[derive(Parser, Debug, Clone)]
#[command(name = "confuscan")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan a source tree for dependency confusion exposure
    Scan(ScanConfig),
}

/// Configuration for the scan command.
#[derive(Parser, Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Ecosystem for source-derived references
    #[arg(long, default_value = "npm")]
    pub ecosystem: String,

    /// Pre-built candidate-name files, one raw identifier per line;
    /// ecosystem inferred from the file stem (npm, pip, gem, go, maven,
    /// docker, rust)
    #[arg(short = 'c', long = "candidates")]
    pub candidates: Vec<PathBuf>,

    /// Maximum concurrent registry probes per batch
    #[arg(long, default_value = "20")]
    pub batch_size: usize,

    /// Per-probe timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Pause between probe batches in milliseconds
    #[arg(long, default_value = "500")]
    pub batch_pause_ms: u64,

    /// Evidence file path; written only when unregistered names are found
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the full scan result as JSON
    #[arg(long)]
    pub json: bool,

    /// Extract and classify only; skip registry probing
    #[arg(long)]
    pub skip_probe: bool,

    /// Quiet mode: only produce output when unregistered names are found
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Override the registry base URL for the scan ecosystem (private
    /// mirrors)
    #[arg(long, env = "CONFUSCAN_REGISTRY_URL")]
    pub registry_url: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            verbose: false,
            ecosystem: "npm".to_string(),
            candidates: Vec::new(),
            batch_size: 20,
            timeout: 10,
            batch_pause_ms: 500,
            output: None,
            json: false,
            skip_probe: false,
            quiet: false,
            registry_url: None,
        }
    }
}

impl ScanConfig {
    /// The ecosystem source-derived references belong to.
    pub fn ecosystem(&self) -> Result<Ecosystem> {
        self.ecosystem.parse()
    }

    /// Where the evidence table goes when there is something to report.
    pub fn evidence_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.root.join("confusion_evidence.txt"))
    }
}
