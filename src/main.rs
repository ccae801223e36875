//! confuscan - dependency confusion exposure scanner.
//!
//! CLI entry point.

use clap::Parser;
use confuscan::{Commands, Config, ScanConfig, Scanner};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    let Commands::Scan(scan_config) = config.command;

    // Set up logging
    let filter = if scan_config.verbose {
        EnvFilter::new("confuscan=debug,info")
    } else {
        EnvFilter::new("confuscan=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(code) = run_scan(scan_config).await {
        return code;
    }

    ExitCode::SUCCESS
}

async fn run_scan(scan_config: ScanConfig) -> Result<(), ExitCode> {
    if !scan_config.json && !scan_config.quiet {
        print_banner();
    }

    let scanner = match Scanner::new(scan_config.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create scanner: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let result = match scanner.scan().await {
        Ok(r) => r,
        Err(e) => {
            error!("Scan failed: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let available = result.available_count();
    if available > 0 && !scan_config.json {
        eprintln!("\n{available} unregistered package names found!");
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!("\x1b[36m╔══════════════════════════════════════════════════════════════╗\x1b[0m");
    println!("\x1b[36m║                   CONFUSCAN v0.1.0                           ║\x1b[0m");
    println!("\x1b[36m║           Dependency Confusion Scanner                       ║\x1b[0m");
    println!("\x1b[36m╚══════════════════════════════════════════════════════════════╝\x1b[0m");
    println!();
}
