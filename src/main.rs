//! CLI entry point for slice anomaly detection

use clap::Parser;
use slicescan::io::cli::{Cli, FileProcessor};

fn main() -> slicescan::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut processor = FileProcessor::new(cli)?;
    processor.process()?;
    Ok(())
}
