//! # protoforge CLI Entry Point

use clap::Parser;
use protoforge::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Generate(args) => {
            let report = args.run()?;
            tracing::info!(
                "Generated {}: {} rendered, {} copied",
                args.root.display(),
                report.rendered,
                report.copied
            );
        }
    }

    Ok(())
}
