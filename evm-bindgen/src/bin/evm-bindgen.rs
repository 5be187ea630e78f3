//! CLI entry point for evm-bindgen.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// evm-bindgen — generate typed Rust contract interfaces from EVM ABI artifacts.
#[derive(Parser, Debug)]
#[command(name = "evm-bindgen", version, about)]
struct Cli {
    /// Path to the evm-bindgen.toml configuration file.
    #[arg(default_value = "evm-bindgen.toml")]
    config: PathBuf,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("evm_bindgen=info")),
        )
        .init();

    let cli = Cli::parse();
    evm_bindgen::run(&cli.config, cli.output.as_deref())?;
    Ok(())
}
