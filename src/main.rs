//! Folio - page model CLI for static site builds.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use folio::{
    cli::{self, Cli, Commands},
    config::SiteConfig,
    log,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let result = rt.block_on(async {
        match &cli.command {
            Commands::Build { strict, .. } => cli::build::run_build(&config, *strict).await,
            Commands::Inspect { file } => cli::inspect::run_inspect(&config, file).await,
        }
    });

    if let Err(err) = result {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
