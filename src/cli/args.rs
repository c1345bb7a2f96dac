//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Folio page model CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output file for page records, `-` for stdout (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Process every page under the content directory
    #[command(visible_alias = "b")]
    Build {
        /// Fail the build when any page fails
        #[arg(short, long)]
        strict: bool,

        /// Render page bodies during processing
        #[arg(short = 'R', long)]
        pre_render: bool,
    },

    /// Process a single page and print its record
    #[command(visible_alias = "i")]
    Inspect {
        /// Page source file (`.md` or `.vue`)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}
