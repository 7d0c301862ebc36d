use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgforged")]
#[command(author, version, about = "Resize images and generate thumbnails in watched folders")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan and watch the configured folders until interrupted
    Start,

    /// Process a single file once
    Run {
        /// Image file to process
        #[arg(required = true)]
        input: PathBuf,

        /// Show what would be done without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default search if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
