//! CLI Module
//!
//! Command-line front end that reads and writes profile files around the codec.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cura profile converter - validate, import and export slicer profiles
#[derive(Parser, Debug)]
#[command(name = "cura-profile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file overriding the codec defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile format to use
    #[arg(short, long, global = true, default_value = "cura")]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the sections of a profile as JSON
    #[command(name = "parse")]
    Parse {
        /// Path to the profile
        path: PathBuf,
    },

    /// Check that a profile is structurally valid
    #[command(name = "validate")]
    Validate {
        /// Path to the profile
        path: PathBuf,
    },

    /// Import a profile and print the resulting layer as JSON
    #[command(name = "import")]
    Import {
        /// Path to the profile
        path: PathBuf,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Export a JSON profile snapshot as a profile file
    #[command(name = "export")]
    Export {
        /// Path to the snapshot JSON
        snapshot: PathBuf,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available profile formats
    #[command(name = "formats")]
    Formats,
}
