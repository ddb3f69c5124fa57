//! Command line argument parsing for the Glossa CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::builder::DEFAULT_ARTIFACT_NAME;
use crate::lexicon::DATA_DIR_ENV;

/// Glossa - build and query a static English word lexicon
#[derive(Parser, Debug, Clone)]
#[command(name = "glossa")]
#[command(about = "Build and query a static English word lexicon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GlossaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Directory holding the word list artifact
    #[arg(short, long, env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// File name of the word list artifact
    #[arg(long, default_value = DEFAULT_ARTIFACT_NAME, global = true)]
    pub artifact: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GlossaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch all sources and write a new word list
    Generate(GenerateArgs),

    /// Check whether words are in the lexicon
    Check(CheckArgs),

    /// Show lexicon statistics
    Stats,

    /// List words in the lexicon
    List(ListArgs),
}

/// Arguments for generating the word list
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// JSON file with a custom source list ({"sources": [...]})
    #[arg(short, long, value_name = "SOURCES_FILE")]
    pub sources: Option<PathBuf>,

    /// Number of sources fetched at the same time
    #[arg(short, long, default_value = "1")]
    pub concurrency: usize,

    /// Per-source timeout in seconds (0 disables the timeout)
    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,

    /// Keep a copy of the previous word list as <artifact>.bak
    #[arg(long)]
    pub backup: bool,
}

/// Arguments for checking words
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Words to look up (matched exactly, case-sensitively)
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for listing words
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only list words starting with this prefix
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Maximum number of words to list
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
