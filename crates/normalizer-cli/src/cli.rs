//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Normalizer: discover functional dependencies and normalize flat tables
#[derive(Parser)]
#[command(name = "normalizer")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file for functional dependencies and normal form
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the analysis report (default: <file>.analysis.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analyze a random sample of this many rows
        #[arg(long)]
        sample: Option<usize>,

        /// Minimum confidence for reporting a dependency
        #[arg(long, default_value = "0.8")]
        threshold: f64,
    },

    /// Decompose a data file into normalized tables
    Normalize {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Reviewed analysis report or normalization config (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Target normal form (3NF or BCNF)
        #[arg(short, long, default_value = "3NF")]
        target: String,

        /// Output directory
        #[arg(short, long = "output-dir", default_value = "./normalized")]
        output: PathBuf,
    },

    /// Replay a saved transform on new data with the same columns
    Transform {
        /// Path to the new data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Transform config written by `normalize`
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory
        #[arg(short, long = "output-dir", default_value = "./output")]
        output: PathBuf,

        /// Fail when input columns are missing instead of skipping tables
        #[arg(long)]
        strict: bool,
    },
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
