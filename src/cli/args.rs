//! Command line argument parsing for the Retort CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Retort - categorize comments and suggest replies
#[derive(Parser, Debug, Clone)]
#[command(name = "retort")]
#[command(about = "Categorize comments and suggest canned replies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RetortArgs {
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

    /// JSON configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", env = "RETORT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RetortArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the classifier from a labeled CSV
    Train(TrainArgs),

    /// Classify every comment of a CSV file
    Batch(BatchArgs),

    /// Classify comments given on the command line
    Classify(ClassifyArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled CSV with `comment` and `label` columns
    #[arg(short, long, value_name = "CSV", default_value = "data/comments_labeled.csv")]
    pub data: PathBuf,

    /// Directory to write the model artifacts to
    #[arg(short, long, value_name = "DIR", env = "RETORT_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Where to write the label distribution chart
    #[arg(long, value_name = "FILE", default_value = "label_distribution.txt")]
    pub distribution_output: PathBuf,
}

/// Arguments for batch classification
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Input CSV with a `comment` column
    #[arg(short, long, value_name = "CSV", default_value = "data/new_comments_example.csv")]
    pub input: PathBuf,

    /// Output CSV with predictions
    #[arg(
        short,
        long,
        value_name = "CSV",
        default_value = "data/new_comments_with_labels.csv"
    )]
    pub output: PathBuf,

    /// Directory holding the model artifacts
    #[arg(short, long, value_name = "DIR", env = "RETORT_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Leave suggested replies out of the output
    #[arg(long)]
    pub no_replies: bool,
}

impl BatchArgs {
    /// Check if replies should be written
    pub fn include_replies(&self) -> bool {
        !self.no_replies
    }
}

/// Arguments for classifying free text
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Comments to classify
    #[arg(value_name = "TEXT", required = true)]
    pub comments: Vec<String>,

    /// Directory holding the model artifacts
    #[arg(short, long, value_name = "DIR", env = "RETORT_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Leave suggested replies out of the output
    #[arg(long)]
    pub no_replies: bool,
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
