use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output mode for the finished plan.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Pair up a roster while avoiding groupings from earlier rounds.
#[derive(Debug, Parser)]
#[command(name = "pair-rotation", version)]
pub struct Cli {
    /// Roster file, one participant per line (reads stdin when omitted)
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// History file, one past group per line, members separated by ',' or tab
    #[arg(short = 'H', long)]
    pub history: Option<PathBuf>,

    /// Append the new plan to the history file
    #[arg(short, long, requires = "history")]
    pub save: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// RNG seed for a reproducible plan (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop searching after this many milliseconds (overrides config)
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Config file (defaults to ./pair-rotation.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
