use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Mark domains blocked in every table of a batch with the sentinel status.
    Consensus(ConsensusArgs),
    /// Classify URLs into categories by keyword frequency.
    Classify(ClassifyArgs),
    /// List the distinct hosts of a batch that still need classification.
    Inputs(InputsArgs),
    /// Join classification output with DNS and web-probe measurements.
    Report(ReportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ConsensusArgs {
    /// Directory holding one CSV table per measurement source.
    pub dir: PathBuf,

    /// Table profile (key column, status column, blocked policy).
    #[arg(long, default_value = "dns")]
    pub profile: String,

    /// Compute and report without writing tables back.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Two-column CSV: category code, comma-separated keywords.
    #[arg(long)]
    pub lexicon: PathBuf,

    /// CSV with a URL column and an optional page-text column.
    #[arg(long)]
    pub input: PathBuf,

    /// Classification CSV; appended to, created if missing.
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct InputsArgs {
    /// Directory holding the batch tables.
    pub dir: PathBuf,

    #[arg(long, default_value = "web")]
    pub profile: String,

    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Classification CSV produced by `mwt classify`.
    #[arg(long)]
    pub classification: PathBuf,

    /// DNS measurement table.
    #[arg(long)]
    pub dns: Option<PathBuf>,

    /// Web-probe measurement table.
    #[arg(long)]
    pub http: Option<PathBuf>,

    #[arg(long)]
    pub output: PathBuf,
}
