use std::path::PathBuf;

use anyhow::Context;
use mw_config::MeshConfig;
use mw_consensus::{BlockedPredicate, Consensus, ConsensusSummary};
use mw_tables::{LoadWarning, load_directory, write_table};
use serde::Serialize;
use tracing::info;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConsensusArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConsensusResponse {
    directory: PathBuf,
    profile: String,
    dry_run: bool,
    files_written: Vec<PathBuf>,
    load_warnings: Vec<LoadWarning>,
    #[serde(flatten)]
    summary: ConsensusSummary,
}

/// Handle `mwt consensus`.
pub fn handle(
    args: &ConsensusArgs,
    config: &MeshConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let profile = config.profile(&args.profile)?;
    let load = load_directory(&args.dir, &profile.key_column, &profile.status_column)
        .with_context(|| format!("failed to load tables from '{}'", args.dir.display()))?;
    let load_warnings = load.warnings;
    let (paths, mut tables): (Vec<PathBuf>, Vec<_>) = load
        .tables
        .into_iter()
        .map(|loaded| (loaded.path, loaded.table))
        .unzip();

    let predicates = vec![BlockedPredicate::from(profile.blocked.clone()); tables.len()];
    let summary = Consensus::new(config.consensus.sentinel.clone())
        .mark(&mut tables, &predicates)
        .context("consensus marking failed")?;

    let mut files_written = Vec::new();
    if !args.dry_run {
        for ((path, table), report) in paths.iter().zip(&tables).zip(&summary.tables) {
            if report.changed == 0 {
                continue;
            }
            write_table(path, table)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            info!(path = %path.display(), changed = report.changed, "table rewritten");
            files_written.push(path.clone());
        }
    }

    output(
        &ConsensusResponse {
            directory: args.dir.clone(),
            profile: args.profile.clone(),
            dry_run: args.dry_run,
            files_written,
            load_warnings,
            summary,
        },
        flags.format,
    )
}
