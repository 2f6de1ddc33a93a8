use std::path::PathBuf;

use anyhow::Context;
use mw_config::MeshConfig;
use mw_consensus::{TableWarning, unique_inputs};
use mw_tables::{LoadWarning, load_directory, write_lines};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputsArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InputsResponse {
    output: PathBuf,
    tables: usize,
    inputs: usize,
    load_warnings: Vec<LoadWarning>,
    warnings: Vec<TableWarning>,
}

/// Handle `mwt inputs`.
pub fn handle(
    args: &InputsArgs,
    config: &MeshConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let profile = config.profile(&args.profile)?;
    let load = load_directory(&args.dir, &profile.key_column, &profile.status_column)
        .with_context(|| format!("failed to load tables from '{}'", args.dir.display()))?;

    let unique = unique_inputs(&load.source_tables(), &config.consensus.sentinel);
    // Headed with the column `mwt classify` reads URLs from.
    let header = &config.classify.url_column;
    let written = write_lines(&args.output, header, &unique.inputs)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    output(
        &InputsResponse {
            output: args.output.clone(),
            tables: load.tables.len(),
            inputs: written,
            load_warnings: load.warnings,
            warnings: unique.warnings,
        },
        flags.format,
    )
}
