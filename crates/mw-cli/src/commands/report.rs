use std::path::{Path, PathBuf};

use anyhow::Context;
use mw_config::MeshConfig;
use mw_core::SourceTable;
use mw_report::{NO_DEDUCTION, build_report};
use mw_tables::{read_table, write_report};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ReportResponse {
    output: PathBuf,
    rows: usize,
    inaccessible_http: usize,
    inaccessible_dns: usize,
    without_deduction: usize,
}

fn read(path: &Path, key: &str, status: &str) -> anyhow::Result<SourceTable> {
    read_table(path, key, status).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Handle `mwt report`.
pub fn handle(
    args: &ReportArgs,
    config: &MeshConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let columns = &config.report;
    let classification = read(&args.classification, &columns.url, &columns.deduction)?;
    let dns = args
        .dns
        .as_deref()
        .map(|path| read(path, &columns.dns_key, &columns.dns_blocked))
        .transpose()?;
    let http = args
        .http
        .as_deref()
        .map(|path| read(path, &columns.http_key, &columns.http_accessible))
        .transpose()?;

    let rows = build_report(&classification, dns.as_ref(), http.as_ref(), columns)?;
    write_report(&args.output, &rows)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    output(
        &ReportResponse {
            output: args.output.clone(),
            rows: rows.len(),
            inaccessible_http: rows.iter().filter(|r| r.accessible_http == "NO").count(),
            inaccessible_dns: rows.iter().filter(|r| r.accessible_dns == "NO").count(),
            without_deduction: rows.iter().filter(|r| r.deduction == NO_DEDUCTION).count(),
        },
        flags.format,
    )
}
