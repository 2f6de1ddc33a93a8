use std::collections::{HashMap, HashSet};

use mw_core::{CoreError, NormalizedKey, Record, SourceTable};
use serde::Serialize;
use tracing::{debug, warn};

use crate::columns::ReportColumns;
use crate::mapping::{dns_accessible, failure_or_default, http_accessible, or_no_deduction};

/// One line of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub accessible_http: String,
    pub accessible_dns: String,
    pub dns_failure: String,
    pub http_failure: String,
    pub dns_status: String,
    pub deduction: String,
}

impl ReportRow {
    pub const HEADER: [&'static str; 7] = [
        "url",
        "accessible_http",
        "accessible_dns",
        "dns_failure",
        "http_failure",
        "dns_status",
        "deduction",
    ];

    #[must_use]
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.url,
            &self.accessible_http,
            &self.accessible_dns,
            &self.dns_failure,
            &self.http_failure,
            &self.dns_status,
            &self.deduction,
        ]
    }
}

/// First record per normalized key of one joined table.
struct Lookup<'a> {
    table: &'a SourceTable,
    rows: HashMap<NormalizedKey, &'a Record>,
}

impl<'a> Lookup<'a> {
    fn build(table: Option<&'a SourceTable>, key_column: &str) -> Option<Self> {
        let table = table?;
        if table.column_index(key_column).is_none() {
            warn!(
                table = table.name(),
                column = key_column,
                "joined table has no key column; its values are treated as missing"
            );
            return None;
        }

        let mut rows = HashMap::new();
        for record in table.rows() {
            if let Some(key) = key_in(table, record, key_column) {
                rows.entry(key).or_insert(record);
            }
        }
        debug!(table = table.name(), keys = rows.len(), "indexed joined table");
        Some(Self { table, rows })
    }

    fn text(&self, key: &NormalizedKey, column: &str) -> Option<String> {
        let record = self.rows.get(key)?;
        self.table.value(record, column).map(mw_core::CellValue::to_field)
    }
}

fn key_in(table: &SourceTable, record: &Record, column: &str) -> Option<NormalizedKey> {
    let cell = table.value(record, column)?;
    if cell.is_blank() {
        return None;
    }
    let key = NormalizedKey::new(&cell.to_field());
    (!key.is_empty()).then_some(key)
}

/// Join classification output with optional DNS and web-probe tables.
///
/// Rows follow the classification table, one per normalized URL (first wins).
/// Lookups into `dns` and `http` use the same normalization; a table that is
/// absent, or lacks its key column, contributes only missing values.
///
/// # Errors
///
/// Returns [`CoreError::MissingColumn`] if the classification table has no URL
/// column.
pub fn build_report(
    classification: &SourceTable,
    dns: Option<&SourceTable>,
    http: Option<&SourceTable>,
    columns: &ReportColumns,
) -> Result<Vec<ReportRow>, CoreError> {
    if classification.column_index(&columns.url).is_none() {
        return Err(CoreError::MissingColumn {
            table: classification.name().to_string(),
            column: columns.url.clone(),
        });
    }

    let dns = Lookup::build(dns, &columns.dns_key);
    let http = Lookup::build(http, &columns.http_key);
    let dns_text =
        |key: &NormalizedKey, column: &str| dns.as_ref().and_then(|l| l.text(key, column));
    let http_text =
        |key: &NormalizedKey, column: &str| http.as_ref().and_then(|l| l.text(key, column));

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for record in classification.rows() {
        let Some(key) = key_in(classification, record, &columns.url) else {
            continue;
        };
        if !seen.insert(key.clone()) {
            continue;
        }

        let deduction = classification
            .value(record, &columns.deduction)
            .map(mw_core::CellValue::to_field);

        rows.push(ReportRow {
            url: key.as_str().to_string(),
            accessible_http: http_accessible(
                http_text(&key, &columns.http_accessible).as_deref(),
            ),
            accessible_dns: dns_accessible(dns_text(&key, &columns.dns_blocked).as_deref()),
            dns_failure: failure_or_default(http_text(&key, &columns.dns_failure).as_deref()),
            http_failure: failure_or_default(http_text(&key, &columns.http_failure).as_deref()),
            dns_status: dns_text(&key, &columns.dns_status).unwrap_or_default(),
            deduction: or_no_deduction(deduction.as_deref()),
        });
    }

    Ok(rows)
}
