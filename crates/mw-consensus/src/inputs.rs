use std::collections::BTreeSet;

use mw_core::SourceTable;
use mw_core::status::is_sentinel;
use serde::Serialize;
use tracing::warn;

use crate::evaluate::TableWarning;

/// Distinct hosts collected across a batch of tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UniqueInputs {
    pub inputs: Vec<String>,
    pub warnings: Vec<TableWarning>,
}

/// Collect the sorted, distinct hosts of every row not already marked with
/// the sentinel. This is the list handed over to manual classification.
///
/// Tables lacking their key or status column are skipped with a warning.
#[must_use]
pub fn unique_inputs(tables: &[SourceTable], sentinel: &str) -> UniqueInputs {
    let mut hosts = BTreeSet::new();
    let mut warnings = Vec::new();

    for table in tables {
        let missing = table.missing_columns();
        if !missing.is_empty() {
            for column in missing {
                let warning = TableWarning::MissingColumn {
                    table: table.name().to_string(),
                    column,
                };
                warn!("{warning}");
                warnings.push(warning);
            }
            continue;
        }

        for record in table.rows() {
            if table
                .status_of(record)
                .is_some_and(|status| is_sentinel(status, sentinel))
            {
                continue;
            }
            if let Some(key) = table.key_of(record) {
                hosts.insert(key.host().to_string());
            }
        }
    }

    UniqueInputs {
        inputs: hosts.into_iter().collect(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mw_core::SENTINEL_STATUS;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_hosts_and_skips_sentinel_rows() {
        let a = SourceTable::from_rows(
            "a",
            &["input", "accessible"],
            "input",
            "accessible",
            [
                ["https://www.b.com/page", "False"],
                ["http://a.com/", "True"],
                ["http://gone.com/", SENTINEL_STATUS],
            ],
        )
        .expect("fixture");
        let b = SourceTable::from_rows(
            "b",
            &["input", "accessible"],
            "input",
            "accessible",
            [["A.com", "False"], ["", "False"]],
        )
        .expect("fixture");

        let result = unique_inputs(&[a, b], SENTINEL_STATUS);
        assert_eq!(result.inputs, vec!["a.com".to_string(), "b.com".to_string()]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn malformed_tables_only_warn() {
        let broken = SourceTable::from_rows(
            "broken",
            &["url"],
            "input",
            "accessible",
            [["x.com"]],
        )
        .expect("fixture");
        let result = unique_inputs(&[broken], SENTINEL_STATUS);
        assert!(result.inputs.is_empty());
        assert_eq!(result.warnings.len(), 2);
    }
}
