use mw_core::{CellValue, NormalizedKey, SourceTable};
use serde::Serialize;
use tracing::info;

use crate::error::ConsensusError;
use crate::evaluate::{Consensus, ConsensusOutcome, ConsensusSet, TableWarning, check_arity};
use crate::predicate::BlockedPredicate;

/// Per-table result of a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub table: String,
    /// Status cells whose value actually changed.
    pub changed: usize,
    /// The table was malformed and left untouched.
    pub skipped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    NothingToDo,
    NoConsensus,
    Marked,
}

/// Everything a `mark` run did, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusSummary {
    pub status: SummaryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub common_keys: usize,
    pub consensus: Vec<String>,
    pub tables: Vec<RewriteReport>,
    pub warnings: Vec<TableWarning>,
}

impl ConsensusSummary {
    #[must_use]
    pub fn total_changed(&self) -> usize {
        self.tables.iter().map(|t| t.changed).sum()
    }
}

impl Consensus {
    /// Write the sentinel over every blocked row whose key is in `set`.
    ///
    /// Non-status columns and row order are untouched. Running twice with the
    /// same set reports zero changes the second time, because the sentinel is
    /// never considered blocked.
    ///
    /// # Errors
    ///
    /// Returns [`ConsensusError::PredicateCountMismatch`] if `predicates` is
    /// not the same length as `tables`.
    pub fn rewrite(
        &self,
        tables: &mut [SourceTable],
        set: &ConsensusSet,
        predicates: &[BlockedPredicate],
    ) -> Result<Vec<RewriteReport>, ConsensusError> {
        check_arity(tables, predicates)?;

        tables
            .iter_mut()
            .zip(predicates)
            .map(|(table, predicate)| self.rewrite_table(table, set, predicate))
            .collect()
    }

    /// Like [`Consensus::rewrite`] but leaves the inputs alone and returns
    /// rewritten copies.
    ///
    /// # Errors
    ///
    /// See [`Consensus::rewrite`].
    pub fn rewrite_copies(
        &self,
        tables: &[SourceTable],
        set: &ConsensusSet,
        predicates: &[BlockedPredicate],
    ) -> Result<Vec<(SourceTable, RewriteReport)>, ConsensusError> {
        let mut copies = tables.to_vec();
        let reports = self.rewrite(&mut copies, set, predicates)?;
        Ok(copies.into_iter().zip(reports).collect())
    }

    /// Evaluate and rewrite in one pass.
    ///
    /// # Errors
    ///
    /// See [`Consensus::evaluate`].
    pub fn mark(
        &self,
        tables: &mut [SourceTable],
        predicates: &[BlockedPredicate],
    ) -> Result<ConsensusSummary, ConsensusError> {
        let untouched = |tables: &[SourceTable]| -> Vec<RewriteReport> {
            tables
                .iter()
                .map(|t| RewriteReport {
                    table: t.name().to_string(),
                    changed: 0,
                    skipped: !t.is_well_formed(),
                })
                .collect()
        };

        match self.evaluate(tables, predicates)? {
            ConsensusOutcome::NothingToDo { reason, warnings } => {
                info!(%reason, "nothing to compare");
                Ok(ConsensusSummary {
                    status: SummaryStatus::NothingToDo,
                    reason: Some(reason.to_string()),
                    common_keys: 0,
                    consensus: Vec::new(),
                    tables: untouched(tables),
                    warnings,
                })
            }
            ConsensusOutcome::Found {
                set,
                common_keys,
                warnings,
            } if set.is_empty() => {
                info!(common_keys, "no domains consistently blocked across all tables");
                Ok(ConsensusSummary {
                    status: SummaryStatus::NoConsensus,
                    reason: Some("no domains consistently blocked across all tables".into()),
                    common_keys,
                    consensus: Vec::new(),
                    tables: untouched(tables),
                    warnings,
                })
            }
            ConsensusOutcome::Found {
                set,
                common_keys,
                warnings,
            } => {
                info!(keys = set.len(), "domains blocked in every table");
                let reports = self.rewrite(tables, &set, predicates)?;
                Ok(ConsensusSummary {
                    status: SummaryStatus::Marked,
                    reason: None,
                    common_keys,
                    consensus: set.into_iter().map(NormalizedKey::into_string).collect(),
                    tables: reports,
                    warnings,
                })
            }
        }
    }

    fn rewrite_table(
        &self,
        table: &mut SourceTable,
        set: &ConsensusSet,
        predicate: &BlockedPredicate,
    ) -> Result<RewriteReport, ConsensusError> {
        if !table.is_well_formed() {
            return Ok(RewriteReport {
                table: table.name().to_string(),
                changed: 0,
                skipped: true,
            });
        }

        let targets: Vec<usize> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                table.key_of(record).is_some_and(|key| set.contains(&key))
                    && table
                        .status_of(record)
                        .is_some_and(|status| predicate.is_blocked(status, self.sentinel()))
            })
            .map(|(index, _)| index)
            .collect();

        let mut changed = 0;
        for index in targets {
            if table.set_status(index, CellValue::from(self.sentinel()))? {
                changed += 1;
            }
        }

        if changed > 0 {
            info!(table = table.name(), changed, "rows updated");
        } else {
            info!(table = table.name(), "no rows to update");
        }

        Ok(RewriteReport {
            table: table.name().to_string(),
            changed,
            skipped: false,
        })
    }
}
