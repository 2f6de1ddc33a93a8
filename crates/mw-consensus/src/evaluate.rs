use std::collections::{BTreeSet, HashMap};
use std::fmt;

use mw_core::{NormalizedKey, SENTINEL_STATUS, SourceTable};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ConsensusError;
use crate::predicate::BlockedPredicate;

/// Keys present in every compared table and blocked in all of them.
pub type ConsensusSet = BTreeSet<NormalizedKey>;

/// A non-fatal problem with one input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum TableWarning {
    /// The table lacks its declared key or status column and was left out.
    MissingColumn { table: String, column: String },
}

impl fmt::Display for TableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { table, column } => {
                write!(f, "skipping {table}: missing required column '{column}'")
            }
        }
    }
}

/// Why a consensus run had nothing to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NothingToDo {
    TooFewTables { valid: usize },
    NoCommonKeys,
}

impl fmt::Display for NothingToDo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTables { valid } => {
                write!(f, "not enough valid tables to compare ({valid})")
            }
            Self::NoCommonKeys => f.write_str("no keys common to all tables"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsensusOutcome {
    NothingToDo {
        reason: NothingToDo,
        warnings: Vec<TableWarning>,
    },
    Found {
        set: ConsensusSet,
        common_keys: usize,
        warnings: Vec<TableWarning>,
    },
}

impl ConsensusOutcome {
    /// The consensus set; empty when there was nothing to do.
    #[must_use]
    pub fn set(&self) -> ConsensusSet {
        match self {
            Self::NothingToDo { .. } => ConsensusSet::new(),
            Self::Found { set, .. } => set.clone(),
        }
    }

    #[must_use]
    pub fn warnings(&self) -> &[TableWarning] {
        match self {
            Self::NothingToDo { warnings, .. } | Self::Found { warnings, .. } => warnings,
        }
    }
}

/// Consensus evaluator configured with the sentinel status it writes.
#[derive(Debug, Clone)]
pub struct Consensus {
    sentinel: String,
}

impl Default for Consensus {
    fn default() -> Self {
        Self::new(SENTINEL_STATUS)
    }
}

impl Consensus {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Compute the consensus set over `tables`, one predicate per table.
    ///
    /// Tables missing their key or status column are skipped with a warning.
    /// Fewer than two usable tables, or no common keys, is a no-op outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConsensusError::PredicateCountMismatch`] if `predicates` is
    /// not the same length as `tables`.
    pub fn evaluate(
        &self,
        tables: &[SourceTable],
        predicates: &[BlockedPredicate],
    ) -> Result<ConsensusOutcome, ConsensusError> {
        check_arity(tables, predicates)?;

        let (valid, warnings) = partition_valid(tables, predicates);
        if valid.len() < 2 {
            return Ok(ConsensusOutcome::NothingToDo {
                reason: NothingToDo::TooFewTables { valid: valid.len() },
                warnings,
            });
        }

        let verdicts: Vec<HashMap<NormalizedKey, bool>> = valid
            .iter()
            .map(|(table, predicate)| self.key_verdicts(table, predicate))
            .collect();

        let common = common_keys(&verdicts);
        if common.is_empty() {
            return Ok(ConsensusOutcome::NothingToDo {
                reason: NothingToDo::NoCommonKeys,
                warnings,
            });
        }

        let set: ConsensusSet = common
            .iter()
            .filter(|key| {
                verdicts
                    .iter()
                    .all(|per_table| per_table.get(*key).copied().unwrap_or(false))
            })
            .cloned()
            .collect();

        debug!(
            common = common.len(),
            consensus = set.len(),
            tables = valid.len(),
            "consensus evaluated"
        );

        Ok(ConsensusOutcome::Found {
            set,
            common_keys: common.len(),
            warnings,
        })
    }

    /// For each key in `table`: whether every record with that key is blocked.
    fn key_verdicts(
        &self,
        table: &SourceTable,
        predicate: &BlockedPredicate,
    ) -> HashMap<NormalizedKey, bool> {
        let mut verdicts: HashMap<NormalizedKey, bool> = HashMap::new();
        for record in table.rows() {
            let Some(key) = table.key_of(record) else {
                continue;
            };
            let blocked = table
                .status_of(record)
                .is_some_and(|status| predicate.is_blocked(status, &self.sentinel));
            verdicts
                .entry(key)
                .and_modify(|all| *all = *all && blocked)
                .or_insert(blocked);
        }
        verdicts
    }
}

pub(crate) fn check_arity(
    tables: &[SourceTable],
    predicates: &[BlockedPredicate],
) -> Result<(), ConsensusError> {
    if tables.len() == predicates.len() {
        Ok(())
    } else {
        Err(ConsensusError::PredicateCountMismatch {
            tables: tables.len(),
            predicates: predicates.len(),
        })
    }
}

type ValidPairs<'a> = Vec<(&'a SourceTable, &'a BlockedPredicate)>;

fn partition_valid<'a>(
    tables: &'a [SourceTable],
    predicates: &'a [BlockedPredicate],
) -> (ValidPairs<'a>, Vec<TableWarning>) {
    let mut valid = Vec::with_capacity(tables.len());
    let mut warnings = Vec::new();

    for (table, predicate) in tables.iter().zip(predicates) {
        let missing = table.missing_columns();
        if missing.is_empty() {
            valid.push((table, predicate));
            continue;
        }
        for column in missing {
            let warning = TableWarning::MissingColumn {
                table: table.name().to_string(),
                column,
            };
            warn!("{warning}");
            warnings.push(warning);
        }
    }

    (valid, warnings)
}

fn common_keys(verdicts: &[HashMap<NormalizedKey, bool>]) -> BTreeSet<NormalizedKey> {
    let Some((first, rest)) = verdicts.split_first() else {
        return BTreeSet::new();
    };
    first
        .keys()
        .filter(|key| rest.iter().all(|other| other.contains_key(*key)))
        .cloned()
        .collect()
}
