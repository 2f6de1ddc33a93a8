use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsensusError {
    /// Every table needs exactly one blocked predicate.
    #[error("got {predicates} blocked predicates for {tables} tables")]
    PredicateCountMismatch { tables: usize, predicates: usize },

    #[error(transparent)]
    Core(#[from] mw_core::CoreError),
}
