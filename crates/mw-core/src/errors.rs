//! Cross-cutting error types for meshwatch.
//!
//! Errors raised while building or querying a [`SourceTable`](crate::SourceTable).
//! Domain-specific errors (e.g. `ConsensusError`, `TableError`) live in their
//! respective crates; the CLI converges everything into `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A row does not have one value per header column.
    #[error("Row width mismatch in table '{table}': expected {expected} values, got {actual}")]
    RowWidth {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// A column lookup named a column the table does not have.
    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
