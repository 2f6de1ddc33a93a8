//! # mw-classify
//!
//! Keyword-frequency category deduction.
//!
//! A [`CategoryLexicon`] maps category codes to keywords. [`Classifier`]
//! compiles it once and counts, per keyword, whole-word occurrences in a
//! page's text plus substring occurrences in its URL. [`deduce`] turns the
//! per-category totals into one or more likely categories.
//!
//! Everything here is pure: no I/O, deterministic, and `Classifier` is
//! `Send + Sync` so many URLs can be classified in parallel.

mod deduce;
mod error;
mod lexicon;
mod matcher;
mod row;
pub mod taxonomy;

pub use deduce::deduce;
pub use error::ClassifyError;
pub use lexicon::CategoryLexicon;
pub use matcher::{ClassificationResult, Classifier, classify};
pub use row::{ClassificationRow, LIST_SEPARATOR};
