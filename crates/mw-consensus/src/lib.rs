//! # mw-consensus
//!
//! Cross-source artifact detection for meshwatch.
//!
//! A domain reported blocked by *every* independent measurement method in a
//! batch is more likely a shared measurement artifact than real censorship.
//! This crate finds those domains and rewrites their status to the sentinel:
//!
//! 1. [`Consensus::evaluate`] intersects the normalized keys of all
//!    well-formed tables and keeps the keys every table reports blocked.
//! 2. [`Consensus::rewrite`] writes the sentinel over the blocked rows of
//!    those keys and counts cells that actually changed.
//! 3. [`Consensus::mark`] does both and returns a serializable summary.
//!
//! [`unique_inputs`] collects the distinct hosts still worth classifying.

mod error;
mod evaluate;
mod inputs;
mod predicate;
mod rewrite;

pub use error::ConsensusError;
pub use evaluate::{Consensus, ConsensusOutcome, ConsensusSet, NothingToDo, TableWarning};
pub use inputs::{UniqueInputs, unique_inputs};
pub use predicate::BlockedPredicate;
pub use rewrite::{ConsensusSummary, RewriteReport, SummaryStatus};
