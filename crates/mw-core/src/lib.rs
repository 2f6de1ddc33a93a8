//! # mw-core
//!
//! Core types shared by every meshwatch crate.
//!
//! This crate provides:
//! - [`CellValue`], the heterogeneous value held by one table cell
//! - [`SourceTable`] / [`Record`], the in-memory record store for one measurement table
//! - [`NormalizedKey`], the canonical domain key used to line up records across sources
//! - [`BlockedPolicy`] and the reserved [`SENTINEL_STATUS`]
//! - Cross-cutting error types

pub mod errors;
pub mod key;
pub mod status;
pub mod table;
pub mod value;

pub use errors::CoreError;
pub use key::NormalizedKey;
pub use status::{BlockedPolicy, SENTINEL_STATUS};
pub use table::{Record, SourceTable};
pub use value::CellValue;
