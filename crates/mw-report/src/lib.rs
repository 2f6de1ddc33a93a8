//! # mw-report
//!
//! Final per-URL summary joining three tables on normalized key:
//!
//! - the classification output (`url`, `deduction`),
//! - a DNS measurement table (`Dominio`, `Status`, `Bloqueado`),
//! - a web-probe table (`input`, `accessible`, failure columns).
//!
//! Column names are configurable through [`ReportColumns`].

mod columns;
mod join;
mod mapping;

pub use columns::ReportColumns;
pub use join::{ReportRow, build_report};
pub use mapping::{
    NO_DEDUCTION, NO_ERROR, dns_accessible, failure_or_default, http_accessible, or_no_deduction,
};
