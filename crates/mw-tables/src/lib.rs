//! # mw-tables
//!
//! CSV file I/O for meshwatch. The core crates never touch the filesystem;
//! everything that reads or writes a file goes through here.
//!
//! - [`read_table`] / [`write_table`] / [`load_directory`]: measurement tables
//! - [`read_lexicon`]: the two-column category lexicon
//! - [`read_urls`] / [`read_pages`]: classification input
//! - [`ClassificationSink`]: resumable, append-only classification output
//! - [`write_lines`] / [`write_report`]: single-column lists and the final report

mod error;
mod lexicon;
mod pages;
mod sink;
mod source;
mod write;

pub use error::TableError;
pub use lexicon::read_lexicon;
pub use pages::{PageInput, read_pages, read_urls};
pub use sink::ClassificationSink;
pub use source::{DirectoryLoad, LoadWarning, LoadedTable, load_directory, read_table, write_table};
pub use write::{write_lines, write_report};
