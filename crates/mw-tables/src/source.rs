use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use mw_core::{CellValue, SourceTable};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::TableError;

/// Read one measurement table.
///
/// The table is named after the file stem. Every cell is kept as text (empty
/// fields as [`CellValue::Empty`]) so [`write_table`] reproduces it. A missing
/// key or status column is not an error here; consensus reports it.
///
/// # Errors
///
/// Returns [`TableError::Csv`] if the file cannot be opened or parsed, or a
/// row's width differs from the header.
pub fn read_table(
    path: &Path,
    key_column: &str,
    status_column: &str,
) -> Result<SourceTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| TableError::csv(path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| TableError::csv(path, e))?
        .iter()
        .map(ToString::to_string)
        .collect();

    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
    let mut table = SourceTable::new(name, columns, key_column, status_column);

    for record in reader.records() {
        let record = record.map_err(|e| TableError::csv(path, e))?;
        table.push(record.iter().map(CellValue::from_field).collect())?;
    }

    debug!(path = %path.display(), rows = table.len(), "read table");
    Ok(table)
}

/// Write a table back: header first, then every row in order.
///
/// # Errors
///
/// Returns [`TableError::Csv`] if the file cannot be created or written.
pub fn write_table(path: &Path, table: &SourceTable) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| TableError::csv(path, e))?;
    writer
        .write_record(table.columns())
        .map_err(|e| TableError::csv(path, e))?;
    for record in table.rows() {
        writer
            .write_record(record.values().iter().map(CellValue::to_field))
            .map_err(|e| TableError::csv(path, e))?;
    }
    writer.flush().map_err(|e| TableError::io(path, e))
}

/// A table together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub table: SourceTable,
}

/// A file in a batch directory that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped '{}': {}", self.path.display(), self.reason)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryLoad {
    pub tables: Vec<LoadedTable>,
    pub warnings: Vec<LoadWarning>,
}

impl DirectoryLoad {
    #[must_use]
    pub fn source_tables(&self) -> Vec<SourceTable> {
        self.tables.iter().map(|t| t.table.clone()).collect()
    }
}

/// Load every `*.csv` file of `dir`, sorted by file name.
///
/// Files that fail to parse become [`LoadWarning`]s.
///
/// # Errors
///
/// Returns [`TableError::Io`] if the directory itself cannot be listed.
pub fn load_directory(
    dir: &Path,
    key_column: &str,
    status_column: &str,
) -> Result<DirectoryLoad, TableError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| TableError::io(dir, e))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    let mut load = DirectoryLoad::default();
    for path in paths {
        match read_table(&path, key_column, status_column) {
            Ok(table) => load.tables.push(LoadedTable { path, table }),
            Err(error) => {
                let warning = LoadWarning {
                    path,
                    reason: error.to_string(),
                };
                warn!("{warning}");
                load.warnings.push(warning);
            }
        }
    }
    Ok(load)
}
