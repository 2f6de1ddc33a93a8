use std::path::Path;

use mw_report::ReportRow;

use crate::error::TableError;

/// Write a single-column CSV: `header`, then one value per line.
///
/// # Errors
///
/// Returns [`TableError::Csv`] if the file cannot be created or written.
pub fn write_lines<I, S>(path: &Path, header: &str, values: I) -> Result<usize, TableError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| TableError::csv(path, e))?;
    writer
        .write_record([header])
        .map_err(|e| TableError::csv(path, e))?;

    let mut count = 0;
    for value in values {
        writer
            .write_record([value.as_ref()])
            .map_err(|e| TableError::csv(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| TableError::io(path, e))?;
    Ok(count)
}

/// Write the joined report with its fixed header.
///
/// # Errors
///
/// Returns [`TableError::Csv`] if the file cannot be created or written.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| TableError::csv(path, e))?;
    writer
        .write_record(ReportRow::HEADER)
        .map_err(|e| TableError::csv(path, e))?;
    for row in rows {
        writer
            .write_record(row.cells())
            .map_err(|e| TableError::csv(path, e))?;
    }
    writer.flush().map_err(|e| TableError::io(path, e))
}
