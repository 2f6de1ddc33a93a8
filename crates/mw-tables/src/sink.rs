use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use mw_classify::{ClassificationResult, ClassificationRow};
use tracing::{debug, warn};

use crate::error::TableError;

/// Append-only classification output.
///
/// A row, once written, is terminal: reopening the sink on an existing file
/// loads the URLs it already holds, and [`append`](Self::append) skips them.
/// The header is written only when the file is new or empty. Each row is
/// flushed immediately so an interrupted run loses at most the row in flight.
pub struct ClassificationSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    categories: Vec<String>,
    written: HashSet<String>,
}

impl ClassificationSink {
    /// Open (or create) `path` for classification rows over `categories`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the existing file cannot be read or the file
    /// cannot be opened for appending.
    pub fn open(path: &Path, categories: &[String]) -> Result<Self, TableError> {
        let header = ClassificationRow::header(categories);
        let has_content = path.metadata().is_ok_and(|m| m.len() > 0);
        let written = if has_content {
            existing_urls(path, &header)?
        } else {
            HashSet::new()
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| TableError::io(path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !has_content {
            writer
                .write_record(&header)
                .map_err(|e| TableError::csv(path, e))?;
            writer.flush().map_err(|e| TableError::io(path, e))?;
        }

        debug!(
            path = %path.display(),
            already_written = written.len(),
            "opened classification sink"
        );
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            categories: categories.to_vec(),
            written,
        })
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.written.contains(url.trim())
    }

    /// Number of URLs present in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.written.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    /// Append one result. Returns `false` (and writes nothing) when the URL is
    /// already in the file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the row cannot be written.
    pub fn append(&mut self, result: &ClassificationResult) -> Result<bool, TableError> {
        let url = result.url.trim().to_string();
        if self.written.contains(&url) {
            return Ok(false);
        }

        let row = ClassificationRow::from_result(result, &self.categories);
        self.writer
            .write_record(row.cells())
            .map_err(|e| TableError::csv(&self.path, e))?;
        self.writer
            .flush()
            .map_err(|e| TableError::io(&self.path, e))?;
        self.written.insert(url);
        Ok(true)
    }
}

fn existing_urls(path: &Path, header: &[String]) -> Result<HashSet<String>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TableError::csv(path, e))?;

    let existing = reader.headers().map_err(|e| TableError::csv(path, e))?;
    if existing.iter().map(str::trim).ne(header.iter().map(String::as_str)) {
        warn!(
            path = %path.display(),
            "existing classification file has a different header; appending anyway"
        );
    }

    let mut urls = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(|e| TableError::csv(path, e))?;
        if let Some(url) = record.get(0).map(str::trim).filter(|u| !u.is_empty()) {
            urls.insert(url.to_string());
        }
    }
    Ok(urls)
}
