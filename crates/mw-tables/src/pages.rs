use std::collections::HashSet;
use std::path::Path;

use crate::error::TableError;

/// One URL to classify, with whatever page text the input carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInput {
    pub url: String,
    pub text: String,
}

/// Read classification input: distinct URLs in file order.
///
/// `text_column` is optional in the file; when the column is absent every page
/// gets empty text and only the URL is matched.
///
/// # Errors
///
/// Returns [`TableError::MissingColumn`] if `url_column` is absent, or
/// [`TableError::Csv`] on parse failure.
pub fn read_pages(
    path: &Path,
    url_column: &str,
    text_column: &str,
) -> Result<Vec<PageInput>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TableError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| TableError::csv(path, e))?;
    let url_index =
        position(headers, url_column).ok_or_else(|| TableError::MissingColumn {
            path: path.to_path_buf(),
            column: url_column.to_string(),
        })?;
    let text_index = position(headers, text_column);

    let mut seen = HashSet::new();
    let mut pages = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TableError::csv(path, e))?;
        let url = record.get(url_index).unwrap_or_default().trim();
        if url.is_empty() || !seen.insert(url.to_string()) {
            continue;
        }
        let text = text_index
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string();
        pages.push(PageInput {
            url: url.to_string(),
            text,
        });
    }
    Ok(pages)
}

/// The distinct, non-blank values of `column`, in file order.
///
/// # Errors
///
/// See [`read_pages`].
pub fn read_urls(path: &Path, column: &str) -> Result<Vec<String>, TableError> {
    Ok(read_pages(path, column, "")?
        .into_iter()
        .map(|page| page.url)
        .collect())
}

fn position(headers: &csv::StringRecord, column: &str) -> Option<usize> {
    if column.is_empty() {
        return None;
    }
    headers.iter().position(|h| h.trim() == column)
}
