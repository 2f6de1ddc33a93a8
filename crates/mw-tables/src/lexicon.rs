use std::path::Path;

use mw_classify::CategoryLexicon;
use tracing::{debug, warn};

use crate::error::TableError;

/// Read a lexicon file: a header row, then `code, "kw1, kw2, ..."` rows.
///
/// Rows without a code are skipped with a warning.
///
/// # Errors
///
/// Returns [`TableError::Csv`] if the file cannot be opened or parsed.
pub fn read_lexicon(path: &Path) -> Result<CategoryLexicon, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TableError::csv(path, e))?;

    let mut lexicon = CategoryLexicon::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TableError::csv(path, e))?;
        let code = record.get(0).unwrap_or_default();
        let keywords = record.get(1).unwrap_or_default();

        if lexicon.insert_list(code, keywords).is_err() {
            warn!(path = %path.display(), row = line + 2, "lexicon row has no category code");
        }
    }

    debug!(path = %path.display(), categories = lexicon.len(), "read lexicon");
    Ok(lexicon)
}
