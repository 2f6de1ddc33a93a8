use crate::matcher::ClassificationResult;

/// Separator used when a list is rendered into a single cell.
pub const LIST_SEPARATOR: &str = ", ";

/// Flat, column-ordered view of a [`ClassificationResult`].
///
/// Columns are `url, matched_keywords, <one per category>, deduction`.
/// Category columns hold the count, `0` when the category did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRow {
    cells: Vec<String>,
}

impl ClassificationRow {
    #[must_use]
    pub fn header<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
        let mut header = Vec::with_capacity(categories.len() + 3);
        header.push("url".to_string());
        header.push("matched_keywords".to_string());
        header.extend(categories.iter().map(|c| c.as_ref().to_string()));
        header.push("deduction".to_string());
        header
    }

    #[must_use]
    pub fn from_result<S: AsRef<str>>(result: &ClassificationResult, categories: &[S]) -> Self {
        let mut cells = Vec::with_capacity(categories.len() + 3);
        cells.push(result.url.clone());
        cells.push(result.matched_keywords.join(LIST_SEPARATOR));
        cells.extend(
            categories
                .iter()
                .map(|code| result.count(code.as_ref()).to_string()),
        );
        cells.push(result.deduction.join(LIST_SEPARATOR));
        Self { cells }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.cells.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    #[must_use]
    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}
