//! Keyword classification configuration.

use mw_classify::taxonomy::default_categories;
use serde::{Deserialize, Serialize};

fn default_url_column() -> String {
    "url".into()
}

fn default_text_column() -> String {
    "text".into()
}

const fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifyConfig {
    /// Category columns of the output, in order.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Input column holding the URL.
    #[serde(default = "default_url_column")]
    pub url_column: String,

    /// Input column holding page text; optional in the file.
    #[serde(default = "default_text_column")]
    pub text_column: String,

    /// Classify URLs on all cores.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            url_column: default_url_column(),
            text_column: default_text_column(),
            parallel: default_parallel(),
        }
    }
}
