//! Heterogeneous cell values.
//!
//! Measurement tables mix strings, booleans, and numbers in the same status
//! column depending on the source. CSV input is kept as text so a table
//! written back reproduces its original cells; JSON or hand-built tables may
//! carry typed values.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Build a value from a raw CSV field. Empty fields become [`CellValue::Empty`].
    #[must_use]
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Self::Empty
        } else {
            Self::Text(field.to_string())
        }
    }

    /// Text form used for matching and for writing back to CSV.
    ///
    /// `Empty` renders as the empty string; booleans render as `true`/`false`.
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Text(v) => v.clone(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// `true` for `Empty` and for text that is only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(v) => v.trim().is_empty(),
            _ => false,
        }
    }

    /// Whether this cell holds exactly the given text.
    #[must_use]
    pub fn is_text(&self, expected: &str) -> bool {
        self.as_text().is_some_and(|v| v == expected)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
