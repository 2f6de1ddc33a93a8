//! Blocked-status policies.
//!
//! Each measurement source encodes "blocked" its own way: the DNS dig tables
//! write `Sí` in a `Bloqueado` column, the web-connectivity tables write a
//! boolean-ish `accessible` column where `False`/`0`/`no` means unreachable.
//! A [`BlockedPolicy`] names the encoding for one table.
//!
//! The reserved [`SENTINEL_STATUS`] is never blocked under any policy, which
//! keeps consensus marking convergent: rows already rewritten drop out of
//! subsequent consensus runs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::CellValue;

/// Status written over rows blocked in every source of a batch.
pub const SENTINEL_STATUS: &str = "NOACCESIBLEPORMETODO";

/// Whether a cell holds the sentinel status.
#[must_use]
pub fn is_sentinel(value: &CellValue, sentinel: &str) -> bool {
    value
        .as_text()
        .is_some_and(|text| text.trim() == sentinel)
}

/// How a table encodes "currently reported blocked".
///
/// ```text
/// equals   { value = "Sí" }            exact string match (after trimming the cell)
/// one_of   { values = ["sí", "si"] }   case-insensitive membership
/// false_like                            boolean false, or "false" / "0" / "no"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockedPolicy {
    Equals { value: String },
    OneOf { values: Vec<String> },
    FalseLike,
}

impl BlockedPolicy {
    /// Evaluate the policy against a raw status cell.
    ///
    /// Unrecognized values are not blocked. The `sentinel` is never blocked.
    #[must_use]
    pub fn is_blocked(&self, value: &CellValue, sentinel: &str) -> bool {
        !is_sentinel(value, sentinel) && self.matches(value)
    }

    /// The bare encoding test, without the sentinel guard.
    #[must_use]
    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            Self::Equals { value: expected } => match value {
                CellValue::Text(text) => text.trim() == expected.as_str(),
                CellValue::Empty => false,
                other => other.to_field() == expected.as_str(),
            },
            Self::OneOf { values } => {
                let field = value.to_field();
                let field = field.trim();
                !field.is_empty() && values.iter().any(|v| v.eq_ignore_ascii_case(field))
            }
            Self::FalseLike => match value {
                CellValue::Bool(b) => !b,
                CellValue::Int(i) => *i == 0,
                CellValue::Float(_) | CellValue::Empty => false,
                CellValue::Text(text) => {
                    matches!(text.trim().to_lowercase().as_str(), "false" | "0" | "no")
                }
            },
        }
    }

    #[must_use]
    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals {
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals { .. } => "equals",
            Self::OneOf { .. } => "one_of",
            Self::FalseLike => "false_like",
        }
    }
}

impl fmt::Display for BlockedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { value } => write!(f, "equals({value})"),
            Self::OneOf { values } => write!(f, "one_of({})", values.join("|")),
            Self::FalseLike => f.write_str(self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CellValue::from("Sí"), true)]
    #[case(CellValue::from(" Sí "), true)]
    #[case(CellValue::from("No"), false)]
    #[case(CellValue::from("si"), false)]
    #[case(CellValue::Empty, false)]
    #[case(CellValue::from(SENTINEL_STATUS), false)]
    fn equals_policy(#[case] value: CellValue, #[case] blocked: bool) {
        let policy = BlockedPolicy::equals("Sí");
        assert_eq!(policy.is_blocked(&value, SENTINEL_STATUS), blocked);
    }

    #[rstest]
    #[case(CellValue::Bool(false), true)]
    #[case(CellValue::Bool(true), false)]
    #[case(CellValue::from("False"), true)]
    #[case(CellValue::from("0"), true)]
    #[case(CellValue::from("NO"), true)]
    #[case(CellValue::Int(0), true)]
    #[case(CellValue::from("True"), false)]
    #[case(CellValue::from("maybe"), false)]
    #[case(CellValue::Empty, false)]
    #[case(CellValue::from(SENTINEL_STATUS), false)]
    fn false_like_policy(#[case] value: CellValue, #[case] blocked: bool) {
        assert_eq!(
            BlockedPolicy::FalseLike.is_blocked(&value, SENTINEL_STATUS),
            blocked
        );
    }

    #[test]
    fn one_of_is_case_insensitive() {
        let policy = BlockedPolicy::OneOf {
            values: vec!["sí".into(), "si".into(), "yes".into()],
        };
        assert!(policy.is_blocked(&CellValue::from("YES"), SENTINEL_STATUS));
        assert!(policy.is_blocked(&CellValue::from("Si"), SENTINEL_STATUS));
        assert!(!policy.is_blocked(&CellValue::from("no"), SENTINEL_STATUS));
        assert!(!policy.is_blocked(&CellValue::Empty, SENTINEL_STATUS));
    }

    #[test]
    fn sentinel_is_never_blocked_even_when_policy_names_it() {
        let policy = BlockedPolicy::equals(SENTINEL_STATUS);
        assert!(policy.matches(&CellValue::from(SENTINEL_STATUS)));
        assert!(!policy.is_blocked(&CellValue::from(SENTINEL_STATUS), SENTINEL_STATUS));
    }

    #[test]
    fn policy_serialized_shape() {
        let policy: BlockedPolicy =
            serde_json::from_str(r#"{"kind":"equals","value":"Sí"}"#).expect("parse");
        assert_eq!(policy, BlockedPolicy::equals("Sí"));
        let policy: BlockedPolicy =
            serde_json::from_str(r#"{"kind":"false_like"}"#).expect("parse");
        assert_eq!(policy, BlockedPolicy::FalseLike);
    }
}
