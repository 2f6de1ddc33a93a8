//! Default category taxonomy.
//!
//! The 31 category codes of the Citizen Lab test lists, lower-cased the way
//! lexicon codes are. This fixes the column order of classification output
//! unless configuration supplies another list.

pub const DEFAULT_CATEGORY_CODES: [&str; 31] = [
    "aldr", "rel", "porn", "prov", "polr", "humr", "env", "milx", "hate", "news", "xed", "pubh",
    "gmb", "anon", "date", "grp", "lgbt", "file", "hack", "comt", "mmed", "host", "srch", "game",
    "cultr", "econ", "govt", "comm", "ctrl", "igo", "misc",
];

#[must_use]
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORY_CODES
        .iter()
        .map(ToString::to_string)
        .collect()
}
