use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A keyword could not be compiled into a matcher (size limits only;
    /// keywords are always escaped).
    #[error("cannot build matcher for keyword '{keyword}' in category '{category}': {source}")]
    Pattern {
        category: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },

    /// A lexicon row was malformed.
    #[error("invalid lexicon entry: {0}")]
    Lexicon(String),
}
