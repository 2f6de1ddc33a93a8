use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClassifyError;

/// Category code → keywords, in insertion order.
///
/// Codes and keywords are trimmed and lower-cased on insertion. Empty
/// keywords (from trailing commas) are dropped and repeated keywords within
/// one category collapse. Inserting an existing code replaces its keywords but
/// keeps the code's original position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLexicon {
    categories: IndexMap<String, Vec<String>>,
}

impl CategoryLexicon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category with its keywords.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Lexicon`] if the code is blank.
    pub fn insert<I, S>(&mut self, code: &str, keywords: I) -> Result<(), ClassifyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return Err(ClassifyError::Lexicon("empty category code".into()));
        }

        let mut folded: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !folded.contains(&keyword) {
                folded.push(keyword);
            }
        }

        if self.categories.insert(code.clone(), folded).is_some() {
            debug!(category = %code, "category listed twice; later keywords win");
        }
        Ok(())
    }

    /// Insert a category whose keywords come as one comma-separated list,
    /// the shape of the two-column lexicon file.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Lexicon`] if the code is blank.
    pub fn insert_list(&mut self, code: &str, keyword_list: &str) -> Result<(), ClassifyError> {
        self.insert(code, keyword_list.split(','))
    }

    /// Build a lexicon from `(code, keywords)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Lexicon`] if any code is blank.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ClassifyError>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let mut lexicon = Self::new();
        for (code, keywords) in pairs {
            lexicon.insert(code, keywords.iter())?;
        }
        Ok(lexicon)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(code, keywords)| (code.as_str(), keywords.as_slice()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn keywords(&self, code: &str) -> Option<&[String]> {
        self.categories
            .get(&code.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keyword_lists_are_folded_and_cleaned() {
        let mut lexicon = CategoryLexicon::new();
        lexicon
            .insert_list(" GMB ", "Casino, betting,, CASINO , Poker ,")
            .expect("insert");
        assert_eq!(
            lexicon.keywords("gmb").expect("category"),
            &["casino".to_string(), "betting".into(), "poker".into()]
        );
    }

    #[test]
    fn repeated_code_replaces_keywords_in_place() {
        let mut lexicon = CategoryLexicon::new();
        lexicon.insert_list("news", "news").expect("insert");
        lexicon.insert_list("gmb", "casino").expect("insert");
        lexicon.insert_list("NEWS", "diario, prensa").expect("insert");

        assert_eq!(lexicon.codes().collect::<Vec<_>>(), vec!["news", "gmb"]);
        assert_eq!(
            lexicon.keywords("news").expect("category"),
            &["diario".to_string(), "prensa".into()]
        );
    }

    #[test]
    fn blank_code_is_rejected() {
        let mut lexicon = CategoryLexicon::new();
        assert!(lexicon.insert_list("  ", "x").is_err());
        assert!(lexicon.is_empty());
    }

    #[test]
    fn category_without_keywords_is_kept() {
        let lexicon =
            CategoryLexicon::from_pairs([("misc", &[][..]), ("gmb", &["casino"][..])])
                .expect("lexicon");
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.keywords("misc"), Some(&[][..]));
    }
}
