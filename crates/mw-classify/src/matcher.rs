use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::deduce::deduce;
use crate::error::ClassifyError;
use crate::lexicon::CategoryLexicon;

/// Keyword evidence for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub url: String,
    /// Category code → total matches; categories without matches are absent.
    pub counts: IndexMap<String, usize>,
    /// Matched keywords in discovery order, once per category matched under.
    pub matched_keywords: Vec<String>,
    pub deduction: Vec<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn count(&self, code: &str) -> usize {
        self.counts.get(code).copied().unwrap_or(0)
    }
}

#[derive(Debug)]
struct KeywordMatcher {
    keyword: String,
    whole_word: Regex,
    substring: Regex,
}

impl KeywordMatcher {
    fn new(category: &str, keyword: &str) -> Result<Self, ClassifyError> {
        let escaped = regex::escape(keyword);
        let build = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ClassifyError::Pattern {
                    category: category.to_string(),
                    keyword: keyword.to_string(),
                    source,
                })
        };

        Ok(Self {
            keyword: keyword.to_string(),
            whole_word: build(&format!(r"\b{escaped}\b"))?,
            substring: build(&escaped)?,
        })
    }

    /// Whole-word hits in `text` plus substring hits in `url`.
    fn count(&self, text: &str, url: &str) -> usize {
        self.whole_word.find_iter(text).count() + self.substring.find_iter(url).count()
    }
}

#[derive(Debug)]
struct CategoryMatcher {
    code: String,
    keywords: Vec<KeywordMatcher>,
}

/// A lexicon compiled into matchers, reusable across many URLs.
#[derive(Debug)]
pub struct Classifier {
    categories: Vec<CategoryMatcher>,
}

impl Classifier {
    /// Compile every keyword of `lexicon`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Pattern`] if a keyword exceeds regex size limits.
    pub fn new(lexicon: &CategoryLexicon) -> Result<Self, ClassifyError> {
        let categories = lexicon
            .iter()
            .map(|(code, keywords)| {
                let keywords = keywords
                    .iter()
                    .map(|keyword| KeywordMatcher::new(code, keyword))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CategoryMatcher {
                    code: code.to_string(),
                    keywords,
                })
            })
            .collect::<Result<Vec<_>, ClassifyError>>()?;

        Ok(Self { categories })
    }

    /// Count keyword evidence in `text` and `url` and deduce categories.
    #[must_use]
    pub fn classify(&self, text: &str, url: &str) -> ClassificationResult {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        let mut matched_keywords = Vec::new();

        for category in &self.categories {
            for keyword in &category.keywords {
                let hits = keyword.count(text, url);
                if hits > 0 {
                    *counts.entry(category.code.clone()).or_insert(0) += hits;
                    matched_keywords.push(keyword.keyword.clone());
                }
            }
        }

        let deduction = deduce(&counts);
        ClassificationResult {
            url: url.to_string(),
            counts,
            matched_keywords,
            deduction,
        }
    }
}

/// One-shot classification. Prefer [`Classifier`] when classifying many URLs.
///
/// # Errors
///
/// See [`Classifier::new`].
pub fn classify(
    text: &str,
    url: &str,
    lexicon: &CategoryLexicon,
) -> Result<ClassificationResult, ClassifyError> {
    Ok(Classifier::new(lexicon)?.classify(text, url))
}
