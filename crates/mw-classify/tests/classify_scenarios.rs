//! Classification of whole pages against a small lexicon.

use mw_classify::taxonomy::DEFAULT_CATEGORY_CODES;
use mw_classify::{CategoryLexicon, ClassificationRow, Classifier, classify};
use pretty_assertions::assert_eq;

fn gambling_and_news() -> CategoryLexicon {
    CategoryLexicon::from_pairs([("GMB", &["casino", "betting"][..]), ("NEWS", &["news"][..])])
        .expect("lexicon")
}

#[test]
fn casino_page_is_gambling() {
    let result = classify(
        "visit this casino and betting site",
        "http://example-casino.com",
        &gambling_and_news(),
    )
    .expect("classify");

    assert_eq!(result.count("gmb"), 3);
    assert_eq!(result.count("news"), 0);
    assert_eq!(result.matched_keywords, vec!["casino", "betting"]);
    assert_eq!(result.deduction, vec!["gmb"]);
}

#[test]
fn news_and_gambling_tie() {
    let result = classify(
        "news about the casino",
        "https://example.org",
        &gambling_and_news(),
    )
    .expect("classify");

    assert_eq!(result.deduction, vec!["gmb", "news"]);
}

#[test]
fn unique_maximum_keeps_the_runner_up() {
    let result = classify(
        "casino casino betting, news",
        "https://example.org",
        &gambling_and_news(),
    )
    .expect("classify");

    assert_eq!(result.count("gmb"), 3);
    assert_eq!(result.deduction, vec!["gmb", "news"]);
}

#[test]
fn rows_use_the_default_taxonomy() {
    let classifier = Classifier::new(&gambling_and_news()).expect("classifier");
    let result = classifier.classify("betting tips", "https://tips.example");

    let header = ClassificationRow::header(&DEFAULT_CATEGORY_CODES);
    let row = ClassificationRow::from_result(&result, &DEFAULT_CATEGORY_CODES);

    assert_eq!(header.len(), 34);
    assert_eq!(row.cells().len(), header.len());
    let gmb = header.iter().position(|c| c == "gmb").expect("gmb column");
    assert_eq!(row.cells()[gmb], "1");
    assert_eq!(row.cells().last().map(String::as_str), Some("gmb"));
}
