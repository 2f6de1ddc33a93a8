use indexmap::IndexMap;

/// Deduce the likely categories from per-category totals.
///
/// ```text
/// {}                    -> []
/// {a: 5, b: 5, c: 2}    -> [a, b]   every category tied at the maximum
/// {a: 5, b: 2, c: 1}    -> [a, b]   unique maximum: top two
/// {a: 5}                -> [a]
/// ```
///
/// Ranking is by count descending and stable, so ties keep the order of
/// `counts` (lexicon order). Returning a second category under a unique
/// maximum is long-standing behaviour of the classification reports and is
/// kept as is.
#[must_use]
pub fn deduce(counts: &IndexMap<String, usize>) -> Vec<String> {
    let mut ranked: Vec<(&String, usize)> = counts.iter().map(|(c, n)| (c, *n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let Some(&(_, max)) = ranked.first() else {
        return Vec::new();
    };

    let tied: Vec<String> = ranked
        .iter()
        .take_while(|(_, n)| *n == max)
        .map(|(code, _)| (*code).clone())
        .collect();
    if tied.len() >= 2 {
        return tied;
    }

    ranked
        .iter()
        .take(2)
        .map(|(code, _)| (*code).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn counts(pairs: &[(&str, usize)]) -> IndexMap<String, usize> {
        pairs.iter().map(|(c, n)| ((*c).to_string(), *n)).collect()
    }

    #[rstest]
    #[case(&[], &[])]
    #[case(&[("a", 5), ("b", 5), ("c", 2)], &["a", "b"])]
    #[case(&[("a", 5), ("b", 2)], &["a", "b"])]
    #[case(&[("a", 5)], &["a"])]
    #[case(&[("a", 2), ("b", 5), ("c", 5)], &["b", "c"])]
    #[case(&[("c", 1), ("a", 9), ("b", 3)], &["a", "b"])]
    #[case(&[("x", 1), ("y", 1), ("z", 1)], &["x", "y", "z"])]
    #[case(&[("a", 7), ("b", 1), ("c", 1)], &["a", "b"])]
    fn deduction_tie_policy(#[case] input: &[(&str, usize)], #[case] expected: &[&str]) {
        assert_eq!(deduce(&counts(input)), expected);
    }
}
