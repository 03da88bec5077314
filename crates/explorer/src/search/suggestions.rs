use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use standings::dto::SearchResult;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").expect("tag pattern is valid");
    static ref SPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

pub fn strip_html(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

fn normalize(text: &str) -> String {
    SPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// One quick-search dropdown entry. `render` keeps the highlighting markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub render: String,
}

/// Collapses results whose plain headline is the same. The first occurrence
/// wins and the original order is kept.
pub fn dedup_suggestions<'a, I>(results: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a SearchResult>,
{
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter_map(|result| {
            let plain = if result.headline_plain.trim().is_empty() {
                strip_html(&result.headline)
            } else {
                result.headline_plain.clone()
            };
            let label = normalize(&plain);
            if !seen.insert(label.clone()) {
                return None;
            }
            Some(Suggestion {
                label,
                render: result.headline.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(headline: &str, plain: &str) -> SearchResult {
        serde_json::from_value(json!({
            "query_result_type": "Athlete",
            "query_result": {"reference_id": "a1"},
            "query_result_headline": headline,
            "query_result_headline_no_html": plain
        }))
        .unwrap()
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let results = vec![
            result("<b>Jane</b> Doe wins gold", "Jane Doe wins gold"),
            result("Jane <b>Doe</b> wins gold", "Jane Doe wins gold"),
            result("<b>John</b> Smith", "John Smith"),
        ];

        let labels: Vec<_> = dedup_suggestions(&results)
            .into_iter()
            .map(|s| s.label)
            .collect();

        assert_eq!(labels, vec!["Jane Doe wins gold", "John Smith"]);
    }

    #[test]
    fn test_first_occurrence_keeps_its_markup() {
        let results = vec![
            result("<b>Jane</b> Doe", "Jane Doe"),
            result("Jane <b>Doe</b>", "Jane  Doe "),
        ];

        let suggestions = dedup_suggestions(&results);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].render, "<b>Jane</b> Doe");
    }

    #[test]
    fn test_missing_plain_headline_is_derived() {
        let results = vec![result("<b>State</b> Open 2022", "")];

        assert_eq!(dedup_suggestions(&results)[0].label, "State Open 2022");
        assert_eq!(strip_html("<em>a</em> <b>b</b>"), "a b");
    }

    #[test]
    fn test_blank_headline_is_kept_once() {
        let results = vec![
            result("", ""),
            result("<b>John</b> Smith", "John Smith"),
            result("<b></b>", " "),
        ];

        let labels: Vec<_> = dedup_suggestions(&results)
            .into_iter()
            .map(|s| s.label)
            .collect();

        assert_eq!(labels, vec!["", "John Smith"]);
    }
}
