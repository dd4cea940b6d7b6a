use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of keywords kept per page
pub const MAX_KEYWORDS: usize = 10;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w{4,}\b").expect("static keyword pattern is valid"))
}

/// Returns the most frequent words of four or more word characters
///
/// Matching is done on the lower-cased text. Ties keep the order of first
/// appearance.
///
/// # Examples
///
/// ```
/// use domain_sweep::extract::extract_keywords;
///
/// let keywords = extract_keywords("News about news and weather");
/// assert_eq!(keywords, vec!["news", "about", "weather"]);
/// ```
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    // word -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, m) in word_pattern().find_iter(&lowered).enumerate() {
        counts
            .entry(m.as_str())
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word.to_string())
        .collect()
}
