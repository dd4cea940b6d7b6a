//! HTML parser for extracting salient page content

use crate::extract::document::{DocumentRecord, TaggedText};
use crate::extract::keywords::extract_keywords;
use crate::extract::sentiment::score_sentiment;
use crate::extract::Extractor;
use scraper::{ElementRef, Html, Selector};

/// Structural tags collected when no allow-list is given
pub const DEFAULT_TAGS: [&str; 7] = ["h1", "h2", "h3", "h4", "h5", "h6", "p"];

/// scraper-based extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for HtmlExtractor {
    /// Parses HTML content and extracts salient content
    ///
    /// # Example
    ///
    /// ```
    /// use domain_sweep::extract::{Extractor, HtmlExtractor};
    ///
    /// let html = r#"<html><head><title>Test</title></head><body><p>Hello</p></body></html>"#;
    /// let record = HtmlExtractor::new().extract(html, None);
    /// assert_eq!(record.title, Some("Test".to_string()));
    /// assert_eq!(record.tags.len(), 1);
    /// ```
    fn extract(&self, html: &str, tag_allowlist: Option<&[String]>) -> DocumentRecord {
        let document = Html::parse_document(html);

        let tags = extract_tagged_text(&document, tag_allowlist);
        let all_text = tags
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let (keywords, sentiment) = if all_text.is_empty() {
            (Vec::new(), None)
        } else {
            (extract_keywords(&all_text), Some(score_sentiment(&all_text)))
        };

        DocumentRecord {
            url: String::new(),
            title: extract_title(&document),
            meta_description: extract_meta_content(&document, "meta[name=\"description\"]"),
            og_description: extract_meta_content(&document, "meta[property=\"og:description\"]"),
            json_ld: extract_json_ld(&document),
            tags,
            keywords,
            sentiment,
            raw_html: html.to_string(),
        }
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Returns the trimmed `content` attribute of the first element matching `selector`
fn extract_meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses every JSON-LD block, silently skipping the ones that are not valid JSON
fn extract_json_ld(document: &Html) -> Vec<serde_json::Value> {
    let Ok(selector) = Selector::parse("script[type=\"application/ld+json\"]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let raw = element.text().collect::<String>();
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Dropping unparseable JSON-LD block: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Collects the text of every allowed tag in document order
fn extract_tagged_text(document: &Html, tag_allowlist: Option<&[String]>) -> Vec<TaggedText> {
    let names: Vec<String> = match tag_allowlist {
        Some(tags) => tags
            .iter()
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_alphanumeric()))
            .collect(),
        None => DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
    };

    if names.is_empty() {
        return Vec::new();
    }

    let Ok(selector) = Selector::parse(&names.join(", ")) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let text = stripped_text(&element);
            if text.is_empty() {
                None
            } else {
                Some(TaggedText {
                    tag: element.value().name().to_string(),
                    text,
                })
            }
        })
        .collect()
}

/// Concatenates the element's text nodes, each trimmed, blanks skipped
fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> DocumentRecord {
        HtmlExtractor::new().extract(html, None)
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let record = extract(r#"<html><head><title>  Test Page  </title></head></html>"#);
        assert_eq!(record.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_empty_title_is_none() {
        let record = extract(r#"<html><head><title>   </title></head></html>"#);
        assert_eq!(record.title, None);
    }

    #[test]
    fn test_meta_and_og_description() {
        let html = r#"<html><head>
            <meta name="description" content=" Public broadcaster ">
            <meta property="og:description" content="News and more">
        </head></html>"#;
        let record = extract(html);
        assert_eq!(
            record.meta_description,
            Some("Public broadcaster".to_string())
        );
        assert_eq!(record.og_description, Some("News and more".to_string()));
    }

    #[test]
    fn test_meta_without_content_is_none() {
        let record = extract(r#"<html><head><meta name="description"></head></html>"#);
        assert_eq!(record.meta_description, None);
    }

    #[test]
    fn test_json_ld_valid_and_invalid() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type": "Organization", "name": "NRK"}</script>
            <script type="application/ld+json">{ not json</script>
        </head></html>"#;
        let record = extract(html);
        assert_eq!(record.json_ld.len(), 1);
        assert_eq!(record.json_ld[0]["name"], "NRK");
    }

    #[test]
    fn test_default_tags_in_document_order() {
        let html = r#"<html><body>
            <h2>Second level</h2>
            <p>First <b>bold</b> paragraph</p>
            <h1>Top</h1>
            <div>ignored</div>
            <p>   </p>
        </body></html>"#;
        let record = extract(html);
        let tags: Vec<_> = record
            .tags
            .iter()
            .map(|t| (t.tag.as_str(), t.text.as_str()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("h2", "Second level"),
                ("p", "Firstboldparagraph"),
                ("h1", "Top"),
            ]
        );
    }

    #[test]
    fn test_tag_allowlist() {
        let html = r#"<html><body><h1>Head</h1><p>Para</p><li>Item</li></body></html>"#;
        let allow = vec!["LI".to_string(), "h1".to_string()];
        let record = HtmlExtractor::new().extract(html, Some(&allow));
        let tags: Vec<_> = record.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["h1", "li"]);
    }

    #[test]
    fn test_invalid_allowlist_entries_ignored() {
        let html = r#"<html><body><p>Para</p></body></html>"#;
        let allow = vec!["div > p".to_string()];
        let record = HtmlExtractor::new().extract(html, Some(&allow));
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_keywords_and_sentiment_need_text() {
        let record = extract(r#"<html><head><title>Only title</title></head></html>"#);
        assert!(record.keywords.is_empty());
        assert!(record.sentiment.is_none());

        let record = extract(r#"<p>great great news today</p>"#);
        assert_eq!(record.keywords[0], "great");
        assert!(record.sentiment.is_some());
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let record = extract("<html><head><title>Broken<body><p>text</div></span>");
        assert!(record.is_useful());
    }

    #[test]
    fn test_no_salient_content() {
        let record = extract("<html><body><div>just a div</div><img src=x></body></html>");
        assert!(!record.is_useful());
    }

    #[test]
    fn test_raw_html_preserved() {
        let html = "<html><p>x</p></html>";
        assert_eq!(extract(html).raw_html, html);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<html><head><title>Fixture</title>
            <meta name="description" content="desc">
            <script type="application/ld+json">{"a": [1, 2]}</script></head>
            <body><h1>Great day</h1><p>Terrible weather but lovely people</p></body></html>"#;
        assert_eq!(extract(html), extract(html));
    }
}
