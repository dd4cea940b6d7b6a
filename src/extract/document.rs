use serde::Serialize;

/// Text found inside one structural tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedText {
    /// Lower-case tag name ("h1", "p", ...)
    pub tag: String,
    pub text: String,
}

/// Sentiment of the tag text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    /// -1.0 (negative) ..= 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) ..= 1.0 (subjective)
    pub subjectivity: f64,
}

/// Everything extracted from one page
///
/// Field order matches the JSON artifact.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DocumentRecord {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub og_description: Option<String>,
    pub json_ld: Vec<serde_json::Value>,
    pub tags: Vec<TaggedText>,
    pub keywords: Vec<String>,
    pub sentiment: Option<Sentiment>,
    pub raw_html: String,
}

impl DocumentRecord {
    /// Returns true if the page carries any salient content
    ///
    /// Keywords and sentiment are derived from the tag text, so they never
    /// make a page useful on their own.
    pub fn is_useful(&self) -> bool {
        self.title.is_some()
            || self.meta_description.is_some()
            || self.og_description.is_some()
            || !self.json_ld.is_empty()
            || !self.tags.is_empty()
    }

    /// Renders the summary text artifact, one `[label] value` line per item
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            lines.push(format!("[title] {}", title));
        }
        if let Some(description) = &self.meta_description {
            lines.push(format!("[meta description] {}", description));
        }
        if let Some(description) = &self.og_description {
            lines.push(format!("[og:description] {}", description));
        }
        for block in &self.json_ld {
            let pretty = serde_json::to_string_pretty(block).unwrap_or_else(|_| block.to_string());
            lines.push(format!("[json-ld] {}", pretty));
        }
        for tagged in &self.tags {
            lines.push(format!("[{}] {}", tagged.tag, tagged.text));
        }
        if !self.keywords.is_empty() {
            lines.push(format!("[keywords] {}", self.keywords.join(", ")));
        }
        if let Some(sentiment) = &self.sentiment {
            lines.push(format!(
                "[sentiment] polarity={:.2}, subjectivity={:.2}",
                sentiment.polarity, sentiment.subjectivity
            ));
        }

        lines
    }
}
