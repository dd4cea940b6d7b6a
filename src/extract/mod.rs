//! Content extraction from fetched HTML
//!
//! This module turns the root page of a reachable domain into a
//! [`DocumentRecord`]:
//! - Title, meta description and Open Graph description
//! - JSON-LD structured data blocks
//! - Text of structural tags (h1-h6 and p unless an allow-list is given)
//! - Keywords and a lexicon-based sentiment score over the tag text
//!
//! Extraction never fails. Malformed markup is handled by html5ever's error
//! recovery and unparseable JSON-LD blocks are dropped.

mod document;
mod keywords;
mod parser;
mod sentiment;

pub use document::{DocumentRecord, Sentiment, TaggedText};
pub use keywords::{extract_keywords, MAX_KEYWORDS};
pub use parser::{HtmlExtractor, DEFAULT_TAGS};
pub use sentiment::score_sentiment;

/// Turns fetched HTML into a document record
///
/// Implementations must be pure: the same input yields the same record.
pub trait Extractor: Send + Sync {
    /// Extracts salient content from `html`
    ///
    /// `tag_allowlist` restricts which structural tags are collected;
    /// `None` means the default set.
    fn extract(&self, html: &str, tag_allowlist: Option<&[String]>) -> DocumentRecord;
}
