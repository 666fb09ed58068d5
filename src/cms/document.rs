//! Wire types for the CMS paged-results envelope
//!
//! These shapes are dictated by the remote API. `Document::data` stays an
//! opaque JSON value until the content mapper projects it into the internal
//! post shape.

use serde::{Deserialize, Serialize};

/// A raw document record as returned by the CMS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// CMS-internal document id
    #[serde(default)]
    pub id: String,

    /// URL-friendly unique name, used as the post slug
    #[serde(default)]
    pub uid: Option<String>,

    /// Document type
    #[serde(default, rename = "type")]
    pub doc_type: String,

    /// First publication date (ISO 8601), if published
    #[serde(default)]
    pub first_publication_date: Option<String>,

    /// Type-specific payload, opaque until mapped
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Paged-results envelope returned by search queries and cursor fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Current page number (1-based)
    #[serde(default)]
    pub page: usize,

    /// Documents on this page, in remote order
    #[serde(default)]
    pub results: Vec<Document>,

    /// Total number of pages
    #[serde(default)]
    pub total_pages: usize,

    /// Total number of matching documents
    #[serde(default)]
    pub total_results_size: usize,

    /// Opaque, directly fetchable URL of the next page; `None` is terminal
    #[serde(default)]
    pub next_page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope() {
        let json = r#"{
            "page": 1,
            "results_per_page": 2,
            "total_results_size": 3,
            "total_pages": 2,
            "next_page": "https://cms.example.com/search?page=2",
            "prev_page": null,
            "results": [
                {
                    "id": "X1",
                    "uid": "first-post",
                    "type": "posts",
                    "first_publication_date": "2021-03-15T10:00:00+0000",
                    "data": {"title": "First post"}
                }
            ]
        }"#;

        let envelope: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.page, 1);
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.results[0].uid.as_deref(), Some("first-post"));
        assert_eq!(
            envelope.next_page.as_deref(),
            Some("https://cms.example.com/search?page=2")
        );
    }

    #[test]
    fn test_parse_terminal_envelope() {
        let json = r#"{"page": 2, "results": [], "next_page": null}"#;
        let envelope: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(envelope.next_page.is_none());
        assert!(envelope.results.is_empty());
    }
}
