//! Result type definitions

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A normalized search result
///
/// Records are created from one raw hit and only change once, when the
/// fetched page text is attached with [`SearchRecord::set_content`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Title with markup removed
    pub title: String,
    /// Publication date, Unix epoch when unknown
    pub date: NaiveDateTime,
    /// Result URL
    pub url: String,
    /// Normalized snippet
    pub snippet: String,
    /// Normalized page text, once fetched
    pub content: Option<String>,
}

impl SearchRecord {
    /// Create a record without content
    pub fn new(title: String, date: NaiveDateTime, url: String, snippet: String) -> Self {
        Self {
            title,
            date,
            url,
            snippet,
            content: None,
        }
    }

    /// Attach fetched page content
    pub fn set_content(&mut self, content: String) {
        self.content = Some(content);
    }

    /// Whether page content was fetched and is non-empty
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_content() {
        let mut record = SearchRecord::new(
            "title".to_string(),
            NaiveDateTime::default(),
            "https://example.com".to_string(),
            String::new(),
        );
        assert!(!record.has_content());

        record.set_content(String::new());
        assert_eq!(record.content.as_deref(), Some(""));
        assert!(!record.has_content());

        record.set_content("body".to_string());
        assert!(record.has_content());
    }

    #[test]
    fn test_serializes_date() {
        let record = SearchRecord::new(
            "t".to_string(),
            NaiveDateTime::default(),
            "u".to_string(),
            "s".to_string(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "1970-01-01T00:00:00");
        assert!(json["content"].is_null());
    }
}
