use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A unit of retrieved content plus its key/value metadata.
///
/// Metadata values are normally JSON strings or `null`; the `example` and
/// `answer` keys feed the context block handed to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub score: f64,
}

impl Document {
    /// Constructs a new `Document` with the given page content, empty
    /// metadata and a score of 0.
    pub fn new<S: Into<String>>(page_content: S) -> Self {
        Document {
            page_content: page_content.into(),
            metadata: HashMap::new(),
            score: 0.0,
        }
    }

    /// Sets the metadata of the document.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets a single metadata entry.
    pub fn with_metadata_entry<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Sets the relevance score of the document.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Returns the metadata value under `key` as text, treating a missing key
    /// and an explicit `null` the same way.
    pub fn metadata_text(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new("")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_document_builders() {
        let doc = Document::new("content")
            .with_metadata_entry("example", "print('hi')")
            .with_score(0.5);

        assert_eq!(doc.page_content, "content");
        assert_eq!(doc.metadata.get("example"), Some(&json!("print('hi')")));
        assert_eq!(doc.score, 0.5);
    }

    #[test]
    fn test_metadata_text_treats_null_as_missing() {
        let doc = Document::new("x")
            .with_metadata_entry("example", Value::Null)
            .with_metadata_entry("answer", "use a list")
            .with_metadata_entry("votes", 3);

        assert_eq!(doc.metadata_text("example"), None);
        assert_eq!(doc.metadata_text("missing"), None);
        assert_eq!(doc.metadata_text("answer").as_deref(), Some("use a list"));
        assert_eq!(doc.metadata_text("votes").as_deref(), Some("3"));
    }

    #[test]
    fn test_document_deserializes_without_score() {
        let doc: Document =
            serde_json::from_value(json!({"page_content": "x", "metadata": {"answer": null}}))
                .unwrap();
        assert_eq!(doc.score, 0.0);
        assert_eq!(doc.metadata.get("answer"), Some(&Value::Null));
    }
}
