//! Japanese→Korean tag mapping

use serde::{Deserialize, Serialize};

use super::de::null_as_default;

/// One row of the translation table, keyed by `tag_jp`.
///
/// `priority` is `None` when the user typed something that is not an
/// integer; it goes over the wire as `null` rather than being corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_jp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_kr: String,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl Tag {
    pub fn new(tag_jp: impl Into<String>, tag_kr: impl Into<String>, priority: Option<i64>) -> Self {
        Self {
            tag_jp: tag_jp.into(),
            tag_kr: tag_kr.into(),
            priority,
        }
    }

    /// Case-insensitive substring match over both languages.
    /// `query` must already be lowercase.
    pub fn matches_query(&self, query: &str) -> bool {
        self.tag_jp.to_lowercase().contains(query) || self.tag_kr.to_lowercase().contains(query)
    }

    /// Both sides of the mapping are present
    pub fn is_complete(&self) -> bool {
        !self.tag_jp.is_empty() && !self.tag_kr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_priority_serializes_as_null() {
        let tag = Tag::new("新作", "신작", None);
        let json = serde_json::to_value(&tag).unwrap();
        assert!(json["priority"].is_null());
        assert_eq!(json["tag_jp"], "新作");
    }

    #[test]
    fn test_missing_fields_default() {
        let tag: Tag = serde_json::from_str(r#"{"tag_jp":"x","tag_kr":null}"#).unwrap();
        assert_eq!(tag.tag_kr, "");
        assert_eq!(tag.priority, None);
        assert!(!tag.is_complete());
    }

    #[test]
    fn test_matches_query_both_languages() {
        let tag = Tag::new("新作", "신작", Some(5));
        assert!(tag.matches_query("신"));
        assert!(tag.matches_query("新"));
        assert!(!tag.matches_query("xyz"));
    }
}
