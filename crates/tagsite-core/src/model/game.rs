//! Game record

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::{lenient_int, null_as_default, nullable, raw_value};

/// Placeholder shown when a record has neither a Korean nor a Japanese title
pub const UNTITLED: &str = "Untitled";

/// Which tag sequence of a record a chip belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLanguage {
    /// `tags_jp`
    Japanese,
    /// `tags`
    Korean,
}

/// Optional server field that remembers an explicit `null`.
///
/// `None` means the key was absent and is not sent back; `Some(None)` is
/// written back as `null`.
pub type Nullable<T> = Option<Option<T>>;

/// A game listing as stored by either catalogue.
///
/// Listing endpoints return the crawler's field names (`rj_code`, `title_kr`,
/// `title_jp`, `maker`), while the editor works on `title`, `circle` and
/// friends. Both families live side by side; fields the client does not know
/// about are kept in `extra` so a save sends back everything it received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(
        rename = "rj_code",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub platform: Nullable<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title_kr: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub title_jp: Nullable<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub circle: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub maker: Nullable<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags_jp: Vec<String>,
    /// Korean tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_tag: String,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Nullable<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub link: Nullable<String>,

    #[serde(default, deserialize_with = "raw_value", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub timestamp_str: Nullable<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn text(value: &Nullable<String>) -> Option<&str> {
    value.as_ref().and_then(Option::as_deref)
}

fn non_empty(value: &Nullable<String>) -> Option<&str> {
    text(value).filter(|s| !s.is_empty())
}

impl GameRecord {
    /// Editable record used when a code lookup comes back not-found
    pub fn blank() -> Self {
        Self::default()
    }

    /// Korean title, then Japanese title, then [`UNTITLED`]
    pub fn display_title(&self) -> &str {
        non_empty(&self.title_kr)
            .or_else(|| non_empty(&self.title_jp))
            .unwrap_or(UNTITLED)
    }

    pub fn code_str(&self) -> &str {
        text(&self.code).unwrap_or("")
    }

    pub fn maker_str(&self) -> &str {
        text(&self.maker).unwrap_or("")
    }

    pub fn title_jp_str(&self) -> &str {
        text(&self.title_jp).unwrap_or("")
    }

    /// Platform recorded on the document, if any
    pub fn platform_str(&self) -> Option<&str> {
        non_empty(&self.platform)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(&self.thumbnail_url)
    }

    /// Store page URL, if any
    pub fn link_url(&self) -> Option<&str> {
        non_empty(&self.link)
    }

    /// Human-readable last-update time.
    ///
    /// Prefers the server-formatted `timestamp_str`; numeric `timestamp`
    /// values are epoch seconds rendered in local time.
    pub fn timestamp_label(&self) -> Option<String> {
        if let Some(s) = non_empty(&self.timestamp_str) {
            return Some(s.to_string());
        }
        match self.timestamp.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => {
                let secs = n.as_f64()?;
                let dt = DateTime::from_timestamp(secs.trunc() as i64, 0)?;
                Some(
                    dt.with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                )
            }
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }

    pub fn tags_for(&self, language: TagLanguage) -> &[String] {
        match language {
            TagLanguage::Japanese => &self.tags_jp,
            TagLanguage::Korean => &self.tags,
        }
    }

    fn tags_for_mut(&mut self, language: TagLanguage) -> &mut Vec<String> {
        match language {
            TagLanguage::Japanese => &mut self.tags_jp,
            TagLanguage::Korean => &mut self.tags,
        }
    }

    /// Remove the first chip equal to `tag`. Returns false when absent.
    pub fn remove_tag(&mut self, language: TagLanguage, tag: &str) -> bool {
        let tags = self.tags_for_mut(language);
        match tags.iter().position(|t| t == tag) {
            Some(idx) => {
                tags.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match over Korean title, Japanese title
    /// and code. `query` must already be lowercase.
    pub fn matches_query(&self, query: &str) -> bool {
        [&self.title_kr, &self.title_jp, &self.code]
            .into_iter()
            .filter_map(text)
            .any(|f| f.to_lowercase().contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title_kr: Option<&str>, title_jp: Option<&str>) -> GameRecord {
        GameRecord {
            title_kr: Some(title_kr.map(str::to_string)),
            title_jp: Some(title_jp.map(str::to_string)),
            ..GameRecord::default()
        }
    }

    #[test]
    fn test_display_title_fallback_order() {
        assert_eq!(record(Some("한글"), Some("日本")).display_title(), "한글");
        assert_eq!(record(None, Some("日本")).display_title(), "日本");
        assert_eq!(record(Some(""), Some("日本")).display_title(), "日本");
        assert_eq!(record(None, None).display_title(), UNTITLED);
        assert_eq!(record(Some(""), Some("")).display_title(), UNTITLED);
    }

    #[test]
    fn test_blank_record_is_empty() {
        let blank = GameRecord::blank();
        assert!(blank.title.is_empty());
        assert!(blank.circle.is_empty());
        assert!(blank.release_date.is_empty());
        assert!(blank.description.is_empty());
        assert!(blank.primary_tag.is_empty());
        assert_eq!(blank.price, 0);
        assert!(blank.tags_jp.is_empty());
        assert!(blank.tags.is_empty());
    }

    #[test]
    fn test_blank_record_wire_shape() {
        let json = serde_json::to_value(GameRecord::blank()).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "circle",
                "description",
                "price",
                "primary_tag",
                "release_date",
                "tags",
                "tags_jp",
                "title"
            ]
        );
    }

    #[test]
    fn test_remove_tag_removes_one_and_keeps_order() {
        let mut game = GameRecord {
            tags: vec!["a".into(), "b".into(), "a".into(), "c".into()],
            ..GameRecord::default()
        };
        assert!(game.remove_tag(TagLanguage::Korean, "a"));
        assert_eq!(game.tags, vec!["b", "a", "c"]);
        assert!(!game.remove_tag(TagLanguage::Korean, "zzz"));
        assert_eq!(game.tags, vec!["b", "a", "c"]);
        assert!(game.tags_jp.is_empty());
    }

    #[test]
    fn test_lenient_deserialization() {
        let game: GameRecord = serde_json::from_str(
            r#"{"rj_code":"RJ01","title_kr":null,"price":null,"tags":null,"title":null}"#,
        )
        .unwrap();
        assert_eq!(game.code_str(), "RJ01");
        assert_eq!(game.price, 0);
        assert!(game.tags.is_empty());
        assert!(game.title.is_empty());

        let priced: GameRecord = serde_json::from_str(r#"{"price":"1320"}"#).unwrap();
        assert_eq!(priced.price, 1320);
        let float: GameRecord = serde_json::from_str(r#"{"price":990.0}"#).unwrap();
        assert_eq!(float.price, 990);
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let game: GameRecord =
            serde_json::from_str(r#"{"rj_code":"RJ9","rating":4.5,"translated":true}"#).unwrap();
        assert_eq!(game.code_str(), "RJ9");
        let back = serde_json::to_value(&game).unwrap();
        assert_eq!(back["rj_code"], "RJ9");
        assert_eq!(back["rating"], 4.5);
        assert_eq!(back["translated"], true);
    }

    #[test]
    fn test_null_fields_are_sent_back_as_null() {
        let game: GameRecord = serde_json::from_str(
            r#"{"rj_code":"RJ9","title_kr":null,"maker":null,"timestamp":null,"link":null}"#,
        )
        .unwrap();
        assert_eq!(game.display_title(), UNTITLED);
        assert_eq!(game.link_url(), None);

        let back = serde_json::to_value(&game).unwrap();
        let obj = back.as_object().unwrap();
        for key in ["title_kr", "maker", "timestamp", "link"] {
            assert_eq!(obj.get(key), Some(&Value::Null), "{key}");
        }
        assert!(!obj.contains_key("title_jp"));
        assert!(!obj.contains_key("thumbnail_url"));
    }

    #[test]
    fn test_plain_code_key_is_kept_as_is() {
        let game: GameRecord =
            serde_json::from_str(r#"{"rj_code":"RJ9","code":"RJ9-alt"}"#).unwrap();
        assert_eq!(game.code_str(), "RJ9");
        let back = serde_json::to_value(&game).unwrap();
        assert_eq!(back["rj_code"], "RJ9");
        assert_eq!(back["code"], "RJ9-alt");

        let only_code: GameRecord = serde_json::from_str(r#"{"code":"RJ5"}"#).unwrap();
        let back = serde_json::to_value(&only_code).unwrap();
        assert_eq!(back["code"], "RJ5");
        assert!(back.get("rj_code").is_none());
    }

    #[test]
    fn test_matches_query() {
        let game = GameRecord {
            code: Some(Some("RJ01234".into())),
            title_kr: Some(Some("마법 소녀".into())),
            title_jp: Some(Some("Magical Girl".into())),
            ..GameRecord::default()
        };
        assert!(game.matches_query("rj012"));
        assert!(game.matches_query("magical"));
        assert!(game.matches_query("소녀"));
        assert!(game.matches_query(""));
        assert!(!game.matches_query("xyz"));
    }

    #[test]
    fn test_timestamp_label() {
        let mut game = GameRecord {
            timestamp_str: Some(Some("2024-01-02 03:04:05".into())),
            timestamp: Some(Value::from(1.0)),
            ..GameRecord::default()
        };
        assert_eq!(game.timestamp_label().as_deref(), Some("2024-01-02 03:04:05"));

        game.timestamp_str = None;
        let label = game.timestamp_label().unwrap();
        assert_eq!(label.len(), "YYYY-MM-DD HH:MM:SS".len());

        game.timestamp = Some(Value::String("yesterday".into()));
        assert_eq!(game.timestamp_label().as_deref(), Some("yesterday"));

        game.timestamp = None;
        assert_eq!(game.timestamp_label(), None);
    }
}
