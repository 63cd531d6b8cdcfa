//! Tag usage statistics (document catalogue only)

use serde::{Deserialize, Serialize};

use super::de::null_as_default;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStatEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStats {
    #[serde(default)]
    pub total_games: u64,
    #[serde(default)]
    pub unique_tags: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_stats: Vec<TagStatEntry>,
}

impl TagStats {
    pub fn max_count(&self) -> u64 {
        self.tag_stats.iter().map(|e| e.count).max().unwrap_or(0)
    }

    /// Bar width of each entry as a percentage of the largest count.
    /// All bars are zero-width when the largest count is zero.
    pub fn bar_percentages(&self) -> Vec<f64> {
        let max = self.max_count();
        self.tag_stats
            .iter()
            .map(|e| {
                if max == 0 {
                    0.0
                } else {
                    e.count as f64 / max as f64 * 100.0
                }
            })
            .collect()
    }
}
