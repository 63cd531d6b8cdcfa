//! Client-side substring filters
//!
//! Filters return indices into the full list so selection can be mapped
//! back to the owning record without cloning.

use crate::model::{GameRecord, Tag};

/// Why a filtered list came out empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing loaded at all
    NoData,
    /// Data exists but the filter excluded all of it
    NoResults,
}

/// Result of filtering the tag table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub indices: Vec<usize>,
}

impl TagFilter {
    /// `None` when there is something to show
    pub fn empty_reason(&self, query: &str) -> Option<EmptyReason> {
        if !self.indices.is_empty() {
            None
        } else if query.is_empty() {
            Some(EmptyReason::NoData)
        } else {
            Some(EmptyReason::NoResults)
        }
    }
}

/// Filter tags by `query` over `tag_jp` and `tag_kr`, ignoring case
pub fn filter_tags(tags: &[Tag], query: &str) -> TagFilter {
    let query = query.to_lowercase();
    TagFilter {
        indices: tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.matches_query(&query))
            .map(|(idx, _)| idx)
            .collect(),
    }
}

/// Filter records by `query` over Korean title, Japanese title and code
pub fn filter_games(games: &[GameRecord], query: &str) -> Vec<usize> {
    let query = query.to_lowercase();
    games
        .iter()
        .enumerate()
        .filter(|(_, game)| game.matches_query(&query))
        .map(|(idx, _)| idx)
        .collect()
}
