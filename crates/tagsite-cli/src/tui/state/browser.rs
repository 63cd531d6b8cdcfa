//! Catalogue browser state: one instance per catalogue

use tagsite_core::view::filter_games;
use tagsite_core::{Capability, Catalogue, GameRecord, Platform};

use super::{ensure_visible, LoadStatus, PlatformSelect};
use crate::tui::input::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFocus {
    Platform,
    Load,
    DeleteAll,
    Stats,
    Filter,
    List,
}

#[derive(Debug)]
pub struct BrowserState {
    pub catalogue: Catalogue,
    pub platform: PlatformSelect,
    pub games: Vec<GameRecord>,
    /// Indices into `games` matching the filter
    pub visible: Vec<usize>,
    pub status: LoadStatus,
    pub filter: TextField,
    /// Index into `visible`
    pub selected: Option<usize>,
    pub detail: Option<GameRecord>,
    pub scroll_offset: usize,
    pub focus: BrowserFocus,
}

impl BrowserState {
    pub fn new(catalogue: Catalogue, platforms: &[Platform], initial: &Platform) -> Self {
        Self {
            catalogue,
            platform: PlatformSelect::new(platforms, initial),
            games: Vec::new(),
            visible: Vec::new(),
            status: LoadStatus::NotLoaded,
            filter: TextField::new("Filter by title or code..."),
            selected: None,
            detail: None,
            scroll_offset: 0,
            focus: BrowserFocus::Load,
        }
    }

    /// Controls reachable with Tab, in order
    pub fn focus_ring(&self) -> Vec<BrowserFocus> {
        let mut ring = vec![
            BrowserFocus::Platform,
            BrowserFocus::Load,
            BrowserFocus::DeleteAll,
        ];
        if self.catalogue.supports(Capability::TagStats) {
            ring.push(BrowserFocus::Stats);
        }
        ring.extend([BrowserFocus::Filter, BrowserFocus::List]);
        ring
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let idx = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % ring.len()
        } else {
            (idx + ring.len() - 1) % ring.len()
        };
        self.focus = ring[next];
    }

    /// Replace the list with a fresh fetch
    pub fn set_games(&mut self, games: Vec<GameRecord>) {
        self.games = games;
        self.status = LoadStatus::Ready;
        self.refilter();
    }

    pub fn set_unavailable(&mut self) {
        self.games.clear();
        self.status = LoadStatus::Unavailable;
        self.refilter();
    }

    /// Drop the list and detail; used after delete-all
    pub fn clear(&mut self) {
        self.games.clear();
        self.refilter();
    }

    /// Recompute the filtered view. Selection and detail are reset.
    pub fn refilter(&mut self) {
        self.visible = filter_games(&self.games, self.filter.content());
        self.clear_selection();
        self.scroll_offset = 0;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.detail = None;
    }

    /// Select the `index`-th visible record and show its detail.
    /// Out-of-range indices are ignored.
    pub fn select_record(&mut self, index: usize) -> bool {
        let Some(game) = self.visible.get(index).and_then(|&i| self.games.get(i)) else {
            return false;
        };
        self.detail = Some(game.clone());
        self.selected = Some(index);
        true
    }

    pub fn select_next(&mut self, height: usize) {
        let next = match self.selected {
            Some(i) => i + 1,
            None => 0,
        };
        if self.select_record(next) {
            ensure_visible(next, &mut self.scroll_offset, height);
        }
    }

    pub fn select_prev(&mut self, height: usize) {
        let prev = self.selected.map(|i| i.saturating_sub(1)).unwrap_or(0);
        if self.select_record(prev) {
            ensure_visible(prev, &mut self.scroll_offset, height);
        }
    }

    pub fn visible_games(&self) -> impl Iterator<Item = &GameRecord> {
        self.visible.iter().filter_map(|&i| self.games.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(code: &str, title_kr: &str) -> GameRecord {
        GameRecord {
            code: Some(Some(code.to_string())),
            title_kr: Some(Some(title_kr.to_string())),
            ..GameRecord::default()
        }
    }

    fn browser() -> BrowserState {
        let platforms = [Platform::new("rj"), Platform::new("steam")];
        let mut state = BrowserState::new(Catalogue::Storage, &platforms, &Platform::new("rj"));
        state.set_games(vec![game("RJ01", "하나"), game("RJ02", "둘"), game("RJ03", "셋")]);
        state
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut state = browser();
        assert!(state.select_record(1));
        assert!(!state.select_record(7));
        assert_eq!(state.selected, Some(1));
        assert_eq!(state.detail.as_ref().map(|g| g.code_str()), Some("RJ02"));
    }

    #[test]
    fn test_filter_resets_selection() {
        let mut state = browser();
        state.select_record(0);
        state.filter.set("rj03");
        state.refilter();
        assert_eq!(state.visible, vec![2]);
        assert_eq!(state.selected, None);
        assert!(state.detail.is_none());

        state.filter.clear();
        state.refilter();
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn test_keyboard_selection_stops_at_ends() {
        let mut state = browser();
        state.select_prev(10);
        assert_eq!(state.selected, Some(0));
        for _ in 0..5 {
            state.select_next(10);
        }
        assert_eq!(state.selected, Some(2));
    }

    #[test]
    fn test_stats_only_in_document_focus_ring() {
        let platforms = [Platform::new("rj")];
        let storage = BrowserState::new(Catalogue::Storage, &platforms, &platforms[0]);
        let document = BrowserState::new(Catalogue::Document, &platforms, &platforms[0]);
        assert!(!storage.focus_ring().contains(&BrowserFocus::Stats));
        assert!(document.focus_ring().contains(&BrowserFocus::Stats));
    }

    #[test]
    fn test_clear_empties_list_and_detail() {
        let mut state = browser();
        state.select_record(2);
        state.clear();
        assert!(state.games.is_empty());
        assert!(state.detail.is_none());
    }
}
