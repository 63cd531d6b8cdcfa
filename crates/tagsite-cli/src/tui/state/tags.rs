//! Tag table view state

use tagsite_core::parse::parse_int_prefix;
use tagsite_core::view::{filter_tags, EmptyReason, TagFilter};
use tagsite_core::Tag;

use super::{ensure_visible, LoadStatus};
use crate::tui::input::TextField;

pub const DEFAULT_PRIORITY: &str = "10";
pub const MISSING_TAG_MESSAGE: &str = "Both the Japanese and Korean tag are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagsFocus {
    Search,
    NewJp,
    NewKr,
    NewPriority,
    Add,
    Table,
}

impl TagsFocus {
    const RING: [TagsFocus; 6] = [
        TagsFocus::Search,
        TagsFocus::NewJp,
        TagsFocus::NewKr,
        TagsFocus::NewPriority,
        TagsFocus::Add,
        TagsFocus::Table,
    ];

    pub fn next(self) -> Self {
        let idx = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        Self::RING[(idx + 1) % Self::RING.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::RING.iter().position(|f| *f == self).unwrap_or(0);
        Self::RING[(idx + Self::RING.len() - 1) % Self::RING.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEditFocus {
    Kr,
    Priority,
}

/// Inline edit of one table row, keyed by its Japanese tag
#[derive(Debug, Clone)]
pub struct RowEdit {
    pub tag_jp: String,
    pub kr: TextField,
    pub priority: TextField,
    pub focus: RowEditFocus,
}

impl RowEdit {
    fn new(tag: &Tag) -> Self {
        let priority = tag.priority.map(|p| p.to_string()).unwrap_or_default();
        Self {
            tag_jp: tag.tag_jp.clone(),
            kr: TextField::with_content("", tag.tag_kr.clone()),
            priority: TextField::with_content("", priority),
            focus: RowEditFocus::Kr,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            RowEditFocus::Kr => RowEditFocus::Priority,
            RowEditFocus::Priority => RowEditFocus::Kr,
        };
    }

    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            RowEditFocus::Kr => &mut self.kr,
            RowEditFocus::Priority => &mut self.priority,
        }
    }

    /// The edited mapping. A priority that does not parse is sent as null.
    pub fn to_tag(&self) -> Result<Tag, &'static str> {
        build_tag(&self.tag_jp, self.kr.content(), self.priority.content())
    }
}

fn build_tag(jp: &str, kr: &str, priority: &str) -> Result<Tag, &'static str> {
    let tag = Tag::new(jp.trim(), kr.trim(), parse_int_prefix(priority));
    if tag.is_complete() {
        Ok(tag)
    } else {
        Err(MISSING_TAG_MESSAGE)
    }
}

#[derive(Debug)]
pub struct TagTableState {
    pub tags: Vec<Tag>,
    pub status: LoadStatus,
    pub search: TextField,
    pub filter: TagFilter,
    pub new_jp: TextField,
    pub new_kr: TextField,
    pub new_priority: TextField,
    pub focus: TagsFocus,
    /// Index into `filter.indices`
    pub selected: usize,
    pub scroll_offset: usize,
    pub row_edit: Option<RowEdit>,
}

impl Default for TagTableState {
    fn default() -> Self {
        Self::new()
    }
}

impl TagTableState {
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            status: LoadStatus::NotLoaded,
            search: TextField::new("Search tags..."),
            filter: TagFilter::default(),
            new_jp: TextField::new("Japanese tag"),
            new_kr: TextField::new("Korean tag"),
            new_priority: TextField::with_content("Priority", DEFAULT_PRIORITY),
            focus: TagsFocus::Search,
            selected: 0,
            scroll_offset: 0,
            row_edit: None,
        }
    }

    /// Replace the table with a fresh fetch
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
        self.status = LoadStatus::Ready;
        self.row_edit = None;
        self.refilter();
    }

    pub fn set_unavailable(&mut self) {
        self.tags.clear();
        self.status = LoadStatus::Unavailable;
        self.row_edit = None;
        self.refilter();
    }

    /// Recompute the visible rows from the search text
    pub fn refilter(&mut self) {
        self.filter = filter_tags(&self.tags, self.search.content());
        if self.selected >= self.filter.indices.len() {
            self.selected = self.filter.indices.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Tag> {
        self.filter.indices.iter().filter_map(|&i| self.tags.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.filter.indices.len()
    }

    pub fn selected_tag(&self) -> Option<&Tag> {
        self.filter
            .indices
            .get(self.selected)
            .and_then(|&i| self.tags.get(i))
    }

    /// Why the table is empty, once something has been fetched
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self.status {
            LoadStatus::Ready => self.filter.empty_reason(self.search.content()),
            _ => None,
        }
    }

    pub fn select_next(&mut self, height: usize) {
        if self.selected + 1 < self.visible_len() {
            self.selected += 1;
        }
        ensure_visible(self.selected, &mut self.scroll_offset, height);
    }

    pub fn select_prev(&mut self, height: usize) {
        self.selected = self.selected.saturating_sub(1);
        ensure_visible(self.selected, &mut self.scroll_offset, height);
    }

    /// Open the inline editor on the selected row
    pub fn begin_row_edit(&mut self) -> bool {
        match self.selected_tag() {
            Some(tag) => {
                self.row_edit = Some(RowEdit::new(tag));
                true
            }
            None => false,
        }
    }

    pub fn add_form_tag(&self) -> Result<Tag, &'static str> {
        build_tag(
            self.new_jp.content(),
            self.new_kr.content(),
            self.new_priority.content(),
        )
    }

    pub fn reset_add_form(&mut self) {
        self.new_jp.clear();
        self.new_kr.clear();
        self.new_priority.set(DEFAULT_PRIORITY);
    }

    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            TagsFocus::Search => Some(&mut self.search),
            TagsFocus::NewJp => Some(&mut self.new_jp),
            TagsFocus::NewKr => Some(&mut self.new_kr),
            TagsFocus::NewPriority => Some(&mut self.new_priority),
            TagsFocus::Add | TagsFocus::Table => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> TagTableState {
        let mut state = TagTableState::new();
        state.set_tags(vec![
            Tag::new("新作", "신작", Some(5)),
            Tag::new("RPG", "롤플레잉", Some(10)),
        ]);
        state
    }

    #[test]
    fn test_filter_scenario_no_results_vs_no_data() {
        let mut state = loaded();
        state.search.set("신");
        state.refilter();
        assert_eq!(state.visible_len(), 1);
        assert_eq!(state.selected_tag().map(|t| t.tag_jp.as_str()), Some("新作"));

        state.search.set("xyz");
        state.refilter();
        assert_eq!(state.empty_reason(), Some(EmptyReason::NoResults));

        let mut empty = TagTableState::new();
        empty.set_tags(Vec::new());
        assert_eq!(empty.empty_reason(), Some(EmptyReason::NoData));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut state = loaded();
        state.search.set("rp");
        state.refilter();
        let once = state.filter.clone();
        state.refilter();
        assert_eq!(state.filter, once);
    }

    #[test]
    fn test_add_form_validation_and_priority() {
        let mut state = TagTableState::new();
        state.new_jp.set("  新作 ");
        assert_eq!(state.add_form_tag(), Err(MISSING_TAG_MESSAGE));

        state.new_kr.set("신작");
        let tag = state.add_form_tag().unwrap();
        assert_eq!(tag, Tag::new("新作", "신작", Some(10)));

        state.new_priority.set("abc");
        assert_eq!(state.add_form_tag().unwrap().priority, None);

        state.reset_add_form();
        assert!(state.new_jp.content().is_empty());
        assert_eq!(state.new_priority.content(), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_row_edit_keeps_key_and_rejects_blank_korean() {
        let mut state = loaded();
        state.select_next(10);
        assert!(state.begin_row_edit());
        let edit = state.row_edit.as_mut().unwrap();
        assert_eq!(edit.tag_jp, "RPG");
        edit.kr.clear();
        assert!(edit.to_tag().is_err());
        edit.kr.set("알피지");
        edit.toggle_focus();
        edit.focused_field().set("7x");
        assert_eq!(edit.to_tag().unwrap(), Tag::new("RPG", "알피지", Some(7)));
    }

    #[test]
    fn test_failed_load_is_not_an_empty_reason() {
        let mut state = loaded();
        state.set_unavailable();
        assert_eq!(state.status, LoadStatus::Unavailable);
        assert_eq!(state.empty_reason(), None);
        assert!(!state.begin_row_edit());
    }
}
