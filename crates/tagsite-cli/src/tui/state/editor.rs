//! Game record editor state: one instance per catalogue

use tagsite_core::parse::parse_int_or;
use tagsite_core::{Capability, Catalogue, GameRecord, Platform, TagLanguage};

use super::{ensure_visible, PlatformSelect};
use crate::tui::input::TextField;

pub const MISSING_CODE_MESSAGE: &str = "Enter a game code";
pub const NOTHING_TO_SAVE_MESSAGE: &str = "No game data to save";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Platform,
    Code,
    Find,
    TitleQuery,
    TagQuery,
    Results,
    Title,
    Circle,
    ReleaseDate,
    Price,
    Description,
    TagsJp,
    TagsKr,
    Save,
}

impl EditorFocus {
    pub fn chip_language(self) -> Option<TagLanguage> {
        match self {
            EditorFocus::TagsJp => Some(TagLanguage::Japanese),
            EditorFocus::TagsKr => Some(TagLanguage::Korean),
            _ => None,
        }
    }
}

/// Outcome of the last title/tag search
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Results(Vec<GameRecord>),
}

/// Everything a save request needs, captured at submit time
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub platform: Platform,
    pub code: String,
    pub record: GameRecord,
}

fn chip_slot(language: TagLanguage) -> usize {
    match language {
        TagLanguage::Japanese => 0,
        TagLanguage::Korean => 1,
    }
}

#[derive(Debug)]
pub struct EditorState {
    pub catalogue: Catalogue,
    /// Shared by code, title and tag searches
    pub platform: PlatformSelect,
    pub code: TextField,
    pub title_query: TextField,
    pub tag_query: TextField,
    pub search: SearchStatus,
    pub results_selected: usize,
    pub results_offset: usize,

    pub record: Option<GameRecord>,
    /// Platform and code the loaded record is saved under
    pub current: Option<(Platform, String)>,
    /// Search results replace the form until the next code lookup
    pub form_visible: bool,

    pub title: TextField,
    pub circle: TextField,
    pub release_date: TextField,
    pub price: TextField,
    pub description: TextField,
    chip_cursor: [usize; 2],

    pub focus: EditorFocus,
}

impl EditorState {
    pub fn new(catalogue: Catalogue, platforms: &[Platform], initial: &Platform) -> Self {
        Self {
            catalogue,
            platform: PlatformSelect::new(platforms, initial),
            code: TextField::new("Game code (e.g. RJ01234567)"),
            title_query: TextField::new("Search by title..."),
            tag_query: TextField::new("Search by Korean tag..."),
            search: SearchStatus::Idle,
            results_selected: 0,
            results_offset: 0,
            record: None,
            current: None,
            form_visible: false,
            title: TextField::new("Title"),
            circle: TextField::new("Circle"),
            release_date: TextField::new("YYYY-MM-DD"),
            price: TextField::new("0"),
            description: TextField::new("Description"),
            chip_cursor: [0, 0],
            focus: EditorFocus::Code,
        }
    }

    pub fn focus_ring(&self) -> Vec<EditorFocus> {
        let mut ring = vec![EditorFocus::Platform, EditorFocus::Code, EditorFocus::Find];
        if self.catalogue.supports(Capability::Search) {
            ring.extend([EditorFocus::TitleQuery, EditorFocus::TagQuery]);
            let results_shown = !self.form_visible
                && matches!(&self.search, SearchStatus::Results(r) if !r.is_empty());
            if results_shown {
                ring.push(EditorFocus::Results);
            }
        }
        if self.form_visible && self.record.is_some() {
            ring.extend([
                EditorFocus::Title,
                EditorFocus::Circle,
                EditorFocus::ReleaseDate,
                EditorFocus::Price,
                EditorFocus::Description,
                EditorFocus::TagsJp,
                EditorFocus::TagsKr,
                EditorFocus::Save,
            ]);
        }
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

    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            EditorFocus::Code => Some(&mut self.code),
            EditorFocus::TitleQuery => Some(&mut self.title_query),
            EditorFocus::TagQuery => Some(&mut self.tag_query),
            EditorFocus::Title => Some(&mut self.title),
            EditorFocus::Circle => Some(&mut self.circle),
            EditorFocus::ReleaseDate => Some(&mut self.release_date),
            EditorFocus::Price => Some(&mut self.price),
            EditorFocus::Description => Some(&mut self.description),
            _ => None,
        }
    }

    /// Validate and normalize the code field for a lookup. The normalized
    /// code is written back into the field.
    pub fn code_lookup(&mut self) -> Result<(Platform, String), &'static str> {
        let trimmed = self.code.content().trim();
        if trimmed.is_empty() {
            return Err(MISSING_CODE_MESSAGE);
        }
        let platform = self.platform.current().clone();
        let code = platform.normalize_code(trimmed);
        self.code.set(code.clone());
        Ok((platform, code))
    }

    /// Bind a fetched or blank record into the form
    pub fn show_record(&mut self, platform: Platform, code: String, record: GameRecord) {
        self.title.set(record.title.clone());
        self.circle.set(record.circle.clone());
        self.release_date.set(record.release_date.clone());
        self.price.set(record.price.to_string());
        self.description.set(record.description.clone());
        self.chip_cursor = [0, 0];
        self.record = Some(record);
        self.current = Some((platform, code));
        self.form_visible = true;
        if self.focus == EditorFocus::Results {
            self.focus = EditorFocus::Title;
        }
    }

    pub fn show_results(&mut self, results: Vec<GameRecord>) {
        self.search = SearchStatus::Results(results);
        self.results_selected = 0;
        self.results_offset = 0;
        self.form_visible = false;
        if self.focus_is_form() {
            self.focus = EditorFocus::Find;
        }
    }

    fn focus_is_form(&self) -> bool {
        matches!(
            self.focus,
            EditorFocus::Title
                | EditorFocus::Circle
                | EditorFocus::ReleaseDate
                | EditorFocus::Price
                | EditorFocus::Description
                | EditorFocus::TagsJp
                | EditorFocus::TagsKr
                | EditorFocus::Save
        )
    }

    pub fn results(&self) -> &[GameRecord] {
        match &self.search {
            SearchStatus::Results(results) => results,
            SearchStatus::Idle => &[],
        }
    }

    pub fn select_result_next(&mut self, height: usize) {
        if self.results_selected + 1 < self.results().len() {
            self.results_selected += 1;
        }
        ensure_visible(self.results_selected, &mut self.results_offset, height);
    }

    pub fn select_result_prev(&mut self, height: usize) {
        self.results_selected = self.results_selected.saturating_sub(1);
        ensure_visible(self.results_selected, &mut self.results_offset, height);
    }

    /// Copy the chosen result's platform and code into the lookup controls.
    /// Results without a platform belong to the prefixed platform.
    pub fn pick_result(&mut self) -> bool {
        let Some(result) = self.results().get(self.results_selected) else {
            return false;
        };
        let platform = result
            .platform_str()
            .map(Platform::new)
            .unwrap_or_default();
        let code = result.code_str().to_string();
        self.platform.select(&platform);
        self.code.set(code);
        true
    }

    pub fn chip_cursor(&self, language: TagLanguage) -> usize {
        self.chip_cursor[chip_slot(language)]
    }

    pub fn move_chip_cursor(&mut self, language: TagLanguage, forward: bool) {
        let len = self
            .record
            .as_ref()
            .map(|r| r.tags_for(language).len())
            .unwrap_or(0);
        let cursor = &mut self.chip_cursor[chip_slot(language)];
        if forward {
            if *cursor + 1 < len {
                *cursor += 1;
            }
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Remove the chip under the cursor from the in-memory record only
    pub fn remove_chip(&mut self, language: TagLanguage) -> Option<String> {
        let slot = chip_slot(language);
        let record = self.record.as_mut()?;
        let tag = record.tags_for(language).get(self.chip_cursor[slot])?.clone();
        record.remove_tag(language, &tag);
        let len = record.tags_for(language).len();
        if self.chip_cursor[slot] >= len {
            self.chip_cursor[slot] = len.saturating_sub(1);
        }
        Some(tag)
    }

    /// Copy the form back into the record for saving.
    ///
    /// Only title, circle, release date, price and description are read
    /// from the form; tag lists carry chip removals, primary tag is untouched.
    pub fn save_request(&mut self) -> Result<SaveRequest, &'static str> {
        let (Some(record), Some((platform, code))) = (self.record.as_mut(), self.current.as_ref())
        else {
            return Err(NOTHING_TO_SAVE_MESSAGE);
        };
        record.title = self.title.content().to_string();
        record.circle = self.circle.content().to_string();
        record.release_date = self.release_date.content().to_string();
        record.price = parse_int_or(self.price.content(), 0);
        record.description = self.description.content().to_string();
        Ok(SaveRequest {
            platform: platform.clone(),
            code: code.clone(),
            record: record.clone(),
        })
    }
}
