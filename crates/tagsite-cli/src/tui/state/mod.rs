//! View state
//!
//! One typed store per view. The browser and editor are instantiated once
//! per catalogue instead of sharing globals.

mod browser;
mod editor;
mod platform;
mod tags;

use std::collections::HashMap;

use tagsite_core::Catalogue;

pub use browser::{BrowserFocus, BrowserState};
pub use editor::{EditorFocus, EditorState, SaveRequest, SearchStatus};
pub use platform::PlatformSelect;
pub use tags::{RowEdit, RowEditFocus, TagTableState, TagsFocus};

/// Last fetch outcome for a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Ready,
    /// Fetch failed; the view shows an unavailable message
    Unavailable,
}

/// Controls that show a busy label while their request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyControl {
    ReloadTags,
    AddTag,
    UpdateTag,
    SyncTags,
    PurgeSlashTags,
    LoadGames(Catalogue),
    DeleteGame(Catalogue),
    DeleteAll(Catalogue),
    TagStats(Catalogue),
    FindCode(Catalogue),
    SearchTitle(Catalogue),
    SearchTag(Catalogue),
    SaveGame(Catalogue),
}

/// In-flight requests per control. A control is marked on dispatch and
/// cleared by the request task's drop guard, whatever the outcome.
#[derive(Debug, Default)]
pub struct BusySet {
    controls: HashMap<BusyControl, usize>,
}

impl BusySet {
    pub fn mark(&mut self, control: BusyControl) {
        *self.controls.entry(control).or_default() += 1;
    }

    pub fn clear(&mut self, control: BusyControl) {
        if let Some(count) = self.controls.get_mut(&control) {
            *count -= 1;
            if *count == 0 {
                self.controls.remove(&control);
            }
        }
    }

    pub fn is_busy(&self, control: BusyControl) -> bool {
        self.controls.contains_key(&control)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// A destructive action waiting on the confirm dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    SyncTags,
    PurgeSlashTags,
    DeleteOne {
        catalogue: Catalogue,
        code: String,
        title: String,
    },
    DeleteAll {
        catalogue: Catalogue,
    },
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::SyncTags => "Sync Tags",
            PendingAction::PurgeSlashTags => "Remove Slash Tags",
            PendingAction::DeleteOne { .. } => "Delete Game",
            PendingAction::DeleteAll { .. } => "Delete All Games",
        }
    }

    pub fn message(&self) -> String {
        match self {
            PendingAction::SyncTags => {
                "Re-apply the tag table to every game? Korean tags on all records will be regenerated."
                    .to_string()
            }
            PendingAction::PurgeSlashTags => {
                "Delete every tag mapping that contains '/' on either side?".to_string()
            }
            PendingAction::DeleteOne { code, title, .. } => {
                format!("Delete \"{title}\" ({code})? This cannot be undone.")
            }
            PendingAction::DeleteAll { catalogue } => format!(
                "Delete ALL games for the selected platform in the {} catalogue? This cannot be undone.",
                catalogue.label().to_lowercase()
            ),
        }
    }
}

/// Keep `selected` within a window of `height` rows starting at `offset`
pub fn ensure_visible(selected: usize, offset: &mut usize, height: usize) {
    if height == 0 {
        return;
    }
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + height {
        *offset = selected + 1 - height;
    }
}
