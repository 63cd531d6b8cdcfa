//! Channel Polling
//!
//! Request tasks report back over one unbounded channel. The event loop
//! drains it on every tick and applies each result to view state.

use tagsite_core::api::ApiResult;
use tagsite_core::model::{DeleteAllReport, PurgeReport, SyncReport};
use tagsite_core::{Catalogue, GameRecord, Platform, Tag, TagStats};
use tokio::sync::mpsc::error::TryRecvError;

use crate::tui::app::App;
use crate::tui::state::BusyControl;

/// Which tag control issued an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOrigin {
    AddForm,
    Row,
}

/// Result of one background request
#[derive(Debug)]
pub enum ApiEvent {
    TagsLoaded(ApiResult<Vec<Tag>>),
    TagUpserted {
        tag: Tag,
        origin: UpsertOrigin,
        result: ApiResult<()>,
    },
    TagsSynced(ApiResult<SyncReport>),
    SlashTagsPurged(ApiResult<PurgeReport>),
    GamesLoaded {
        catalogue: Catalogue,
        result: ApiResult<Vec<GameRecord>>,
    },
    GameDeleted {
        catalogue: Catalogue,
        code: String,
        result: ApiResult<()>,
    },
    AllGamesDeleted {
        catalogue: Catalogue,
        result: ApiResult<DeleteAllReport>,
    },
    TagStatsLoaded {
        catalogue: Catalogue,
        platform: Platform,
        result: ApiResult<TagStats>,
    },
    GameFetched {
        catalogue: Catalogue,
        platform: Platform,
        code: String,
        result: ApiResult<Option<GameRecord>>,
    },
    SearchFinished {
        catalogue: Catalogue,
        result: ApiResult<Vec<GameRecord>>,
    },
    GameSaved {
        catalogue: Catalogue,
        code: String,
        result: ApiResult<()>,
    },
    /// Sent by the request task's drop guard once it is done
    Idle(BusyControl),
}

/// Result of a polling operation that may trigger UI updates
#[derive(Debug, Default)]
pub struct PollResult {
    /// Whether any data was received that requires a redraw
    pub needs_redraw: bool,
}

impl App {
    /// Drain finished requests without blocking
    pub(crate) fn poll_api_events(&mut self) -> PollResult {
        let mut result = PollResult::default();
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    self.apply_event(event);
                    result.needs_redraw = true;
                }
                Err(TryRecvError::Empty) => break,
                // The app holds a sender, so this only happens on shutdown
                Err(TryRecvError::Disconnected) => break,
            }
        }
        result
    }
}
