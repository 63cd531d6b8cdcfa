//! Request mediators
//!
//! Each user action validates its inputs, marks its control busy and hands
//! the HTTP call to a background task. Results come back as [`ApiEvent`]s.

use std::future::Future;

use tagsite_core::{ApiClient, Capability, Catalogue, SearchQuery};

use crate::tui::app::{App, Popup};
use crate::tui::components::Toast;
use crate::tui::polling::{ApiEvent, UpsertOrigin};
use crate::tui::state::{BusyControl, LoadStatus, PendingAction};

pub const EMPTY_TITLE_QUERY_MESSAGE: &str = "Enter a search term";
pub const EMPTY_TAG_QUERY_MESSAGE: &str = "Enter a tag";

impl App {
    /// Run `request` in the background with `control` marked busy.
    ///
    /// The idle notice is sent from a drop guard so the control is released
    /// even if the task is cancelled or panics.
    fn spawn_request<F, Fut>(&mut self, control: BusyControl, request: F)
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = ApiEvent> + Send + 'static,
    {
        self.busy.mark(control);
        let fut = request(self.api.clone());
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let idle = scopeguard::guard(tx, move |tx| {
                let _ = tx.send(ApiEvent::Idle(control));
            });
            let event = fut.await;
            let _ = idle.send(event);
        });
    }

    fn confirm(&mut self, action: PendingAction) {
        self.pending = Some(action);
        self.popups.confirm.reset();
        self.open_popup(Popup::Confirm);
    }

    // Tags

    pub fn load_tags(&mut self) {
        if self.tags.status == LoadStatus::NotLoaded {
            self.tags.status = LoadStatus::Loading;
        }
        tracing::debug!("Loading tag table");
        self.spawn_request(BusyControl::ReloadTags, |api| async move {
            ApiEvent::TagsLoaded(api.list_tags().await)
        });
    }

    pub fn add_tag(&mut self) {
        let tag = match self.tags.add_form_tag() {
            Ok(tag) => tag,
            Err(message) => {
                self.show_toast(Toast::error(message));
                return;
            }
        };
        tracing::info!(tag_jp = %tag.tag_jp, tag_kr = %tag.tag_kr, "Adding tag");
        self.spawn_request(BusyControl::AddTag, |api| async move {
            let result = api.upsert_tag(&tag).await;
            ApiEvent::TagUpserted {
                tag,
                origin: UpsertOrigin::AddForm,
                result,
            }
        });
    }

    /// Submit the inline row editor
    pub fn update_row_tag(&mut self) {
        let Some(edit) = self.tags.row_edit.as_ref() else {
            return;
        };
        let tag = match edit.to_tag() {
            Ok(tag) => tag,
            Err(message) => {
                self.show_toast(Toast::error(message));
                return;
            }
        };
        tracing::info!(tag_jp = %tag.tag_jp, tag_kr = %tag.tag_kr, "Updating tag");
        self.spawn_request(BusyControl::UpdateTag, |api| async move {
            let result = api.upsert_tag(&tag).await;
            ApiEvent::TagUpserted {
                tag,
                origin: UpsertOrigin::Row,
                result,
            }
        });
    }

    pub fn request_sync(&mut self) {
        self.confirm(PendingAction::SyncTags);
    }

    pub fn request_purge(&mut self) {
        self.confirm(PendingAction::PurgeSlashTags);
    }

    fn sync_tags(&mut self) {
        tracing::info!("Syncing tags to all games");
        self.spawn_request(BusyControl::SyncTags, |api| async move {
            ApiEvent::TagsSynced(api.sync_tags().await)
        });
    }

    fn purge_slash_tags(&mut self) {
        tracing::info!("Removing tags containing '/'");
        self.spawn_request(BusyControl::PurgeSlashTags, |api| async move {
            ApiEvent::SlashTagsPurged(api.purge_slash_tags().await)
        });
    }

    /// Run the action the confirm dialog was opened for
    pub fn confirm_pending(&mut self) {
        let pending = self.pending.take();
        self.close_popup();
        match pending {
            Some(PendingAction::SyncTags) => self.sync_tags(),
            Some(PendingAction::PurgeSlashTags) => self.purge_slash_tags(),
            Some(PendingAction::DeleteOne { catalogue, code, .. }) => {
                self.delete_game(catalogue, code)
            }
            Some(PendingAction::DeleteAll { catalogue }) => self.delete_all_games(catalogue),
            None => {}
        }
    }

    // Browsers

    pub fn load_games(&mut self, catalogue: Catalogue) {
        let browser = self.browser_mut(catalogue);
        if browser.status == LoadStatus::NotLoaded {
            browser.status = LoadStatus::Loading;
        }
        let platform = browser.platform.current().clone();
        tracing::info!(catalogue = catalogue.label(), platform = %platform, "Loading games");
        self.spawn_request(BusyControl::LoadGames(catalogue), |api| async move {
            let result = api.list_games(catalogue, &platform).await;
            ApiEvent::GamesLoaded { catalogue, result }
        });
    }

    /// Ask before deleting the record shown in the detail panel
    pub fn request_delete_selected(&mut self, catalogue: Catalogue) {
        let Some(game) = self.browser(catalogue).detail.as_ref() else {
            return;
        };
        let action = PendingAction::DeleteOne {
            catalogue,
            code: game.code_str().to_string(),
            title: game.display_title().to_string(),
        };
        self.confirm(action);
    }

    pub fn request_delete_all(&mut self, catalogue: Catalogue) {
        self.confirm(PendingAction::DeleteAll { catalogue });
    }

    /// Delete under the browser's platform as selected at confirm time
    fn delete_game(&mut self, catalogue: Catalogue, code: String) {
        let platform = self.browser(catalogue).platform.current().clone();
        tracing::info!(catalogue = catalogue.label(), platform = %platform, code = %code, "Deleting game");
        self.spawn_request(BusyControl::DeleteGame(catalogue), |api| async move {
            let result = api.delete_game(catalogue, &platform, &code).await;
            ApiEvent::GameDeleted {
                catalogue,
                code,
                result,
            }
        });
    }

    fn delete_all_games(&mut self, catalogue: Catalogue) {
        let platform = self.browser(catalogue).platform.current().clone();
        tracing::warn!(catalogue = catalogue.label(), platform = %platform, "Deleting all games");
        self.spawn_request(BusyControl::DeleteAll(catalogue), |api| async move {
            let result = api.delete_all_games(catalogue, &platform).await;
            ApiEvent::AllGamesDeleted { catalogue, result }
        });
    }

    /// Open the statistics modal and fetch its contents
    pub fn open_tag_stats(&mut self, catalogue: Catalogue) {
        if !catalogue.supports(Capability::TagStats) {
            return;
        }
        let platform = self.browser(catalogue).platform.current().clone();
        self.popups.stats.open(platform.clone());
        self.open_popup(Popup::TagStats);
        self.spawn_request(BusyControl::TagStats(catalogue), |api| async move {
            let result = api.tag_stats(catalogue, &platform).await;
            ApiEvent::TagStatsLoaded {
                catalogue,
                platform,
                result,
            }
        });
    }

    // Editors

    pub fn find_code(&mut self, catalogue: Catalogue) {
        let (platform, code) = match self.editor_mut(catalogue).code_lookup() {
            Ok(lookup) => lookup,
            Err(message) => {
                self.show_toast(Toast::error(message));
                return;
            }
        };
        tracing::info!(catalogue = catalogue.label(), platform = %platform, code = %code, "Looking up game");
        self.spawn_request(BusyControl::FindCode(catalogue), |api| async move {
            let result = api.get_game(catalogue, &platform, &code).await;
            ApiEvent::GameFetched {
                catalogue,
                platform,
                code,
                result,
            }
        });
    }

    pub fn search_title(&mut self, catalogue: Catalogue) {
        let query = self.editor(catalogue).title_query.content().trim().to_string();
        if query.is_empty() {
            self.show_toast(Toast::error(EMPTY_TITLE_QUERY_MESSAGE));
            return;
        }
        self.search_games(
            catalogue,
            BusyControl::SearchTitle(catalogue),
            SearchQuery::Title(query),
        );
    }

    pub fn search_tag(&mut self, catalogue: Catalogue) {
        let tag = self.editor(catalogue).tag_query.content().trim().to_string();
        if tag.is_empty() {
            self.show_toast(Toast::error(EMPTY_TAG_QUERY_MESSAGE));
            return;
        }
        self.search_games(
            catalogue,
            BusyControl::SearchTag(catalogue),
            SearchQuery::Tag(tag),
        );
    }

    fn search_games(&mut self, catalogue: Catalogue, control: BusyControl, query: SearchQuery) {
        if !catalogue.supports(Capability::Search) {
            return;
        }
        let platform = self.editor(catalogue).platform.current().clone();
        tracing::info!(catalogue = catalogue.label(), platform = %platform, query = ?query, "Searching games");
        self.spawn_request(control, |api| async move {
            let result = api.search_games(catalogue, &platform, &query).await;
            ApiEvent::SearchFinished { catalogue, result }
        });
    }

    /// Load the highlighted search result into the form
    pub fn pick_search_result(&mut self, catalogue: Catalogue) {
        if self.editor_mut(catalogue).pick_result() {
            self.find_code(catalogue);
        }
    }

    pub fn save_game(&mut self, catalogue: Catalogue) {
        let request = match self.editor_mut(catalogue).save_request() {
            Ok(request) => request,
            Err(message) => {
                self.show_toast(Toast::error(message));
                return;
            }
        };
        tracing::info!(
            catalogue = catalogue.label(),
            platform = %request.platform,
            code = %request.code,
            "Saving game"
        );
        self.spawn_request(BusyControl::SaveGame(catalogue), |api| async move {
            let result = api
                .save_game(catalogue, &request.platform, &request.code, &request.record)
                .await;
            ApiEvent::GameSaved {
                catalogue,
                code: request.code,
                result,
            }
        });
    }
}
