//! Apply finished requests to view state

use tagsite_core::GameRecord;

use crate::tui::app::{App, Popup};
use crate::tui::components::Toast;
use crate::tui::polling::{ApiEvent, UpsertOrigin};

impl App {
    pub(crate) fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::TagsLoaded(Ok(tags)) => {
                tracing::info!(count = tags.len(), "Tag table loaded");
                self.tags.set_tags(tags);
            }
            ApiEvent::TagsLoaded(Err(e)) => {
                tracing::error!(error = %e, "Failed to load tags");
                self.tags.set_unavailable();
                self.show_toast(Toast::error("Failed to load tags. Please try again."));
            }

            ApiEvent::TagUpserted {
                tag,
                origin,
                result: Ok(()),
            } => {
                self.show_toast(Toast::success(format!(
                    "Tag updated: {} → {}",
                    tag.tag_jp, tag.tag_kr
                )));
                match origin {
                    UpsertOrigin::AddForm => self.tags.reset_add_form(),
                    UpsertOrigin::Row => self.tags.row_edit = None,
                }
                self.load_tags();
            }
            ApiEvent::TagUpserted {
                tag,
                result: Err(e),
                ..
            } => {
                tracing::error!(error = %e, tag_jp = %tag.tag_jp, "Failed to update tag");
                self.show_toast(Toast::error("Failed to update tag. Please try again."));
            }

            ApiEvent::TagsSynced(Ok(report)) => {
                tracing::info!(updated = report.updated, "Tags synced");
                self.show_toast(Toast::success(format!(
                    "Sync complete: {} game records updated",
                    report.updated
                )));
            }
            ApiEvent::TagsSynced(Err(e)) => {
                tracing::error!(error = %e, "Failed to sync tags");
                self.show_toast(Toast::error("Failed to sync tags. Please try again."));
            }

            ApiEvent::SlashTagsPurged(Ok(report)) => {
                tracing::info!(deleted = report.deleted, "Slash tags removed");
                self.show_toast(Toast::success(format!(
                    "Removed {} tags containing '/'",
                    report.deleted
                )));
                self.load_tags();
            }
            ApiEvent::SlashTagsPurged(Err(e)) => {
                tracing::error!(error = %e, "Failed to remove slash tags");
                self.show_toast(Toast::error("Failed to remove tags. Please try again."));
            }

            ApiEvent::GamesLoaded {
                catalogue,
                result: Ok(games),
            } => {
                let count = games.len();
                tracing::info!(catalogue = catalogue.label(), count, "Games loaded");
                self.browser_mut(catalogue).set_games(games);
                if count > 0 {
                    self.show_toast(Toast::success(format!("Loaded {count} games")));
                } else {
                    self.show_toast(Toast::info("No games found"));
                }
            }
            ApiEvent::GamesLoaded {
                catalogue,
                result: Err(e),
            } => {
                tracing::error!(catalogue = catalogue.label(), error = %e, "Failed to load games");
                self.browser_mut(catalogue).set_unavailable();
                self.show_toast(Toast::error("Failed to load games. Please try again."));
            }

            ApiEvent::GameDeleted {
                catalogue,
                code,
                result: Ok(()),
            } => {
                self.show_toast(Toast::success(format!("Deleted game: {code}")));
                self.browser_mut(catalogue).clear_selection();
                self.load_games(catalogue);
            }
            ApiEvent::GameDeleted {
                catalogue,
                code,
                result: Err(e),
            } => {
                tracing::error!(catalogue = catalogue.label(), code = %code, error = %e, "Failed to delete game");
                self.show_toast(Toast::error("Failed to delete game. Please try again."));
            }

            ApiEvent::AllGamesDeleted {
                catalogue,
                result: Ok(report),
            } => {
                tracing::info!(catalogue = catalogue.label(), message = %report.message, "All games deleted");
                self.show_toast(Toast::success(report.message));
                self.browser_mut(catalogue).clear();
            }
            ApiEvent::AllGamesDeleted {
                catalogue,
                result: Err(e),
            } => {
                tracing::error!(catalogue = catalogue.label(), error = %e, "Failed to delete all games");
                self.show_toast(Toast::error(
                    "Failed to delete all games. Please try again.",
                ));
            }

            ApiEvent::TagStatsLoaded {
                catalogue,
                platform,
                result,
            } => {
                // A late result for a closed or reopened modal is dropped
                if self.popup != Popup::TagStats
                    || self.popups.stats.platform.as_ref() != Some(&platform)
                {
                    tracing::debug!(catalogue = catalogue.label(), "Discarding stale tag stats");
                    return;
                }
                match result {
                    Ok(stats) => self.popups.stats.set_stats(stats),
                    Err(e) => {
                        tracing::error!(catalogue = catalogue.label(), error = %e, "Failed to load tag stats");
                        self.popups.stats.set_failed();
                    }
                }
            }

            ApiEvent::GameFetched {
                catalogue,
                platform,
                code,
                result,
            } => match result {
                Ok(Some(record)) => {
                    self.editor_mut(catalogue).show_record(platform, code, record);
                }
                Ok(None) => {
                    tracing::info!(catalogue = catalogue.label(), code = %code, "Game not found, starting a new record");
                    self.editor_mut(catalogue)
                        .show_record(platform, code, GameRecord::blank());
                    self.show_toast(Toast::info(
                        "Game not found. A new record will be created.",
                    ));
                }
                Err(e) => {
                    tracing::error!(catalogue = catalogue.label(), code = %code, error = %e, "Failed to fetch game");
                    self.show_toast(Toast::error(
                        "Failed to fetch game data. Please try again.",
                    ));
                }
            },

            ApiEvent::SearchFinished {
                catalogue,
                result: Ok(results),
            } => {
                tracing::info!(catalogue = catalogue.label(), count = results.len(), "Search finished");
                self.editor_mut(catalogue).show_results(results);
            }
            ApiEvent::SearchFinished {
                catalogue,
                result: Err(e),
            } => {
                tracing::error!(catalogue = catalogue.label(), error = %e, "Search failed");
                self.show_toast(Toast::error("Search failed. Please try again."));
            }

            ApiEvent::GameSaved {
                catalogue,
                code,
                result: Ok(()),
            } => {
                tracing::info!(catalogue = catalogue.label(), code = %code, "Game saved");
                self.show_toast(Toast::success("Game data saved"));
            }
            ApiEvent::GameSaved {
                catalogue,
                code,
                result: Err(e),
            } => {
                tracing::error!(catalogue = catalogue.label(), code = %code, error = %e, "Failed to save game");
                self.show_toast(Toast::error("Failed to save game data. Please try again."));
            }

            ApiEvent::Idle(control) => self.busy.clear(control),
        }
    }
}

#[cfg(test)]
mod tests {
    use tagsite_core::model::DeleteAllReport;
    use tagsite_core::{ApiError, Catalogue, Platform, Tag, TagStats};

    use crate::tui::app::test_support::app;
    use crate::tui::components::ToastKind;
    use crate::tui::popups::StatsView;
    use crate::tui::state::{BusyControl, LoadStatus};

    use super::*;

    fn game(code: &str) -> GameRecord {
        GameRecord {
            code: Some(Some(code.to_string())),
            title_kr: Some(Some(format!("게임 {code}"))),
            ..GameRecord::default()
        }
    }

    fn last_toast(app: &App) -> (ToastKind, String) {
        let toast = app.toasts.iter().next_back().expect("a toast");
        (toast.kind, toast.message.clone())
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_catalogue() {
        let mut app = app();
        assert!(app.browser(Catalogue::Storage).games.is_empty());
        app.request_delete_all(Catalogue::Storage);
        assert_eq!(app.popup, Popup::Confirm);
        assert!(!app.busy.is_busy(BusyControl::DeleteAll(Catalogue::Storage)));
        app.confirm_pending();
        assert!(app.busy.is_busy(BusyControl::DeleteAll(Catalogue::Storage)));

        app.apply_event(ApiEvent::AllGamesDeleted {
            catalogue: Catalogue::Storage,
            result: Ok(DeleteAllReport {
                message: "Deleted 0 games".to_string(),
            }),
        });
        assert_eq!(
            last_toast(&app),
            (ToastKind::Success, "Deleted 0 games".to_string())
        );
        let browser = app.browser(Catalogue::Storage);
        assert!(browser.games.is_empty());
        assert!(browser.detail.is_none());
    }

    #[tokio::test]
    async fn test_games_loaded_then_failure_marks_unavailable() {
        let mut app = app();
        app.apply_event(ApiEvent::GamesLoaded {
            catalogue: Catalogue::Document,
            result: Ok(vec![game("RJ1"), game("RJ2")]),
        });
        assert_eq!(
            last_toast(&app),
            (ToastKind::Success, "Loaded 2 games".to_string())
        );
        assert_eq!(app.browser(Catalogue::Document).visible.len(), 2);
        // The other catalogue is untouched
        assert!(app.browser(Catalogue::Storage).games.is_empty());

        app.apply_event(ApiEvent::GamesLoaded {
            catalogue: Catalogue::Document,
            result: Err(ApiError::Status(500)),
        });
        let browser = app.browser(Catalogue::Document);
        assert_eq!(browser.status, LoadStatus::Unavailable);
        assert!(browser.games.is_empty());
        assert_eq!(last_toast(&app).0, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_empty_game_list_is_a_notice() {
        let mut app = app();
        app.apply_event(ApiEvent::GamesLoaded {
            catalogue: Catalogue::Storage,
            result: Ok(Vec::new()),
        });
        assert_eq!(last_toast(&app).0, ToastKind::Info);
        assert_eq!(app.browser(Catalogue::Storage).status, LoadStatus::Ready);
    }

    #[tokio::test]
    async fn test_not_found_opens_blank_record() {
        let mut app = app();
        app.apply_event(ApiEvent::GameFetched {
            catalogue: Catalogue::Storage,
            platform: Platform::new("rj"),
            code: "RJ404".to_string(),
            result: Ok(None),
        });
        let editor = app.editor(Catalogue::Storage);
        assert!(editor.form_visible);
        assert_eq!(editor.record.as_ref(), Some(&GameRecord::blank()));
        assert_eq!(
            editor.current,
            Some((Platform::new("rj"), "RJ404".to_string()))
        );
        assert_eq!(last_toast(&app).0, ToastKind::Info);
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_editor_untouched() {
        let mut app = app();
        app.apply_event(ApiEvent::GameFetched {
            catalogue: Catalogue::Document,
            platform: Platform::new("rj"),
            code: "RJ1".to_string(),
            result: Err(ApiError::Status(503)),
        });
        let editor = app.editor(Catalogue::Document);
        assert!(editor.record.is_none());
        assert!(!editor.form_visible);
        assert_eq!(last_toast(&app).0, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_add_form_upsert_resets_form_and_reloads() {
        let mut app = app();
        app.tags.new_jp.set("巨乳");
        app.tags.new_kr.set("거유");
        app.tags.new_priority.set("3");
        app.apply_event(ApiEvent::TagUpserted {
            tag: Tag::new("巨乳", "거유", Some(3)),
            origin: UpsertOrigin::AddForm,
            result: Ok(()),
        });
        assert!(app.tags.new_jp.content().is_empty());
        assert_eq!(app.tags.new_priority.content(), "10");
        assert_eq!(
            last_toast(&app).1,
            "Tag updated: 巨乳 → 거유".to_string()
        );
        assert!(app.busy.is_busy(BusyControl::ReloadTags));
    }

    #[tokio::test]
    async fn test_failed_upsert_keeps_add_form() {
        let mut app = app();
        app.tags.new_jp.set("巨乳");
        app.apply_event(ApiEvent::TagUpserted {
            tag: Tag::new("巨乳", "거유", Some(10)),
            origin: UpsertOrigin::AddForm,
            result: Err(ApiError::Status(500)),
        });
        assert_eq!(app.tags.new_jp.content(), "巨乳");
        assert!(!app.busy.is_busy(BusyControl::ReloadTags));
    }

    #[tokio::test]
    async fn test_tag_load_failure_shows_unavailable() {
        let mut app = app();
        app.apply_event(ApiEvent::TagsLoaded(Err(ApiError::Status(500))));
        assert_eq!(app.tags.status, LoadStatus::Unavailable);
        assert_eq!(app.tags.visible_len(), 0);
    }

    #[tokio::test]
    async fn test_stats_for_closed_modal_are_dropped() {
        let mut app = app();
        app.apply_event(ApiEvent::TagStatsLoaded {
            catalogue: Catalogue::Document,
            platform: Platform::new("rj"),
            result: Ok(TagStats::default()),
        });
        assert!(matches!(app.popups.stats.view, StatsView::Loading));

        app.popups.stats.open(Platform::new("rj"));
        app.open_popup(Popup::TagStats);
        app.apply_event(ApiEvent::TagStatsLoaded {
            catalogue: Catalogue::Document,
            platform: Platform::new("rj"),
            result: Err(ApiError::Status(500)),
        });
        assert!(matches!(app.popups.stats.view, StatsView::Failed));
    }

    #[test]
    fn test_idle_releases_control() {
        let mut app = app();
        app.busy.mark(BusyControl::SaveGame(Catalogue::Storage));
        app.apply_event(ApiEvent::Idle(BusyControl::SaveGame(Catalogue::Storage)));
        assert!(app.busy.is_empty());
    }
}
