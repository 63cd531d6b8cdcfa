//! Popup keyboard handlers

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Popup};

impl App {
    pub(crate) fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::None => {}
            Popup::Help => match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter | KeyCode::Char('q') => {
                    self.close_popup()
                }
                KeyCode::Up | KeyCode::Char('k') => self.popups.help.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.popups.help.scroll_down(),
                _ => {}
            },
            Popup::TagStats => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.close_popup(),
                KeyCode::Up | KeyCode::Char('k') => self.popups.stats.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => self.popups.stats.scroll_down(),
                _ => {}
            },
            Popup::Confirm => match key.code {
                KeyCode::Esc | KeyCode::Char('n') => self.close_popup(),
                KeyCode::Char('y') => self.confirm_pending(),
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                    self.popups.confirm.toggle()
                }
                KeyCode::Enter => {
                    if self.popups.confirm.confirm_focused {
                        self.confirm_pending();
                    } else {
                        self.close_popup();
                    }
                }
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tagsite_core::{Catalogue, GameRecord};

    use super::*;
    use crate::tui::app::test_support::app;
    use crate::tui::state::{BusyControl, PendingAction};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_on_cancel_closes_without_action() {
        let mut app = app();
        app.request_delete_all(Catalogue::Storage);
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.popup, Popup::None);
        assert!(app.busy.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_dispatches_delete_for_shown_record() {
        let mut app = app();
        let browser = app.browser_mut(Catalogue::Document);
        browser.set_games(vec![GameRecord {
            code: Some(Some("RJ9".to_string())),
            ..GameRecord::default()
        }]);
        browser.select_record(0);

        app.request_delete_selected(Catalogue::Document);
        assert!(matches!(
            app.pending,
            Some(PendingAction::DeleteOne { ref code, .. }) if code == "RJ9"
        ));

        app.handle_key(press(KeyCode::Right));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.popup, Popup::None);
        assert!(app.pending.is_none());
        assert!(app.busy.is_busy(BusyControl::DeleteGame(Catalogue::Document)));
    }

    #[test]
    fn test_delete_without_selection_does_nothing() {
        let mut app = app();
        app.request_delete_selected(Catalogue::Storage);
        assert_eq!(app.popup, Popup::None);
    }
}
