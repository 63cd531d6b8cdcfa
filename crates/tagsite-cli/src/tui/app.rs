//! Application state and main loop

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tagsite_core::{ApiClient, Catalogue, Config};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::tui::components::{Toast, ToastQueue};
use crate::tui::polling::ApiEvent;
use crate::tui::popups::{ConfirmPopup, HelpPopup, TagStatsPopup};
use crate::tui::state::{BrowserState, BusySet, EditorState, PendingAction, TagTableState};
use crate::tui::themes::Theme;

const TICK: Duration = Duration::from_millis(100);

/// Top-level views; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tags,
    Browse(Catalogue),
    Edit(Catalogue),
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Tags,
        Tab::Browse(Catalogue::Storage),
        Tab::Edit(Catalogue::Storage),
        Tab::Browse(Catalogue::Document),
        Tab::Edit(Catalogue::Document),
    ];

    pub fn title(self) -> String {
        match self {
            Tab::Tags => "Tags".to_string(),
            Tab::Browse(c) => format!("{} List", c.label()),
            Tab::Edit(c) => format!("{} Editor", c.label()),
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Overlays; at most one is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Confirm,
    TagStats,
}

#[derive(Debug, Default)]
pub struct PopupStates {
    pub help: HelpPopup,
    pub confirm: ConfirmPopup,
    pub stats: TagStatsPopup,
}

pub struct App {
    pub(crate) api: ApiClient,
    pub(crate) config: Config,
    pub(crate) theme: Theme,

    pub(crate) tab: Tab,
    pub(crate) popup: Popup,
    pub(crate) popups: PopupStates,
    /// Target of the open confirm dialog, consumed when it is answered
    pub(crate) pending: Option<PendingAction>,

    pub(crate) tags: TagTableState,
    pub(crate) browsers: [BrowserState; 2],
    pub(crate) editors: [EditorState; 2],

    pub(crate) toasts: ToastQueue,
    pub(crate) busy: BusySet,
    pub(crate) events_tx: UnboundedSender<ApiEvent>,
    pub(crate) events_rx: UnboundedReceiver<ApiEvent>,

    /// Rows available to the list in the active view, updated on render
    pub(crate) list_height: usize,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(api: ApiClient, config: Config) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let platforms = config.platforms.clone();
        let initial = config.default_platform.clone();
        let browser = |c| BrowserState::new(c, &platforms, &initial);
        let editor = |c| EditorState::new(c, &platforms, &initial);

        Self {
            api,
            theme: Theme::default(),
            tab: Tab::Tags,
            popup: Popup::None,
            popups: PopupStates::default(),
            pending: None,
            tags: TagTableState::new(),
            browsers: [browser(Catalogue::Storage), browser(Catalogue::Document)],
            editors: [editor(Catalogue::Storage), editor(Catalogue::Document)],
            toasts: ToastQueue::new(config.toast_duration()),
            busy: BusySet::default(),
            events_tx,
            events_rx,
            list_height: 10,
            should_quit: false,
            config,
        }
    }

    pub fn browser(&self, catalogue: Catalogue) -> &BrowserState {
        &self.browsers[catalogue.index()]
    }

    pub fn browser_mut(&mut self, catalogue: Catalogue) -> &mut BrowserState {
        &mut self.browsers[catalogue.index()]
    }

    pub fn editor(&self, catalogue: Catalogue) -> &EditorState {
        &self.editors[catalogue.index()]
    }

    pub fn editor_mut(&mut self, catalogue: Catalogue) -> &mut EditorState {
        &mut self.editors[catalogue.index()]
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Switch tabs. No data is fetched; each view loads on demand.
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            tracing::debug!(tab = %tab.title(), "Switching tab");
            self.tab = tab;
        }
    }

    pub fn open_popup(&mut self, popup: Popup) {
        self.popup = popup;
    }

    /// Close the open overlay. Closing a confirm dialog drops its target.
    pub fn close_popup(&mut self) {
        if self.popup == Popup::Confirm {
            self.pending = None;
        }
        self.popup = Popup::None;
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);
        let mut dirty = true;

        while !self.should_quit {
            if dirty {
                terminal.draw(|f| self.ui(f))?;
                dirty = false;
            }

            tokio::select! {
                _ = tick.tick() => {
                    dirty |= self.on_tick();
                }
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            self.handle_key(key);
                            dirty = true;
                        }
                        Some(Ok(Event::Paste(text))) => {
                            self.handle_paste(&text);
                            dirty = true;
                        }
                        Some(Ok(Event::Resize(_, _))) => dirty = true,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::error!(error = %e, "Terminal event stream failed");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }
}

/// Put the terminal into TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        crossterm::event::EnableBracketedPaste
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        crossterm::event::DisableBracketedPaste,
        LeaveAlternateScreen,
        crossterm::cursor::Show
    );
}

/// Run the dashboard until the user quits
pub async fn run(config: Config) -> Result<()> {
    let api = ApiClient::new(&config.api_url, config.request_timeout())
        .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
    let mut app = App::new(api, config);

    let mut terminal = setup_terminal()?;
    // Restores the shell even if the loop panics
    let _restore = scopeguard::guard((), |_| restore_terminal());

    app.load_tags();
    let result = app.run_loop(&mut terminal).await;
    tracing::info!("Shutting down");
    result
}


#[cfg(test)]
mod tests {
    use super::test_support::app;
    use super::*;

    #[test]
    fn test_tab_order_and_titles() {
        assert_eq!(Tab::ALL.len(), 5);
        assert_eq!(Tab::Edit(Catalogue::Document).index(), 4);
        assert_eq!(Tab::Browse(Catalogue::Storage).title(), "Storage List");
    }

    #[test]
    fn test_closing_confirm_drops_pending() {
        let mut app = app();
        app.pending = Some(PendingAction::SyncTags);
        app.open_popup(Popup::Confirm);
        app.close_popup();
        assert_eq!(app.popup, Popup::None);
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_switching_tab_keeps_state() {
        let mut app = app();
        app.browser_mut(Catalogue::Document).filter.set("abc");
        app.switch_tab(Tab::Edit(Catalogue::Storage));
        app.switch_tab(Tab::Browse(Catalogue::Document));
        assert_eq!(app.browser(Catalogue::Document).filter.content(), "abc");
        assert!(app.busy.is_empty());
    }
}
