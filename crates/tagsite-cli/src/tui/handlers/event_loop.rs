//! Tick handling
//!
//! Finished requests and toast expiry are both picked up on the tick.

use std::time::Instant;

use crate::tui::app::App;

impl App {
    /// Periodic housekeeping. Returns true when a redraw is needed.
    pub(crate) fn on_tick(&mut self) -> bool {
        let polled = self.poll_api_events();
        let expired = self.toasts.prune(Instant::now());
        polled.needs_redraw || expired
    }
}
