//! Transient notifications stacked in the bottom-right corner

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::tui::themes::Theme;
use crate::tui::utils::wrap_text;

const MAX_VISIBLE: usize = 4;
const TOAST_WIDTH: u16 = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn title(self) -> &'static str {
        match self {
            ToastKind::Info => "Notice",
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    created: Instant,
}

impl Toast {
    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }
}

/// Live toasts, oldest first
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    /// Drop expired toasts. Returns true if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let ttl = self.ttl;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created) < ttl);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Render toasts newest-lowest, directly into the frame buffer
pub fn render_toasts(buf: &mut Buffer, area: Rect, toasts: &ToastQueue, theme: &Theme) {
    if toasts.is_empty() {
        return;
    }
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    if width < 10 {
        return;
    }
    let text_width = width.saturating_sub(4) as usize;
    // Leave the status bar row free
    let mut bottom = area.y + area.height.saturating_sub(1);

    for toast in toasts.iter().rev() {
        let body = wrap_text(&toast.message, text_width);
        let height = body.len() as u16 + 3;
        if bottom < area.y + height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: bottom - height,
            width,
            height,
        };
        bottom -= height;

        let color = match toast.kind {
            ToastKind::Info => theme.info_color,
            ToastKind::Success => theme.success_color,
            ToastKind::Error => theme.error_color,
        };

        let mut lines = vec![Line::from(Span::styled(
            toast.kind.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            body.into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.text_color)))),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.status_bar_bg_color));

        Clear.render(rect, buf);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(rect, buf);
    }
}
