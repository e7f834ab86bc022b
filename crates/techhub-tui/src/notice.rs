//! Transient user notices (toast equivalent).
//!
//! One notice at a time; a new one replaces the old. Notices are
//! fire-and-forget and auto-dismiss on the tick after their display
//! time elapses.

use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct NoticeState {
    current: Option<Notice>,
}

impl NoticeState {
    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.show(NoticeKind::Success, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.show(NoticeKind::Error, title, message);
    }

    fn show(&mut self, kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) {
        self.current = Some(Notice {
            kind,
            title: title.into(),
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drops the notice once its display time has elapsed.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(notice) = &self.current
            && now.duration_since(notice.shown_at) >= NOTICE_TTL
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
