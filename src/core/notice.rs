//! # Notices
//!
//! Transient, auto-expiring messages shown between the log and the input.
//! There is one slot: showing a notice replaces whatever is there and
//! restarts its lifetime.
//!
//! Each notice gets a fresh generation number. The event loop schedules the
//! dismissal for that generation, and [`NoticeBoard::expire`] ignores any
//! generation that is no longer current, so a dismissal scheduled for an
//! older notice can never hide a newer one.

use std::time::{Duration, Instant};

/// How long a notice stays up before it is dismissed automatically.
pub const NOTICE_DURATION: Duration = Duration::from_millis(5000);

pub const EMPTY_MESSAGE: &str = "Please enter a message before sending.";
pub const UNSENT_MESSAGE: &str = "You have an unsent message. Quit again to discard it.";

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub message: String,
    pub expiry: Instant,
    pub generation: u64,
}

#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<ErrorNotice>,
    generation: u64,
    duration: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            generation: 0,
            duration,
        }
    }

    /// Replace the live notice with `message` and restart its lifetime.
    pub fn show(&mut self, message: impl Into<String>) -> &ErrorNotice {
        self.generation += 1;
        self.current.insert(ErrorNotice {
            message: message.into(),
            expiry: Instant::now() + self.duration,
            generation: self.generation,
        })
    }

    /// Hide the live notice. Returns `false` when nothing was visible.
    pub fn hide(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Dismissal for `generation` fired. Only hides if it is still the live notice.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(notice) if notice.generation == generation => self.hide(),
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&ErrorNotice> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
