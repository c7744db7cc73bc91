//! Non-interactive mode: send one message, print the reply, exit.
//!
//! Runs the same [`Conversation`] lifecycle as the TUI against plain
//! in-memory surfaces, so validation and failure classification behave
//! identically.

use crate::core::conversation::Conversation;
use crate::core::notice::{ErrorNotice, NoticeBoard};
use crate::core::surface::{InputSurface, RenderSurface};
use crate::core::turn::{Role, Turn};
use crate::endpoint::Endpoint;

/// Input surface holding a fixed message.
#[derive(Debug, Default)]
pub struct LineInput {
    text: String,
}

impl LineInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl InputSurface for LineInput {
    fn text(&self) -> &str {
        &self.text
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn focus(&mut self) {}
}

/// Render surface that keeps the agent's reply and the last notice.
#[derive(Debug, Default)]
pub struct ReplyCollector {
    pub reply: Option<String>,
    pub notice: Option<String>,
}

impl RenderSurface for ReplyCollector {
    fn append_turn(&mut self, turn: &Turn) {
        if turn.role == Role::Agent {
            self.reply = Some(turn.text.clone());
        }
    }

    fn set_composing(&mut self, _composing: bool) {}

    fn show_notice(&mut self, notice: &ErrorNotice) {
        self.notice = Some(notice.message.clone());
    }

    fn hide_notice(&mut self) {
        self.notice = None;
    }
}

/// Send `message` once. `Ok` holds the reply, `Err` the user-facing notice.
pub async fn send_once(endpoint: &dyn Endpoint, message: &str) -> Result<String, String> {
    let mut conversation = Conversation::new(NoticeBoard::default());
    let mut input = LineInput::new(message);
    let mut render = ReplyCollector::default();

    // No dismissal to schedule: the process exits right after
    conversation.converse(endpoint, &mut input, &mut render).await;

    match (render.reply, render.notice) {
        (Some(reply), _) => Ok(reply),
        (None, Some(notice)) => Err(notice),
        (None, None) => Err(crate::core::failure::GENERIC_MESSAGE.to_string()),
    }
}
