//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::notice::ErrorNotice;
use crate::core::surface::{InputSurface, RenderSurface};
use crate::core::turn::{Role, Turn};
use crate::endpoint::{Endpoint, EndpointError};

/// Input surface that just records what the controller did to it.
#[derive(Debug, Default)]
pub struct RecordingInput {
    pub buffer: String,
    pub enabled: bool,
    pub submit_enabled: bool,
    pub focused: bool,
}

impl RecordingInput {
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            enabled: true,
            submit_enabled: !text.trim().is_empty(),
            focused: true,
        }
    }
}

impl InputSurface for RecordingInput {
    fn text(&self) -> &str {
        &self.buffer
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focused = false;
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Appended(Role, String),
    Composing(bool),
    NoticeShown(String),
    NoticeHidden,
}

/// Render surface that keeps the appended turns plus an ordered event log.
#[derive(Debug, Default)]
pub struct RecordingRender {
    pub turns: Vec<Turn>,
    pub composing: bool,
    pub notice: Option<String>,
    pub events: Vec<RenderEvent>,
}

impl RenderSurface for RecordingRender {
    fn append_turn(&mut self, turn: &Turn) {
        self.events
            .push(RenderEvent::Appended(turn.role, turn.text.clone()));
        self.turns.push(turn.clone());
    }

    fn set_composing(&mut self, composing: bool) {
        self.events.push(RenderEvent::Composing(composing));
        self.composing = composing;
    }

    fn show_notice(&mut self, notice: &ErrorNotice) {
        self.events
            .push(RenderEvent::NoticeShown(notice.message.clone()));
        self.notice = Some(notice.message.clone());
    }

    fn hide_notice(&mut self) {
        self.events.push(RenderEvent::NoticeHidden);
        self.notice = None;
    }
}

/// Endpoint that answers from a script and remembers what it was sent.
pub struct ScriptedEndpoint {
    outcomes: Mutex<VecDeque<Result<String, EndpointError>>>,
    received: Mutex<Vec<String>>,
}

impl ScriptedEndpoint {
    pub fn new(outcomes: Vec<Result<String, EndpointError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Endpoint for ScriptedEndpoint {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send_message(&self, message: &str) -> Result<String, EndpointError> {
        self.received.lock().unwrap().push(message.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EndpointError::Transport("script exhausted".into())))
    }
}
