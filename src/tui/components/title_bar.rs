//! # TitleBar Component
//!
//! Top status line: who you are talking to, where, and what is going on.
//!
//! ```text
//! Palaver @ http://localhost:8000 | connected | 4 turns | waiting for reply
//! ```
//!
//! Stateless: every field is a prop set by the parent each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Result of the startup health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Checking,
    Connected,
    Unreachable,
}

impl Connection {
    pub fn label(&self) -> &'static str {
        match self {
            Connection::Checking => "checking…",
            Connection::Connected => "connected",
            Connection::Unreachable => "unreachable",
        }
    }

    fn color(&self) -> Color {
        match self {
            Connection::Checking => Color::DarkGray,
            Connection::Connected => Color::Green,
            Connection::Unreachable => Color::Red,
        }
    }
}

pub struct TitleBar<'a> {
    pub assistant_name: &'a str,
    pub endpoint: &'a str,
    pub connection: Connection,
    pub turn_count: usize,
    pub in_flight: bool,
}

impl TitleBar<'_> {
    pub fn text(&self) -> String {
        self.spans()
            .iter()
            .map(|s| s.content.as_ref())
            .collect()
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let sep = || Span::raw(" | ");
        let mut spans = vec![
            Span::raw(format!("{} @ {}", self.assistant_name, self.endpoint)),
            sep(),
            Span::styled(
                self.connection.label(),
                Style::default().fg(self.connection.color()),
            ),
        ];
        if self.turn_count > 0 {
            spans.push(sep());
            let noun = if self.turn_count == 1 { "turn" } else { "turns" };
            spans.push(Span::raw(format!("{} {}", self.turn_count, noun)));
        }
        if self.in_flight {
            spans.push(sep());
            spans.push(Span::styled("waiting for reply", Style::default().fg(Color::Yellow)));
        }
        spans
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}
