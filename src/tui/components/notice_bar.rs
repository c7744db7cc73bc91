//! One-line notice strip between the message list and the input.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

/// Rows the bar takes when a notice is live.
pub const NOTICE_HEIGHT: u16 = 1;

pub struct NoticeBar<'a> {
    pub message: &'a str,
}

impl Component for NoticeBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // One row only
        let first_line = self.message.lines().next().unwrap_or_default();
        let line = Line::from(vec![
            Span::styled(
                " ! ",
                Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {first_line}"), Style::default().fg(Color::Red)),
            Span::styled("  (Ctrl+D to dismiss)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(line, area);
    }
}
