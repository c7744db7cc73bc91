//! # InputBox Component
//!
//! The input surface: where the user types.
//!
//! ## Responsibilities
//!
//! - Capture text input, up to [`MAX_INPUT_CHARS`]
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter
//! - Show the character counter with its severity colour
//! - Reflect the conversation's enable / submit affordances
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. Enabled, submit-enabled and
//! focus are set by the conversation through [`InputSurface`].

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::surface::InputSurface;
use crate::core::validation::{MAX_INPUT_CHARS, Severity, char_len, counter_label};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_cell,
    inner_width, next_char_boundary, prev_char_boundary, rows,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed. The conversation decides whether anything is sent.
    Submit,
    /// Buffer contents changed; affordances need re-evaluating.
    ContentChanged,
    /// Cursor moved without changing the text.
    CursorMoved,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor position as byte offset in buffer
    cursor: usize,
    /// First visible row when the content is taller than the box
    scroll_offset: u16,
    enabled: bool,
    submit_enabled: bool,
    focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            enabled: true,
            submit_enabled: false,
            focused: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn severity(&self) -> Severity {
        Severity::for_len(char_len(&self.buffer))
    }

    /// Required height for the current buffer, clamped to the visible-line limit.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let content_lines = rows(&self.buffer, inner_width(area_width)).len() as u16;
        content_lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn remaining_capacity(&self) -> usize {
        MAX_INPUT_CHARS.saturating_sub(char_len(&self.buffer))
    }

    fn insert_str(&mut self, text: &str) -> bool {
        let allowed: String = text.chars().take(self.remaining_capacity()).collect();
        if allowed.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.cursor, &allowed);
        self.cursor += allowed.len();
        true
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll_offset(&mut self, cursor_row: u16, total_rows: u16) {
        let max_offset = total_rows.saturating_sub(MAX_VISIBLE_LINES);
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_LINES;
        }
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    fn counter_style(&self) -> Style {
        match self.severity() {
            Severity::Normal => Style::default().fg(Color::DarkGray),
            Severity::Warning => Style::default().fg(Color::Yellow),
            Severity::Critical => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl InputSurface for InputBox {
    fn text(&self) -> &str {
        &self.buffer
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
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
        self.focused = self.enabled;
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let rows = rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_cell(&self.buffer, &rows, self.cursor);
        self.update_scroll_offset(cursor_row, rows.len() as u16);

        let visible: Vec<Line> = rows
            .iter()
            .skip(self.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|r| Line::raw(&self.buffer[r.clone()]))
            .collect();

        let (title, text_style, border_style) = if self.enabled {
            (
                "Message",
                Style::default().fg(Color::Green),
                Style::default(),
            )
        } else {
            (
                "Message (waiting for reply)",
                Style::default().fg(Color::DarkGray),
                Style::default().add_modifier(Modifier::DIM),
            )
        };

        let send_hint = if self.submit_enabled {
            Span::styled(" ⏎ send ", Style::default().fg(Color::Green))
        } else {
            Span::styled(" ⏎ send ", Style::default().fg(Color::DarkGray))
        };
        let counter = Span::styled(format!(" {} ", counter_label(&self.buffer)), self.counter_style());

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_bottom(Line::from(vec![send_hint, counter]).right_aligned())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(visible).block(block).style(text_style);
        frame.render_widget(paragraph, area);

        if self.enabled && self.focused {
            let x = area.x + CONTENT_OFFSET_X + cursor_col.min(width);
            let y = area.y + CONTENT_OFFSET_Y + cursor_row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // Submit always reaches the conversation; it owns the in-flight gate.
        if matches!(event, TuiEvent::Submit) {
            return Some(InputEvent::Submit);
        }
        if !self.enabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp))
                    .then_some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => self.insert_str(text).then_some(InputEvent::ContentChanged),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::CursorMoved
                })
            }
            _ => None,
        }
    }
}
