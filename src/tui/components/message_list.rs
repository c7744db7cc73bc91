//! # MessageList Component
//!
//! The render surface: a scrollable, append-only view of the conversation.
//!
//! ## Responsibilities
//!
//! - Keep the turns handed over by the conversation, in order
//! - Show the composing indicator and hold the live notice text
//! - Scroll, and pin the view to the newest turn after an append
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) plus props.
//!
//! ## Pinning
//!
//! An append only sets `pin_pending`. The next render measures every turn
//! first and then scrolls to the real bottom, so the pin always uses the
//! settled layout instead of a guess made before the new turn was measured.
//!
//! ## Height cap
//!
//! The scroll buffer is a ratatui `Buffer`, so it is at most `u16::MAX`
//! rows tall. When the session outgrows that, only the newest turns that
//! fit are drawn; older ones stay in `turns` but leave the scroll window.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::notice::ErrorNotice;
use crate::core::surface::RenderSurface;
use crate::core::turn::{Role, Turn};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{Message, role_style};
use crate::tui::event::TuiEvent;

const SPINNER: [&str; 4] = ["·  ", "·· ", "···", " ··"];
/// Rows taken by the composing indicator while it is visible.
const COMPOSING_HEIGHT: u16 = 1;
/// Tallest scroll buffer ratatui can address.
const MAX_CONTENT_HEIGHT: u32 = u16::MAX as u32;

pub struct MessageListState {
    /// Turns in the order they were appended
    pub turns: Vec<Turn>,
    pub composing: bool,
    /// Live notice text, drawn by the NoticeBar
    pub notice: Option<String>,
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// When true, stay attached to the bottom as content grows
    pub stick_to_bottom: bool,
    /// Set by an append; consumed by the next render once heights are known
    pin_pending: bool,
    /// Cached per-turn heights from the last render
    pub heights: Vec<u16>,
    /// First turn inside the scroll window (older turns no longer fit)
    window_start: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            composing: false,
            notice: None,
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            pin_pending: false,
            heights: Vec::new(),
            window_start: 0,
            viewport_height: 0,
        }
    }

    pub fn is_pin_pending(&self) -> bool {
        self.pin_pending
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    fn composing_height(&self) -> u16 {
        if self.composing { COMPOSING_HEIGHT } else { 0 }
    }

    fn content_height(&self) -> u16 {
        let turns: u32 = self
            .heights
            .iter()
            .skip(self.window_start)
            .map(|&h| u32::from(h))
            .sum();
        let total = turns + u32::from(self.composing_height());
        u16::try_from(total).unwrap_or(u16::MAX)
    }

    /// Newest suffix of `heights` that fits the scroll buffer. Always keeps
    /// the last turn, even when it alone fills the buffer.
    fn fit_window(&mut self) {
        let mut used = u32::from(self.composing_height());
        let mut start = self.heights.len();
        while start > 0 {
            let next = used + u32::from(self.heights[start - 1]);
            if next > MAX_CONTENT_HEIGHT && start < self.heights.len() {
                break;
            }
            used = next;
            start -= 1;
        }
        self.window_start = start;
    }

    fn max_offset(&self) -> u16 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    fn set_offset_y(&mut self, y: u16) {
        self.scroll_state.set_offset(Position { x: 0, y });
    }

    pub fn scroll_to_bottom(&mut self) {
        let max_y = self.max_offset();
        self.set_offset_y(max_y);
        self.stick_to_bottom = true;
    }

    fn scroll_up_by(&mut self, rows: u16) {
        let y = self.scroll_state.offset().y.saturating_sub(rows);
        self.set_offset_y(y);
        self.stick_to_bottom = false;
    }

    /// Scroll down, re-pinning to the bottom once it is reached.
    fn scroll_down_by(&mut self, rows: u16) {
        let max_y = self.max_offset();
        let y = self.scroll_state.offset().y.saturating_add(rows).min(max_y);
        self.set_offset_y(y);
        self.stick_to_bottom = y >= max_y;
    }
}

impl RenderSurface for MessageListState {
    fn append_turn(&mut self, turn: &Turn) {
        self.turns.push(turn.clone());
        self.pin_pending = true;
    }

    fn set_composing(&mut self, composing: bool) {
        self.composing = composing;
        if composing {
            self.pin_pending = true;
        }
    }

    fn show_notice(&mut self, notice: &ErrorNotice) {
        self.notice = Some(notice.message.clone());
    }

    fn hide_notice(&mut self) {
        self.notice = None;
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        let page = self.viewport_height.saturating_sub(1).max(1);
        match event {
            TuiEvent::ScrollUp => self.scroll_up_by(1),
            TuiEvent::ScrollDown => self.scroll_down_by(1),
            TuiEvent::ScrollPageUp => self.scroll_up_by(page),
            TuiEvent::ScrollPageDown => self.scroll_down_by(page),
            _ => return None,
        }
        Some(())
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub assistant_name: &'a str,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, assistant_name: &'a str, spinner_frame: usize) -> Self {
        Self {
            state,
            assistant_name,
            spinner_frame,
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let hint = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Say hello to {}", self.assistant_name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Enter sends · Shift+Enter new line · Esc quits",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        let top = area.height.saturating_sub(2) / 2;
        let hint_area = Rect {
            y: area.y + top,
            height: area.height.saturating_sub(top),
            ..area
        };
        frame.render_widget(hint, hint_area);
    }

    fn composing_line(&self) -> Line<'static> {
        let dots = SPINNER[self.spinner_frame % SPINNER.len()];
        Line::from(Span::styled(
            format!("{} is composing {}", self.assistant_name, dots),
            role_style(Role::Agent).add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport_height = area.height;

        if self.state.turns.is_empty() && !self.state.composing {
            self.state.heights.clear();
            self.state.window_start = 0;
            self.render_empty(frame, area);
            return;
        }

        // Leave a column for the scrollbar
        let content_width = area.width.saturating_sub(1);

        // Measure first; pinning below depends on these heights
        self.state.heights = self
            .state
            .turns
            .iter()
            .map(|turn| Message::calculate_height(turn, content_width))
            .collect();
        self.state.fit_window();
        let total_height = self.state.content_height();

        if self.state.pin_pending || self.state.stick_to_bottom {
            self.state.scroll_to_bottom();
            self.state.pin_pending = false;
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let start = self.state.window_start;
        let mut y: u16 = 0;
        for (turn, &height) in self.state.turns[start..].iter().zip(&self.state.heights[start..]) {
            let rect = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(Message::new(turn, self.assistant_name), rect);
            y = y.saturating_add(height);
        }

        if self.state.composing && y < total_height {
            let rect = Rect::new(0, y, content_width, COMPOSING_HEIGHT);
            scroll_view.render_widget(Paragraph::new(self.composing_line()), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
