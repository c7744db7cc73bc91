//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! `InputBox` and `MessageListState` are the two surfaces the
//! conversation controller drives; everything else here is plumbing.
//!
//! ## Redraw Strategy
//!
//! - **Composing** (reply pending): draws every ~80ms so the indicator animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   actions, or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod notice_timer;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::{Conversation, PendingTurn};
use crate::core::notice::NoticeBoard;
use crate::endpoint::{Endpoint, EndpointError};
use crate::tui::component::EventHandler;
use crate::tui::components::{Connection, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::notice_timer::NoticeTimer;

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Surfaces driven by the conversation
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // Title bar props
    pub assistant_name: String,
    pub endpoint_label: String,
    pub connection: Connection,
}

impl TuiState {
    pub fn new(assistant_name: impl Into<String>, endpoint_label: impl Into<String>) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            assistant_name: assistant_name.into(),
            endpoint_label: endpoint_label.into(),
            connection: Connection::Checking,
        }
    }
}

/// Runs `restore` when dropped, so an early `?` return from the loop
/// still hands the terminal back in cooked mode.
struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally (allows Shift+Enter detection).
        // Terminals without support ignore it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Carries out the side effect `update()` asked for.
fn apply_effect(
    effect: Effect,
    endpoint: &Arc<dyn Endpoint>,
    timer: &mut NoticeTimer,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Dispatch(turn) => spawn_request(endpoint.clone(), turn, tx.clone()),
        Effect::ScheduleDismiss { generation, after } => timer.schedule(generation, after, tx.clone()),
        Effect::Quit => return true,
    }
    false
}

pub fn run(config: ResolvedConfig, endpoint: Arc<dyn Endpoint>) -> std::io::Result<()> {
    let mut conversation = Conversation::new(NoticeBoard::new(config.notice_duration));
    let mut tui = TuiState::new(config.assistant_name.as_str(), config.base_url.as_str());

    let mut terminal = ratatui::init();
    let _restore = RestoreGuard::new(ratatui::restore);
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut notice_timer = NoticeTimer::new();

    let health_rx = spawn_health_check(endpoint.clone());

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        let animating = conversation.state().in_flight;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 6.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &conversation, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::Quit => Action::Quit,
                TuiEvent::DismissNotice => Action::DismissNotice,
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                    continue;
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit) => Action::Submit,
                    Some(InputEvent::ContentChanged) => Action::InputEdited,
                    Some(InputEvent::CursorMoved) | None => continue,
                },
            };

            let effect = update(&mut conversation, action, &mut tui.input_box, &mut tui.message_list);
            if apply_effect(effect, &endpoint, &mut notice_timer, &tx) {
                should_quit = true;
                break;
            }
        }

        if let Ok(healthy) = health_rx.try_recv() {
            tui.connection = if healthy {
                Connection::Connected
            } else {
                Connection::Unreachable
            };
            needs_redraw = true;
        }

        // Handle background task actions (replies, notice expiry)
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut conversation, action, &mut tui.input_box, &mut tui.message_list);
            should_quit = apply_effect(effect, &endpoint, &mut notice_timer, &tx);
        }
    }

    info!(
        "Leaving after {} turns",
        conversation.transcript().len()
    );
    Ok(())
}

/// Probe the endpoint once; the result lands on the returned channel.
fn spawn_health_check(endpoint: Arc<dyn Endpoint>) -> mpsc::Receiver<bool> {
    let (tx, rx) = mpsc::channel();
    tokio::spawn(async move {
        let healthy = endpoint.health_check().await;
        info!("Health check for {}: {}", endpoint.name(), if healthy { "ok" } else { "failed" });
        let _ = tx.send(healthy);
    });
    rx
}

fn spawn_request(endpoint: Arc<dyn Endpoint>, turn: PendingTurn, tx: mpsc::Sender<Action>) {
    info!("Spawning request for turn {}", turn.id());
    let message = turn.message().to_string();

    // The request runs in its own task so a panic there still settles the turn
    let request = tokio::spawn(async move { endpoint.send_message(&message).await });

    tokio::spawn(async move {
        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Request task for turn {} ended abnormally: {}", turn.id(), e);
                Err(EndpointError::Transport(e.to_string()))
            }
        };
        if tx.send(Action::ReplyReceived { turn, outcome }).is_err() {
            warn!("Failed to send ReplyReceived: receiver dropped");
        }
    });
}
