//! # Surfaces
//!
//! The two collaborators the [`Conversation`](super::conversation::Conversation)
//! drives. Neither knows about the other, and neither owns conversation
//! state: the controller is handed `&mut` references to both on every
//! operation.
//!
//! The TUI implements these with `InputBox` and `MessageListState`; tests
//! implement them with recording fakes.

use crate::core::notice::ErrorNotice;
use crate::core::turn::Turn;

/// Where the user types.
pub trait InputSurface {
    /// Current raw buffer contents.
    fn text(&self) -> &str;

    /// Empty the buffer and reset anything derived from it (counter, cursor).
    fn clear(&mut self);

    /// Accept or refuse editing.
    fn set_enabled(&mut self, enabled: bool);

    /// Reflect whether pressing Enter would send right now.
    fn set_submit_enabled(&mut self, enabled: bool);

    fn focus(&mut self);
}

/// The append-only log plus its transient indicators.
pub trait RenderSurface {
    fn append_turn(&mut self, turn: &Turn);

    /// Show or hide the "agent is composing" indicator.
    fn set_composing(&mut self, composing: bool);

    fn show_notice(&mut self, notice: &ErrorNotice);

    fn hide_notice(&mut self);
}
