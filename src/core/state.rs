//! # Conversation State
//!
//! ```text
//! ConversationState
//! ├── in_flight: bool            // a request is out and not yet reconciled
//! ├── pending_text: String       // the message awaiting a reply ("" when idle)
//! └── last_error_visible: bool   // a notice is currently shown
//! ```
//!
//! Owned by the `Conversation` and only changed through its operations.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub in_flight: bool,
    pub pending_text: String,
    pub last_error_visible: bool,
}

/// Where a submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

impl ConversationState {
    pub fn phase(&self) -> Phase {
        if self.in_flight {
            Phase::Submitting
        } else {
            Phase::Idle
        }
    }
}
