//! # Actions
//!
//! Everything that can happen to the conversation becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Endpoint answers? That's `Action::ReplyReceived { .. }`.
//!
//! `update()` applies an action to the [`Conversation`] and returns the
//! [`Effect`] the event loop must carry out (spawn the request, schedule a
//! notice dismissal, quit). No I/O happens here.
//!
//! ```text
//! Conversation + Action  →  update()  →  Effect
//! ```

use std::time::Duration;

use crate::core::conversation::{Conversation, PendingTurn};
use crate::core::surface::{InputSurface, RenderSurface};
use crate::endpoint::EndpointError;

#[derive(Debug)]
pub enum Action {
    /// Enter pressed in the input.
    Submit,
    /// The input buffer changed.
    InputEdited,
    /// The endpoint call for `turn` settled.
    ReplyReceived {
        turn: PendingTurn,
        outcome: Result<String, EndpointError>,
    },
    /// The dismissal scheduled for notice `generation` fired.
    NoticeExpired { generation: u64 },
    DismissNotice,
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Send the message to the endpoint and report back with `ReplyReceived`.
    Dispatch(PendingTurn),
    /// Report `NoticeExpired { generation }` after `after`.
    ScheduleDismiss { generation: u64, after: Duration },
    Quit,
}

pub fn update(
    conversation: &mut Conversation,
    action: Action,
    input: &mut dyn InputSurface,
    render: &mut dyn RenderSurface,
) -> Effect {
    match action {
        Action::Submit => conversation.submit(input, render),
        Action::InputEdited => {
            conversation.refresh_affordances(input);
            Effect::None
        }
        Action::ReplyReceived { turn, outcome } => {
            conversation.reconcile(turn, outcome, input, render)
        }
        Action::NoticeExpired { generation } => {
            conversation.notice_expired(generation, render);
            Effect::None
        }
        Action::DismissNotice => {
            conversation.hide_notice(render);
            Effect::None
        }
        Action::Quit => conversation.request_quit(input, render),
    }
}
