//! # Conversation Controller
//!
//! Owns all mutable conversation state and drives the send/receive
//! lifecycle against an [`InputSurface`] and a [`RenderSurface`]:
//!
//! ```text
//!            submit()                      reconcile(Ok)
//!   IDLE ─────────────────▶ SUBMITTING ──────────────────▶ IDLE
//!     ▲  validate, echo,        │       append agent turn
//!     │  disable input          │
//!     │                         │ reconcile(Err)
//!     └─────────────────────────┘ classify, show notice
//! ```
//!
//! `submit` hands back an [`Effect::Dispatch`] carrying a [`PendingTurn`].
//! The caller performs the network call and passes the ticket back into
//! `reconcile` along with the outcome. The ticket is not `Clone`, so each
//! submission is reconciled at most once, and reconciliation always ends
//! with the same cleanup: clear `in_flight`, re-enable and focus the input.

use log::{debug, info, warn};

use crate::core::action::Effect;
use crate::core::failure::classify;
use crate::core::notice::{EMPTY_MESSAGE, NoticeBoard, UNSENT_MESSAGE};
use crate::core::state::ConversationState;
use crate::core::surface::{InputSurface, RenderSurface};
use crate::core::turn::{Transcript, Turn};
use crate::core::validation::can_submit;
use crate::endpoint::{Endpoint, EndpointError};

/// Ticket for a dispatched message. Consumed by [`Conversation::reconcile`].
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTurn {
    id: u64,
    message: String,
}

impl PendingTurn {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The trimmed text to send.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug)]
pub struct Conversation {
    state: ConversationState,
    transcript: Transcript,
    notices: NoticeBoard,
    next_turn_id: u64,
    in_flight_id: Option<u64>,
    /// Generation of the live unsent-draft warning, if one is showing
    departure_warning: Option<u64>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(NoticeBoard::default())
    }
}

impl Conversation {
    pub fn new(notices: NoticeBoard) -> Self {
        Self {
            state: ConversationState::default(),
            transcript: Transcript::new(),
            notices,
            next_turn_id: 1,
            in_flight_id: None,
            departure_warning: None,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn can_submit(&self, text: &str) -> bool {
        can_submit(text, self.state.in_flight)
    }

    /// Re-evaluate the submit affordance. Call after every edit.
    ///
    /// An edit also disarms a pending departure warning: the draft it
    /// warned about is no longer the draft in the buffer.
    pub fn refresh_affordances(&mut self, input: &mut dyn InputSurface) {
        input.set_submit_enabled(self.can_submit(input.text()));
        self.departure_warning = None;
    }

    /// IDLE → SUBMITTING.
    ///
    /// Returns [`Effect::Dispatch`] when the message was accepted. Rejected
    /// submissions never produce a dispatch: while a request is in flight
    /// they are dropped, and an empty message shows a validation notice.
    pub fn submit(
        &mut self,
        input: &mut dyn InputSurface,
        render: &mut dyn RenderSurface,
    ) -> Effect {
        if self.state.in_flight {
            debug!("Submit ignored: request already in flight");
            return Effect::None;
        }

        let message = input.text().trim().to_string();
        if message.is_empty() {
            debug!("Submit rejected: empty message");
            return self.show_notice(EMPTY_MESSAGE, render);
        }

        input.clear();
        input.set_submit_enabled(false);
        self.departure_warning = None;

        let turn = Turn::user(message.clone());
        render.append_turn(&turn);
        self.transcript.push(turn);

        render.set_composing(true);
        self.state.in_flight = true;
        self.state.pending_text = message.clone();
        input.set_enabled(false);

        let id = self.next_turn_id;
        self.next_turn_id += 1;
        self.in_flight_id = Some(id);

        info!(
            "Dispatching turn {} ({} chars)",
            id,
            message.chars().count()
        );
        Effect::Dispatch(PendingTurn { id, message })
    }

    /// SUBMITTING → SUCCESS | FAILURE → IDLE.
    pub fn reconcile(
        &mut self,
        pending: PendingTurn,
        outcome: Result<String, EndpointError>,
        input: &mut dyn InputSurface,
        render: &mut dyn RenderSurface,
    ) -> Effect {
        if self.in_flight_id != Some(pending.id) {
            warn!(
                "Ignoring outcome for turn {} (in flight: {:?})",
                pending.id, self.in_flight_id
            );
            return Effect::None;
        }

        render.set_composing(false);

        let effect = match outcome {
            Ok(reply) => {
                info!("Turn {} answered ({} chars)", pending.id, reply.chars().count());
                let turn = Turn::agent(reply);
                render.append_turn(&turn);
                self.transcript.push(turn);
                Effect::None
            }
            Err(err) => {
                let kind = classify(&err);
                warn!("Turn {} failed: {} ({:?})", pending.id, err, kind);
                self.show_notice(kind.message().to_string(), render)
            }
        };

        self.finish(input);
        effect
    }

    /// Submit, call `endpoint`, and reconcile in one go.
    pub async fn converse(
        &mut self,
        endpoint: &dyn Endpoint,
        input: &mut dyn InputSurface,
        render: &mut dyn RenderSurface,
    ) -> Effect {
        match self.submit(input, render) {
            Effect::Dispatch(pending) => {
                let outcome = endpoint.send_message(pending.message()).await;
                self.reconcile(pending, outcome, input, render)
            }
            other => other,
        }
    }

    fn finish(&mut self, input: &mut dyn InputSurface) {
        self.state.in_flight = false;
        self.state.pending_text.clear();
        self.in_flight_id = None;
        input.set_enabled(true);
        self.refresh_affordances(input);
        input.focus();
    }

    /// Replace the live notice. The returned effect schedules its dismissal.
    pub fn show_notice(
        &mut self,
        message: impl Into<String>,
        render: &mut dyn RenderSurface,
    ) -> Effect {
        let after = self.notices.duration();
        let notice = self.notices.show(message);
        debug!("Notice {} shown: {}", notice.generation, notice.message);
        render.show_notice(notice);
        let generation = notice.generation;
        self.state.last_error_visible = true;
        Effect::ScheduleDismiss { generation, after }
    }

    /// Hide the live notice. No-op when nothing is shown.
    pub fn hide_notice(&mut self, render: &mut dyn RenderSurface) {
        if self.notices.hide() {
            render.hide_notice();
        }
        self.state.last_error_visible = false;
    }

    /// A scheduled dismissal fired. Stale generations are ignored.
    pub fn notice_expired(&mut self, generation: u64, render: &mut dyn RenderSurface) {
        if self.notices.expire(generation) {
            debug!("Notice {} expired", generation);
            render.hide_notice();
            self.state.last_error_visible = false;
        }
    }

    /// Quit requested. With unsent text in the buffer the first request only warns.
    ///
    /// Keyed on the buffer, not on `in_flight`: quitting while a reply is
    /// pending does not warn. The second request only quits while the
    /// warning is still the live notice and the draft is unedited.
    pub fn request_quit(
        &mut self,
        input: &dyn InputSurface,
        render: &mut dyn RenderSurface,
    ) -> Effect {
        if input.text().is_empty() || self.departure_armed() {
            info!("Quit confirmed");
            return Effect::Quit;
        }
        let effect = self.show_notice(UNSENT_MESSAGE, render);
        self.departure_warning = self.notices.current().map(|notice| notice.generation);
        effect
    }

    fn departure_armed(&self) -> bool {
        match (self.departure_warning, self.notices.current()) {
            (Some(generation), Some(notice)) => notice.generation == generation,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::failure::{CONNECTION_MESSAGE, GENERIC_MESSAGE, SERVER_MESSAGE};
    use crate::core::notice::NOTICE_DURATION;
    use crate::core::turn::Role;
    use crate::test_support::{RecordingInput, RecordingRender, RenderEvent, ScriptedEndpoint};

    fn dispatch(effect: Effect) -> PendingTurn {
        match effect {
            Effect::Dispatch(pending) => pending,
            other => panic!("Expected Dispatch, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_echoes_before_dispatch() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("  Hello  ");
        let mut render = RecordingRender::default();

        let pending = dispatch(conv.submit(&mut input, &mut render));

        assert_eq!(pending.message(), "Hello");
        assert!(input.buffer.is_empty());
        assert!(!input.enabled);
        assert!(!input.submit_enabled);
        assert_eq!(
            render.events,
            vec![
                RenderEvent::Appended(Role::User, "Hello".to_string()),
                RenderEvent::Composing(true),
            ]
        );
        assert!(conv.state().in_flight);
        assert_eq!(conv.state().pending_text, "Hello");
        assert_eq!(conv.transcript().len(), 1);
    }

    #[test]
    fn test_whitespace_only_is_rejected_with_notice() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("   ");
        let mut render = RecordingRender::default();

        let effect = conv.submit(&mut input, &mut render);

        assert!(matches!(effect, Effect::ScheduleDismiss { after, .. } if after == NOTICE_DURATION));
        assert!(render.turns.is_empty());
        assert_eq!(render.notice.as_deref(), Some(EMPTY_MESSAGE));
        assert!(!conv.state().in_flight);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_second_submit_while_in_flight_is_dropped() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("first");
        let mut render = RecordingRender::default();

        let _pending = dispatch(conv.submit(&mut input, &mut render));

        input.buffer = "second".to_string();
        let effect = conv.submit(&mut input, &mut render);

        assert_eq!(effect, Effect::None);
        assert_eq!(render.turns.len(), 1);
        assert_eq!(input.buffer, "second");
        assert!(!conv.can_submit("second"));
    }

    #[test]
    fn test_success_appends_agent_turn_and_restores_input() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("Hello");
        let mut render = RecordingRender::default();

        let pending = dispatch(conv.submit(&mut input, &mut render));
        let effect = conv.reconcile(pending, Ok("Hi!".to_string()), &mut input, &mut render);

        assert_eq!(effect, Effect::None);
        let texts: Vec<_> = render.turns.iter().map(|t| (t.role, t.text.as_str())).collect();
        assert_eq!(texts, vec![(Role::User, "Hello"), (Role::Agent, "Hi!")]);
        assert!(!render.composing);
        assert!(input.enabled);
        assert!(input.focused);
        assert!(input.buffer.is_empty());
        assert!(!input.submit_enabled);
        assert!(!conv.state().in_flight);
        assert!(conv.state().pending_text.is_empty());
    }

    #[test]
    fn test_reply_is_kept_verbatim() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("markup?");
        let mut render = RecordingRender::default();
        let reply = "  <script>alert(1)</script>\u{1b}[31m **bold**\n";

        let pending = dispatch(conv.submit(&mut input, &mut render));
        conv.reconcile(pending, Ok(reply.to_string()), &mut input, &mut render);

        assert_eq!(render.turns[1].text, reply);
        assert_eq!(conv.transcript().last().map(|t| t.text.as_str()), Some(reply));
    }

    #[test]
    fn test_failure_keeps_echo_and_shows_classified_notice() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("Test");
        let mut render = RecordingRender::default();

        let pending = dispatch(conv.submit(&mut input, &mut render));
        let effect = conv.reconcile(
            pending,
            Err(EndpointError::Transport("connection refused".into())),
            &mut input,
            &mut render,
        );

        assert!(matches!(effect, Effect::ScheduleDismiss { .. }));
        assert_eq!(render.turns.len(), 1);
        assert_eq!(render.turns[0].role, Role::User);
        assert_eq!(render.notice.as_deref(), Some(CONNECTION_MESSAGE));
        assert!(input.enabled);
        assert!(conv.state().last_error_visible);
        assert!(!conv.state().in_flight);
    }

    #[test]
    fn test_server_error_without_body() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("X");
        let mut render = RecordingRender::default();

        let pending = dispatch(conv.submit(&mut input, &mut render));
        conv.reconcile(
            pending,
            Err(EndpointError::Status { status: 500, detail: None }),
            &mut input,
            &mut render,
        );

        assert_eq!(render.notice.as_deref(), Some(SERVER_MESSAGE));
    }

    #[test]
    fn test_success_does_not_clear_live_notice() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("again");
        let mut render = RecordingRender::default();

        conv.show_notice("earlier problem", &mut render);
        let pending = dispatch(conv.submit(&mut input, &mut render));
        conv.reconcile(pending, Ok("ok".into()), &mut input, &mut render);

        assert_eq!(render.notice.as_deref(), Some("earlier problem"));
        assert!(conv.state().last_error_visible);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut other = Conversation::default();
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("one");
        let mut render = RecordingRender::default();

        let mut scratch_input = RecordingInput::with_text("elsewhere");
        let mut scratch_render = RecordingRender::default();
        let mut foreign = dispatch(other.submit(&mut scratch_input, &mut scratch_render));
        foreign.id += 100;

        let _pending = dispatch(conv.submit(&mut input, &mut render));
        let effect = conv.reconcile(foreign, Ok("late".into()), &mut input, &mut render);

        assert_eq!(effect, Effect::None);
        assert!(conv.state().in_flight);
        assert_eq!(render.turns.len(), 1);
    }

    #[test]
    fn test_new_notice_survives_old_dismissal() {
        let mut conv = Conversation::default();
        let mut render = RecordingRender::default();

        let Effect::ScheduleDismiss { generation: old, .. } = conv.show_notice("old", &mut render)
        else {
            panic!("Expected ScheduleDismiss");
        };
        let Effect::ScheduleDismiss { generation: new, .. } = conv.show_notice("new", &mut render)
        else {
            panic!("Expected ScheduleDismiss");
        };

        conv.notice_expired(old, &mut render);
        assert_eq!(render.notice.as_deref(), Some("new"));
        assert!(conv.state().last_error_visible);

        conv.notice_expired(new, &mut render);
        assert!(render.notice.is_none());
        assert!(!conv.state().last_error_visible);
    }

    #[test]
    fn test_hide_notice_without_notice_is_noop() {
        let mut conv = Conversation::default();
        let mut render = RecordingRender::default();

        conv.hide_notice(&mut render);

        assert!(render.events.is_empty());
        assert!(!conv.state().last_error_visible);
    }

    #[test]
    fn test_refresh_affordances_tracks_buffer() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("");

        conv.refresh_affordances(&mut input);
        assert!(!input.submit_enabled);

        input.buffer.push('a');
        conv.refresh_affordances(&mut input);
        assert!(input.submit_enabled);
    }

    #[test]
    fn test_quit_with_unsent_text_warns_first() {
        let mut conv = Conversation::default();
        let input = RecordingInput::with_text("draft");
        let mut render = RecordingRender::default();

        let first = conv.request_quit(&input, &mut render);
        assert!(matches!(first, Effect::ScheduleDismiss { .. }));
        assert_eq!(render.notice.as_deref(), Some(UNSENT_MESSAGE));

        assert_eq!(conv.request_quit(&input, &mut render), Effect::Quit);
    }

    #[test]
    fn test_departure_warning_disarmed_once_it_expires() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("draft one");
        let mut render = RecordingRender::default();

        let Effect::ScheduleDismiss { generation, .. } = conv.request_quit(&input, &mut render)
        else {
            panic!("Expected ScheduleDismiss");
        };
        conv.notice_expired(generation, &mut render);

        input.buffer = "draft two".to_string();
        let second = conv.request_quit(&input, &mut render);
        assert!(matches!(second, Effect::ScheduleDismiss { .. }));
        assert_eq!(render.notice.as_deref(), Some(UNSENT_MESSAGE));
    }

    #[test]
    fn test_departure_warning_disarmed_by_dismiss_or_edit() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("draft");
        let mut render = RecordingRender::default();

        conv.request_quit(&input, &mut render);
        conv.hide_notice(&mut render);
        assert_ne!(conv.request_quit(&input, &mut render), Effect::Quit);

        // Warning is live again; editing the draft disarms it
        input.buffer.push_str(" more");
        conv.refresh_affordances(&mut input);
        assert_ne!(conv.request_quit(&input, &mut render), Effect::Quit);

        // Unedited and still showing: the second request quits
        assert_eq!(conv.request_quit(&input, &mut render), Effect::Quit);
    }

    #[test]
    fn test_departure_warning_replaced_by_other_notice_is_disarmed() {
        let mut conv = Conversation::default();
        let input = RecordingInput::with_text("draft");
        let mut render = RecordingRender::default();

        conv.request_quit(&input, &mut render);
        conv.show_notice("something else", &mut render);

        assert_ne!(conv.request_quit(&input, &mut render), Effect::Quit);
    }

    #[test]
    fn test_quit_while_in_flight_does_not_warn() {
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("sent");
        let mut render = RecordingRender::default();

        let _pending = dispatch(conv.submit(&mut input, &mut render));

        assert_eq!(conv.request_quit(&input, &mut render), Effect::Quit);
    }

    #[tokio::test]
    async fn test_converse_round_trip() {
        let endpoint = ScriptedEndpoint::new(vec![Ok("pong".to_string())]);
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("ping");
        let mut render = RecordingRender::default();

        let effect = conv.converse(&endpoint, &mut input, &mut render).await;

        assert_eq!(effect, Effect::None);
        assert_eq!(endpoint.received(), vec!["ping".to_string()]);
        assert_eq!(render.turns[1].text, "pong");
    }

    #[tokio::test]
    async fn test_converse_skips_network_for_empty_input() {
        let endpoint = ScriptedEndpoint::new(vec![]);
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("\n\t");
        let mut render = RecordingRender::default();

        conv.converse(&endpoint, &mut input, &mut render).await;

        assert!(endpoint.received().is_empty());
        assert!(render.turns.is_empty());
    }

    #[tokio::test]
    async fn test_converse_malformed_reply_is_generic() {
        let endpoint =
            ScriptedEndpoint::new(vec![Err(EndpointError::MalformedReply("eof".into()))]);
        let mut conv = Conversation::default();
        let mut input = RecordingInput::with_text("hi");
        let mut render = RecordingRender::default();

        conv.converse(&endpoint, &mut input, &mut render).await;

        assert_eq!(render.notice.as_deref(), Some(GENERIC_MESSAGE));
        assert!(input.enabled);
    }
}
