//! # Core Conversation Logic
//!
//! The message send/receive lifecycle. It knows nothing about any
//! specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Conversation         │
//!                    │  • Action / Effect      │
//!                    │  • Surface traits       │
//!                    │                         │
//!                    │  No UI.                 │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  One-shot  │      │   Tests    │
//!     │  Adapter   │      │  (stdout)  │      │  (fakes)   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`conversation`]: the controller; owns all mutable state
//! - [`action`]: `Action` in, `Effect` out
//! - [`surface`]: the input and render collaborators
//! - [`notice`]: the single auto-expiring notice slot
//! - [`failure`]: endpoint failure → user-facing message
//! - [`validation`]: submit predicate and length accounting
//! - [`turn`]: turns and the append-only transcript
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod conversation;
pub mod failure;
pub mod notice;
pub mod state;
pub mod surface;
pub mod turn;
pub mod validation;
