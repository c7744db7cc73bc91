//! # TUI Components
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields, built fresh each frame:
//! - `TitleBar`: assistant, endpoint, connection and turn count
//! - `Message`: a single turn
//! - `NoticeBar`: the live error notice
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: the input surface, with the character counter
//! - `MessageList`: the render surface, scrollable and pinned to the newest turn
//!
//! The two stateful components are also what the conversation controller
//! talks to: `InputBox` implements `InputSurface` and `MessageListState`
//! implements `RenderSurface`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── notice_bar.rs    (Error notice strip)
//! ├── message.rs       (Single turn renderer)
//! ├── message_list.rs  (Scrollable turn container)
//! └── input_box/       (Text input with counter)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod notice_bar;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use notice_bar::NoticeBar;
pub use title_bar::{Connection, TitleBar};
