//! # TUI Components
//!
//! All UI components for the terminal interface. Two patterns:
//!
//! - **Stateless, props-based**: created fresh each frame with the data they
//!   need (`TitleBar`, `MessageView`).
//! - **Stateful, event-driven**: persistent state in `TuiState`, events in,
//!   high-level events out (`InputBox`, `MessageListState`, the overlays).
//!
//! Each component file is self-contained: state types, event types,
//! rendering, event handling, and tests live together.

pub mod attach_menu;
pub mod file_prompt;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use attach_menu::{AttachMenu, AttachMenuState, MenuEvent};
pub use file_prompt::{FilePrompt, FilePromptState, PromptEvent};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
