//! # Application State
//!
//! Core business state for MedAssist. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>  // injected HTTP capability
//! ├── conversation: Conversation     // append-only message log
//! ├── composer: Composer             // pending text + attachments + menu flag
//! ├── status_message: String         // status bar text
//! └── is_loading: bool               // one request in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::backend::{ChatBackend, Conversation};
use crate::core::composer::Composer;

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub conversation: Conversation,
    pub composer: Composer,
    pub status_message: String,
    pub is_loading: bool,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            composer: Composer::new(),
            status_message: String::from("Ready"),
            is_loading: false,
        }
    }
}
