//! # Core Application Logic
//!
//! This module contains MedAssist's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No net. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                        ┌────────────┐
//!                        │    TUI     │
//!                        │  Adapter   │
//!                        │ (ratatui)  │
//!                        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()` — everything that can happen
//! - [`composer`]: Pending text, attachments, and the attachment-menu flag
//! - [`picker`]: File validation and loading for the two attachment pickers
//! - [`config`]: Settings file, env vars, and CLI flag resolution

pub mod action;
pub mod composer;
pub mod config;
pub mod picker;
pub mod state;
