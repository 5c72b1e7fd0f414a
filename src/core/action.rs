//! # Actions
//!
//! Everything that can happen in MedAssist becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Backend replies? That's `Action::ResponseArrived(result)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the caller must perform.
//! No side effects here. I/O happens in the adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed actions, assert on state and effects.
//!
//! Request lifecycle: Idle → Submitting → (Success | Failure) → Idle.
//! Submissions are serialized — `Submit` while a request is in flight is
//! ignored, so exactly one assistant message follows each user message and
//! responses can never land out of order.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::backend::{Attachment, AttachmentKind, BackendError, Message};
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Replace the composer's pending text.
    SetInputText(String),
    /// Append picked files to the pending attachment list.
    AddFiles {
        kind: AttachmentKind,
        files: Vec<Arc<Attachment>>,
    },
    /// Remove the pending attachment at this index.
    RemoveFile(usize),
    /// Flip the attachment menu open/closed.
    ToggleMenu,
    /// Freeze the composer into a user message and fire the request.
    Submit,
    /// The in-flight request resolved, one way or the other.
    ResponseArrived(Result<String, BackendError>),
    /// Ask the backend what has been uploaded so far.
    ListUploads,
    /// `GET /get_file_list` resolved.
    UploadListArrived(Result<Vec<String>, BackendError>),
    Quit,
}

/// I/O the caller must perform after `update()` returns.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn the chat request with this frozen payload.
    SpawnRequest {
        message: String,
        attachments: Vec<Arc<Attachment>>,
    },
    /// Spawn a fetch of the backend's uploaded-file listing.
    FetchUploads,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SetInputText(text) => {
            app.composer.set_input_text(text);
            Effect::None
        }
        Action::AddFiles { kind, files } => {
            debug!("Adding {} {} attachment(s)", files.len(), kind.label());
            app.status_message = match files.as_slice() {
                [single] => format!("Attached {}", single.name),
                many => format!("Attached {} files", many.len()),
            };
            app.composer.add_files(files);
            Effect::None
        }
        Action::RemoveFile(index) => {
            app.composer.remove_file(index);
            Effect::None
        }
        Action::ToggleMenu => {
            app.composer.toggle_menu();
            Effect::None
        }
        Action::Submit => {
            if app.is_loading {
                // One request at a time. Re-armed by ResponseArrived.
                debug!("Submit ignored: request already in flight");
                return Effect::None;
            }
            if app.composer.is_blank() {
                return Effect::None;
            }

            let (text, files) = app.composer.take_submission();
            app.conversation.push(Message::user(text.clone(), files.clone()));
            app.is_loading = true;
            app.status_message = String::from("Waiting for analysis...");
            info!(
                "Submitting message ({} chars, {} attachments)",
                text.len(),
                files.len()
            );
            Effect::SpawnRequest {
                message: text,
                attachments: files,
            }
        }
        Action::ResponseArrived(result) => {
            let text = match result {
                Ok(response) => {
                    info!("Response received ({} chars)", response.len());
                    app.status_message = String::from("Ready");
                    response
                }
                Err(error) => {
                    warn!("Submission failed: {}", error);
                    app.status_message = String::from("Request failed");
                    error.user_message()
                }
            };
            app.conversation.push(Message::assistant(text));
            app.is_loading = false;
            Effect::None
        }
        Action::ListUploads => {
            app.status_message = String::from("Fetching upload list...");
            Effect::FetchUploads
        }
        Action::UploadListArrived(result) => {
            match result {
                Ok(files) if files.is_empty() => {
                    app.status_message = String::from("No files uploaded yet");
                }
                Ok(files) => {
                    app.status_message = format!("Uploads: {}", files.join(", "));
                }
                Err(error) => {
                    warn!("Upload listing failed: {}", error);
                    app.status_message = format!("Could not list uploads: {error}");
                }
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
