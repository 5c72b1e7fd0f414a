use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::types::Attachment;

/// Errors that can come out of a chat submission.
/// Every variant is terminal for the current submission — there is no retry.
#[derive(Debug)]
pub enum BackendError {
    /// The server replied with a non-2xx status. `message` is the optional
    /// `message` field from the error body, when one could be parsed.
    Api { status: u16, message: Option<String> },
    /// The request went out but no response arrived — timeout or connectivity
    /// loss. The backend may still be processing.
    NoResponse,
    /// The request could not be constructed or sent at all.
    Request(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Api { status, message } => match message {
                Some(msg) => write!(f, "API error (HTTP {status}): {msg}"),
                None => write!(f, "API error (HTTP {status})"),
            },
            BackendError::NoResponse => write!(f, "no response received"),
            BackendError::Request(msg) => write!(f, "request error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl BackendError {
    /// The plain-text wording shown to the user as an assistant message.
    /// Diagnostic detail beyond this goes to the log only.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api { status, message } => format!(
                "Server error: {status}. {}",
                message.as_deref().unwrap_or("")
            ),
            BackendError::NoResponse => "No response received from the server after \
                20 minutes. The process might still be running on the backend."
                .to_string(),
            BackendError::Request(description) => format!("Error: {description}"),
        }
    }
}

/// Everything the backend needs to answer one submission: the newest message
/// text plus its attachments. Conversation history stays client-side — the
/// inference service keeps its own session.
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub attachments: &'a [Arc<Attachment>],
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Sends one submission and waits for the full text reply.
    async fn send(&self, request: ChatRequest<'_>) -> Result<String, BackendError>;

    /// Names of everything uploaded to the backend so far.
    async fn uploaded_files(&self) -> Result<Vec<String>, BackendError>;
}
