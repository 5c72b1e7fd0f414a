//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{BackendError, ChatBackend, ChatRequest};

/// A canned-reply backend for tests that don't need real HTTP.
pub struct StubBackend {
    pub reply: String,
}

impl StubBackend {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send(&self, _request: ChatRequest<'_>) -> Result<String, BackendError> {
        Ok(self.reply.clone())
    }

    async fn uploaded_files(&self) -> Result<Vec<String>, BackendError> {
        Ok(Vec::new())
    }
}

/// Creates a test App with a StubBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubBackend::new("stub reply")))
}
