//! HTTP implementation of [`ChatBackend`] against the MedAssist inference
//! service: `POST /chat` with a multipart body, `GET /get_file_list`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};

use super::client::{BackendError, ChatBackend, ChatRequest};
use super::types::{ChatReply, UploadListing};

/// Fixed request timeout: 20 minutes. Image analysis on the backend can run
/// for a long time, and there is no retry — one request, one long wait.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(1_200_000);

/// Error bodies optionally carry a human-readable `message` field.
#[derive(serde::Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
}

pub struct HttpBackend {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// URL resolution (flag, env var, config file) happens in `core::config`;
    /// `None` here just means the stock local backend.
    pub fn with_timeout(base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| "http://localhost:8000".to_string()),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Classifies a transport-level `reqwest::Error`.
    ///
    /// Timeout and connection loss mean the request may have reached the
    /// backend, so they map to `NoResponse`. Anything else means we never got
    /// the request off the ground.
    fn classify_send_error(e: reqwest::Error) -> BackendError {
        if e.is_timeout() || e.is_connect() {
            warn!("No response from backend: {}", e);
            BackendError::NoResponse
        } else {
            warn!("Request failed before a response was possible: {}", e);
            BackendError::Request(e.to_string())
        }
    }

    /// Turns a non-2xx response into `Api`, pulling the optional `message`
    /// field out of the body when the body is JSON.
    async fn classify_status_error(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!("Backend API error: {} - {}", status, body);
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        BackendError::Api { status, message }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "medassist-http"
    }

    async fn send(&self, request: ChatRequest<'_>) -> Result<String, BackendError> {
        // Attachments split by MIME prefix into the `images` and `files`
        // groups; insertion order is preserved within each group.
        let mut form = Form::new().text("message", request.message.to_string());
        for attachment in request.attachments {
            let part = Part::bytes(attachment.data.clone())
                .file_name(attachment.name.clone())
                .mime_str(&attachment.mime)
                .map_err(|e| BackendError::Request(e.to_string()))?;
            let field = if attachment.is_image() { "images" } else { "files" };
            form = form.part(field, part);
        }

        info!(
            "POST {}/chat: {} chars, {} attachments",
            self.base_url,
            request.message.len(),
            request.attachments.len()
        );

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        debug!("Backend response status: {}", response.status());

        if !response.status().is_success() {
            return Err(Self::classify_status_error(response).await);
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        info!("Backend reply: {} chars", reply.response.len());
        Ok(reply.response)
    }

    async fn uploaded_files(&self) -> Result<Vec<String>, BackendError> {
        let response = self
            .client
            .get(format!("{}/get_file_list", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        if !response.status().is_success() {
            return Err(Self::classify_status_error(response).await);
        }

        let listing: UploadListing = response
            .json()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        debug!("Backend reports {} uploaded files", listing.files.len());
        Ok(listing.files)
    }
}
