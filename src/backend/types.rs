use std::sync::Arc;

use serde::Deserialize;

/// An opaque binary blob attached to a message.
///
/// Loaded from disk exactly once, at attach time. Wrapped in `Arc` so the
/// composer and the message that ends up owning it share one allocation;
/// dropping the message releases the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    /// MIME type derived from the file extension (e.g. "image/png").
    pub mime: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            mime: mime.into(),
            data,
        })
    }

    /// True if this attachment goes into the `images` multipart group.
    /// Everything else goes into `files`.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Which picker an attachment came through. Only routes validation and the
/// outgoing payload field; never stored on the attachment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    pub fn label(self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Document => "document",
        }
    }
}

/// A single entry in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub files: Vec<Arc<Attachment>>,
    pub is_user: bool,
}

impl Message {
    pub fn user(text: String, files: Vec<Arc<Attachment>>) -> Self {
        Self {
            text,
            files,
            is_user: true,
        }
    }

    pub fn assistant(text: String) -> Self {
        Self {
            text,
            files: Vec::new(),
            is_user: false,
        }
    }
}

/// Standing first message shown before the user has said anything.
pub const WELCOME_MESSAGE: &str = "Welcome! I'm an AI assistant designed to support \
    medical professionals in the diagnostic process. I analyze symptoms, medical images, \
    and patient records, then provide a comprehensive analysis to aid in diagnosis. \
    Please note that I'm a tool to assist doctors and not a replacement for professional \
    medical judgment.";

/// The ordered, append-only log of exchanged messages for the current session.
/// Lives only for the lifetime of the process; nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Creates a new Conversation seeded with the welcome message.
    pub fn new() -> Self {
        Conversation {
            messages: vec![Message::assistant(WELCOME_MESSAGE.to_string())],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Successful reply body from `POST /chat`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
}

/// Body of `GET /get_file_list`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadListing {
    pub files: Vec<String>,
}
