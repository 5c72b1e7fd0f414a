pub mod client;
pub mod http;
pub mod types;

pub use client::{BackendError, ChatBackend, ChatRequest};
pub use http::HttpBackend;
pub use types::{Attachment, AttachmentKind, ChatReply, Conversation, Message, UploadListing, WELCOME_MESSAGE};
