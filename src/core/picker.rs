//! # File picker
//!
//! Terminal stand-in for the browser's hidden file inputs: given a path typed
//! by the user and the picker it came through (image or document), validate
//! the extension against that picker's allow-list, read the bytes once, and
//! produce an [`Attachment`] with a MIME type derived from the extension.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::backend::{Attachment, AttachmentKind};

/// Extensions the image picker accepts (the `image/*` input).
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Extensions the document picker accepts. Fixed allow-list, matching the
/// backend's upload policy.
const DOCUMENT_EXTENSIONS: &[&str] = &["doc", "docx", "pdf", "txt", "mp4", "mov", "avi"];

#[derive(Debug)]
pub enum PickError {
    /// Extension not in the allow-list for the chosen picker.
    Rejected { name: String, kind: AttachmentKind },
    /// The file could not be read.
    Io { name: String, source: std::io::Error },
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickError::Rejected { name, kind } => {
                write!(f, "{name}: not an accepted {} type", kind.label())
            }
            PickError::Io { name, source } => write!(f, "{name}: {source}"),
        }
    }
}

impl std::error::Error for PickError {}

/// Lowercased extension of a path, if it has one.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// True if `path` passes the allow-list of the given picker.
pub fn is_allowed(path: &Path, kind: AttachmentKind) -> bool {
    let allowed: &[&str] = match kind {
        AttachmentKind::Image => IMAGE_EXTENSIONS,
        AttachmentKind::Document => DOCUMENT_EXTENSIONS,
    };
    extension_of(path).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// MIME type for an accepted extension. Anything unrecognized falls back to
/// `application/octet-stream`, which routes it into the `files` group.
pub fn mime_for(path: &Path) -> &'static str {
    match extension_of(path).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

/// Validates and reads one picked path into an attachment.
pub fn pick_file(path: &Path, kind: AttachmentKind) -> Result<Arc<Attachment>, PickError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();

    if !is_allowed(path, kind) {
        return Err(PickError::Rejected { name, kind });
    }

    let data = std::fs::read(path).map_err(|source| PickError::Io {
        name: name.clone(),
        source,
    })?;
    info!(
        "Picked {} ({}, {} bytes) via {} picker",
        name,
        mime_for(path),
        data.len(),
        kind.label()
    );
    Ok(Attachment::new(name, mime_for(path), data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_picker_accepts_images_only() {
        assert!(is_allowed(Path::new("scan.PNG"), AttachmentKind::Image));
        assert!(is_allowed(Path::new("x/photo.jpeg"), AttachmentKind::Image));
        assert!(!is_allowed(Path::new("notes.pdf"), AttachmentKind::Image));
        assert!(!is_allowed(Path::new("no_extension"), AttachmentKind::Image));
    }

    #[test]
    fn test_document_picker_allow_list() {
        for name in ["a.doc", "a.docx", "a.pdf", "a.txt", "a.mp4", "a.mov", "a.avi"] {
            assert!(is_allowed(Path::new(name), AttachmentKind::Document), "{name}");
        }
        assert!(!is_allowed(Path::new("a.png"), AttachmentKind::Document));
        assert!(!is_allowed(Path::new("a.exe"), AttachmentKind::Document));
    }

    #[test]
    fn test_mime_mapping_routes_groups() {
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("a.weird")), "application/octet-stream");
    }

    #[test]
    fn test_pick_file_rejects_disallowed_extension() {
        let err = pick_file(Path::new("malware.exe"), AttachmentKind::Document).unwrap_err();
        assert!(matches!(err, PickError::Rejected { .. }));
        assert!(err.to_string().contains("malware.exe"));
    }

    #[test]
    fn test_pick_file_reads_bytes() {
        let dir = std::env::temp_dir();
        let path = dir.join("medassist_picker_test.txt");
        std::fs::write(&path, b"patient notes").unwrap();

        let attachment = pick_file(&path, AttachmentKind::Document).unwrap();
        assert_eq!(attachment.name, "medassist_picker_test.txt");
        assert_eq!(attachment.mime, "text/plain");
        assert_eq!(attachment.data, b"patient notes");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_pick_file_missing_path_is_io_error() {
        let err = pick_file(
            Path::new("/definitely/not/here.pdf"),
            AttachmentKind::Document,
        )
        .unwrap_err();
        assert!(matches!(err, PickError::Io { .. }));
    }
}
