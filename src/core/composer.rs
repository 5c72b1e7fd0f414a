//! # Composer
//!
//! The input region holding not-yet-sent text and attachments, plus the
//! open/closed flag of the attachment menu. Mutated only through `update()`
//! in action.rs; the TUI mirrors this state, it never owns it.

use std::sync::Arc;

use crate::backend::Attachment;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Composer {
    pub input_text: String,
    pub pending: Vec<Arc<Attachment>>,
    pub menu_open: bool,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending text. No constraints — any string, including empty.
    pub fn set_input_text(&mut self, text: String) {
        self.input_text = text;
    }

    /// Appends files to the pending list and closes the attachment menu.
    pub fn add_files(&mut self, files: Vec<Arc<Attachment>>) {
        self.pending.extend(files);
        self.menu_open = false;
    }

    /// Removes the pending file at `index`, preserving the relative order of
    /// the rest. Out-of-range indices are a no-op.
    pub fn remove_file(&mut self, index: usize) {
        if index < self.pending.len() {
            self.pending.remove(index);
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// True when a submit would be a no-op: nothing but whitespace and no
    /// attachments.
    pub fn is_blank(&self) -> bool {
        self.input_text.trim().is_empty() && self.pending.is_empty()
    }

    /// Freezes the current state into a submission payload and resets the
    /// composer so the user can type the next message while waiting.
    pub fn take_submission(&mut self) -> (String, Vec<Arc<Attachment>>) {
        self.menu_open = false;
        (
            std::mem::take(&mut self.input_text),
            std::mem::take(&mut self.pending),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str) -> Arc<Attachment> {
        Attachment::new(name, "application/pdf", vec![0u8])
    }

    #[test]
    fn test_composer_starts_empty() {
        let composer = Composer::new();
        assert!(composer.is_blank());
        assert!(!composer.menu_open);
    }

    #[test]
    fn test_add_files_closes_menu() {
        let mut composer = Composer::new();
        composer.toggle_menu();
        assert!(composer.menu_open);
        composer.add_files(vec![attachment("a.pdf")]);
        assert!(!composer.menu_open);
        assert_eq!(composer.pending.len(), 1);
    }

    #[test]
    fn test_remove_file_preserves_relative_order() {
        let mut composer = Composer::new();
        composer.add_files(vec![
            attachment("a.pdf"),
            attachment("b.pdf"),
            attachment("c.pdf"),
        ]);
        composer.remove_file(1);
        let names: Vec<&str> = composer.pending.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn test_remove_file_out_of_range_is_noop() {
        let mut composer = Composer::new();
        composer.add_files(vec![attachment("a.pdf")]);
        composer.remove_file(5);
        assert_eq!(composer.pending.len(), 1);
    }

    #[test]
    fn test_blank_considers_whitespace_and_attachments() {
        let mut composer = Composer::new();
        composer.set_input_text("   \n ".to_string());
        assert!(composer.is_blank());
        composer.add_files(vec![attachment("a.pdf")]);
        assert!(!composer.is_blank());
    }

    #[test]
    fn test_take_submission_resets_everything() {
        let mut composer = Composer::new();
        composer.set_input_text("Hello".to_string());
        composer.add_files(vec![attachment("a.pdf")]);
        composer.toggle_menu();

        let (text, files) = composer.take_submission();
        assert_eq!(text, "Hello");
        assert_eq!(files.len(), 1);
        assert!(composer.input_text.is_empty());
        assert!(composer.pending.is_empty());
        assert!(!composer.menu_open);
    }
}
