//! # FilePrompt Component
//!
//! Small overlay asking for a filesystem path — the terminal's stand-in for
//! the browser file dialog. Validation and reading happen in the event loop
//! (via `core::picker`); this component only edits the path and displays the
//! last error, keeping I/O out of the widget.

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::backend::AttachmentKind;
use crate::tui::components::attach_menu::centered_rect;
use crate::tui::event::TuiEvent;

/// Persistent state for the path prompt overlay.
pub struct FilePromptState {
    /// Which picker this prompt feeds.
    pub kind: AttachmentKind,
    pub buffer: String,
    /// Rejection or I/O error from the last confirm attempt.
    pub error: Option<String>,
}

impl FilePromptState {
    pub fn new(kind: AttachmentKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
            error: None,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PromptEvent> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            TuiEvent::Submit => {
                let trimmed = self.buffer.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Some(PromptEvent::Confirm(PathBuf::from(trimmed)))
            }
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                self.error = None;
                None
            }
            TuiEvent::Paste(text) => {
                self.buffer.push_str(text);
                self.error = None;
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            _ => None,
        }
    }
}

/// Events emitted by the file prompt.
pub enum PromptEvent {
    /// Try to attach the file at this path.
    Confirm(PathBuf),
    Cancel,
}

/// Transient render wrapper for the path prompt overlay.
pub struct FilePrompt<'a> {
    state: &'a FilePromptState,
}

impl<'a> FilePrompt<'a> {
    pub fn new(state: &'a FilePromptState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 20, area);
        frame.render_widget(Clear, overlay);

        let title = format!(" Attach {}: enter path ", self.state.kind.label());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Attach  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        let mut lines = vec![Line::from(self.state.buffer.as_str())];
        if let Some(error) = &self.state.error {
            lines.push(Line::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}
