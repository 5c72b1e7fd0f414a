//! # InputBox Component
//!
//! Captures the text the user is composing. Multiline (Ctrl+J inserts a
//! newline), with its own cursor and scrolling. The buffer is the editing
//! surface; the core `Composer` is kept in sync by the parent via
//! `Action::SetInputText` on every content change, so the reducer always sees
//! the current text.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Maximum number of input lines shown before internal scrolling kicks in.
const MAX_VISIBLE_LINES: u16 = 6;
/// Borders, top + bottom.
const VERTICAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter. May carry an empty string — whether an empty
    /// submission is a no-op depends on pending attachments, which only the
    /// core knows about.
    Submit(String),
    /// Text content changed.
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Pending attachment count (prop, shown in the title)
    pub pending_count: usize,
    /// Dim the box while a request is in flight (prop)
    pub dimmed: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible logical line (internal scrolling)
    v_scroll: u16,
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos;
    while p > 0 {
        p -= 1;
        if s.is_char_boundary(p) {
            return p;
        }
    }
    0
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos + 1;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p.min(s.len())
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            pending_count: 0,
            dimmed: false,
            cursor: 0,
            v_scroll: 0,
        }
    }

    /// Required height for the current buffer, clamped to the viewport limit.
    pub fn calculate_height(&self) -> u16 {
        let lines = self.buffer.split('\n').count().max(1) as u16;
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Byte offset of the start of the line the cursor is on.
    fn line_start(&self) -> usize {
        self.buffer[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Byte offset of the end of the line the cursor is on (before the '\n').
    fn line_end(&self) -> usize {
        self.buffer[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.buffer.len())
    }

    /// Cursor position as (row, display column) over logical lines.
    fn cursor_rowcol(&self) -> (u16, u16) {
        let row = self.buffer[..self.cursor].matches('\n').count() as u16;
        let col = self.buffer[self.line_start()..self.cursor].width() as u16;
        (row, col)
    }

    fn title(&self) -> String {
        match self.pending_count {
            0 => String::from("Input (Ctrl+A attach)"),
            1 => String::from("Input — 1 attachment (Ctrl+A)"),
            n => format!("Input — {n} attachments (Ctrl+A)"),
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1);
        let (row, col) = self.cursor_rowcol();

        // Keep the cursor row inside the viewport.
        if row < self.v_scroll {
            self.v_scroll = row;
        } else if row >= self.v_scroll + inner_height {
            self.v_scroll = row + 1 - inner_height;
        }
        // Horizontal scroll only matters on the cursor line; applying it to
        // the whole paragraph is acceptable for an input box.
        let h_scroll = col.saturating_sub(inner_width.saturating_sub(1));

        let style = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(style)
            .title(self.title());

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new("Ask follow-up").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.buffer.as_str())
                .style(style)
                .scroll((self.v_scroll, h_scroll))
        };
        frame.render_widget(paragraph.block(block), area);

        let cursor_x = area.x + 1 + col.saturating_sub(h_scroll);
        let cursor_y = area.y + 1 + row.saturating_sub(self.v_scroll);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            // Cursor movement changes nothing the core cares about; the
            // buffer stays as-is, so no event is emitted.
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.line_start();
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.line_end();
                None
            }
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.v_scroll = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new();
        assert!(input.buffer.is_empty());
        assert_eq!(input.calculate_height(), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        let res = input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "ab");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('x'));
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_submit_clears_buffer_and_may_be_empty() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("hello".to_string()));

        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit, got {other:?}"),
        }
        assert!(input.buffer.is_empty());

        // Empty submit still emits — attachments may make it meaningful.
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit(String::new()))
        );
    }

    #[test]
    fn test_newline_grows_height() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::InputChar('a'));
        input.handle_event(&TuiEvent::InputChar('\n'));
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.calculate_height(), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_cursor_movement_emits_no_event() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("ab\ncd".to_string()));

        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorHome), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorEnd), None);
        assert_eq!(input.buffer, "ab\ncd");
    }

    #[test]
    fn test_home_end_on_current_line() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("ab\ncd".to_string()));
        input.handle_event(&TuiEvent::CursorHome);
        let (row, col) = input.cursor_rowcol();
        assert_eq!((row, col), (1, 0));
        input.handle_event(&TuiEvent::CursorEnd);
        let (row, col) = input.cursor_rowcol();
        assert_eq!((row, col), (1, 2));
    }

    #[test]
    fn test_render_shows_pending_count() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut input = InputBox::new();
        input.pending_count = 2;

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("2 attachments"));
        assert!(text.contains("Ask follow-up"));
    }
}
