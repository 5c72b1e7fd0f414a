//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&mut MessageListState` (persistent scroll state) and the `Conversation`
//! (props). Heights are predicted with `MessageView::calculate_height` so the
//! scroll view can be sized before anything is rendered.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::backend::Conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::event::TuiEvent;

/// Scroll state for the message list. Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Last known viewport height, used to detect the bottom on scroll-down.
    pub viewport_height: u16,
    /// Total content height from the last layout pass.
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn at_bottom(&self) -> bool {
        let max_scroll = self.content_height.saturating_sub(self.viewport_height);
        self.scroll_state.offset().y >= max_scroll
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    /// Scrolling up detaches from the bottom; scrolling back down to the end
    /// re-enables stick-to-bottom.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.stick_to_bottom = self.at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.stick_to_bottom = self.at_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper: conversation props + persistent scroll state.
pub struct MessageList<'a> {
    conversation: &'a Conversation,
    state: &'a mut MessageListState,
    is_loading: bool,
    spinner_frame: usize,
}

/// Braille spinner centered under the last message while waiting, standing in
/// for the web frontend's loading animation.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

impl<'a> MessageList<'a> {
    pub fn new(
        conversation: &'a Conversation,
        state: &'a mut MessageListState,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            conversation,
            state,
            is_loading,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Reserve a column for the scrollbar.
        let content_width = area.width.saturating_sub(1);

        let heights: Vec<u16> = self
            .conversation
            .messages
            .iter()
            .map(|m| MessageView::calculate_height(m, content_width))
            .collect();
        let spinner_height: u16 = if self.is_loading { 1 } else { 0 };
        let total_height: u16 = heights.iter().sum::<u16>() + spinner_height;

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, height) in self.conversation.messages.iter().zip(&heights) {
            let rect = Rect::new(0, y_offset, content_width, *height);
            scroll_view.render_widget(MessageView::new(message), rect);
            y_offset += height;
        }

        if self.is_loading {
            let glyph = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let spinner = Paragraph::new(Line::from(glyph).centered())
                .style(Style::default().fg(Color::White));
            scroll_view.render_widget(spinner, Rect::new(0, y_offset, content_width, 1));
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(conversation: &Conversation, loading: bool) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MessageListState::new();
        terminal
            .draw(|f| {
                MessageList::new(conversation, &mut state, loading, 0).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_welcome_message() {
        let conversation = Conversation::new();
        let text = buffer_text(&conversation, false);
        assert!(text.contains("medassist"));
        assert!(text.contains("Welcome!"));
    }

    #[test]
    fn test_renders_user_and_assistant_roles() {
        let mut conversation = Conversation::new();
        conversation.push(crate::backend::Message::user("hi".to_string(), vec![]));
        let text = buffer_text(&conversation, false);
        assert!(text.contains("you"));
        assert!(text.contains("hi"));
    }

    #[test]
    fn test_spinner_shown_while_loading() {
        let conversation = Conversation::new();
        assert!(buffer_text(&conversation, true).contains('⠋'));
        assert!(!buffer_text(&conversation, false).contains('⠋'));
    }

    #[test]
    fn test_scroll_up_breaks_stick_to_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }
}
