use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::backend::Message;
use crate::tui::component::Component;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat message.
///
/// `MessageView` is a transient component: created fresh each frame with the
/// data it needs. User text renders verbatim; assistant text goes through the
/// markdown renderer, matching how the backend writes its analyses.
/// Attachments are listed as tagged lines under the text.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn base_color(message: &Message) -> Color {
        if message.is_user { Color::Green } else { Color::Blue }
    }

    /// Builds the full body: message text plus one tagged line per attachment.
    fn body(message: &Message) -> Text<'static> {
        let trimmed = message.text.trim();
        let mut text = if trimmed.is_empty() {
            Text::default()
        } else if message.is_user {
            Text::raw(trimmed.to_string())
        } else {
            markdown::render(trimmed, Color::White)
        };

        for file in &message.files {
            let tag = if file.is_image() { "[img]" } else { "[doc]" };
            text.lines.push(Line::from(vec![
                Span::styled(format!("{tag} "), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    file.name.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        text
    }

    /// Predicts the rendered height without rendering.
    ///
    /// Uses `textwrap` with options matching Ratatui's `Paragraph` wrapping so
    /// the parent `MessageList` can lay out its scroll view up front.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding. Still occupy one row.
            return 1;
        }

        let body = Self::body(message);
        if body.lines.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let mut rows = 0u16;
        for line in &body.lines {
            let flat: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            if flat.is_empty() {
                rows += 1;
            } else {
                rows += textwrap::wrap(&flat, &options).len().max(1) as u16;
            }
        }
        rows + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role = if self.message.is_user { "you" } else { "medassist" };
        let color = Self::base_color(self.message);
        let border_style = Style::default().fg(color).add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(role)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(Self::body(self.message))
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        paragraph.render(inner_area, buf);
    }
}

impl<'a> Component for MessageView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
