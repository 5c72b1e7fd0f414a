//! # Attachment Menu Component
//!
//! Overlay opened with Ctrl+A: pick a file through the image or document
//! picker, review the pending attachments, remove one. The open/closed flag
//! itself is core state (`Composer::menu_open`); this component only exists
//! while the core says the menu is open.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AttachMenuState` lives in `TuiState`
//! - `AttachMenu` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::backend::AttachmentKind;
use crate::tui::event::TuiEvent;

/// The two picker actions shown before the pending-file rows.
const ACTION_ROWS: usize = 2;

/// Persistent state for the attachment menu overlay.
pub struct AttachMenuState {
    /// (name, is_image) per pending attachment. Synced from the composer
    /// every frame, so what is displayed always equals the pending list.
    pub pending: Vec<(String, bool)>,
    pub selected: usize,
    pub list_state: ListState,
}

impl AttachMenuState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            pending: Vec::new(),
            selected: 0,
            list_state,
        }
    }

    fn row_count(&self) -> usize {
        ACTION_ROWS + self.pending.len()
    }

    /// Handle a key event, returning a MenuEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ToggleAttachMenu => Some(MenuEvent::Dismiss),
            TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::ScrollDown => {
                self.selected = (self.selected + 1).min(self.row_count() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => match self.selected {
                0 => Some(MenuEvent::Pick(AttachmentKind::Image)),
                1 => Some(MenuEvent::Pick(AttachmentKind::Document)),
                n => Some(MenuEvent::Remove(n - ACTION_ROWS)),
            },
            TuiEvent::InputChar('d') | TuiEvent::Delete => {
                if self.selected >= ACTION_ROWS {
                    Some(MenuEvent::Remove(self.selected - ACTION_ROWS))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Re-clamp the selection after the pending list shrank.
    pub fn sync_pending(&mut self, pending: Vec<(String, bool)>) {
        self.pending = pending;
        self.selected = self.selected.min(self.row_count() - 1);
        self.list_state.select(Some(self.selected));
    }
}

/// Events emitted by the attachment menu.
pub enum MenuEvent {
    /// Open the path prompt for this picker.
    Pick(AttachmentKind),
    /// Remove the pending attachment at this index.
    Remove(usize),
    Dismiss,
}

/// Transient render wrapper for the attachment menu overlay.
pub struct AttachMenu<'a> {
    state: &'a mut AttachMenuState,
}

impl<'a> AttachMenu<'a> {
    pub fn new(state: &'a mut AttachMenuState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 50, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.pending.is_empty() {
            " Enter Select  Esc Close "
        } else {
            " Enter Select  d Remove  Esc Close "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Attachments ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let mut items: Vec<ListItem> = vec![
            ListItem::new("Attach image…  (png jpg jpeg gif bmp webp)"),
            ListItem::new("Attach document…  (doc docx pdf txt mp4 mov avi)"),
        ];
        for (name, is_image) in &self.state.pending {
            let tag = if *is_image { "[img]" } else { "[doc]" };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("{tag} "), Style::default().fg(Color::DarkGray)),
                Span::raw(name.clone()),
            ])));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Rect centered in `area` with the given percentage width/height.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_on_action_rows_picks_kind() {
        let mut state = AttachMenuState::new();
        match state.handle_event(&TuiEvent::Submit) {
            Some(MenuEvent::Pick(AttachmentKind::Image)) => {}
            _ => panic!("expected image picker"),
        }
        state.handle_event(&TuiEvent::ScrollDown);
        match state.handle_event(&TuiEvent::Submit) {
            Some(MenuEvent::Pick(AttachmentKind::Document)) => {}
            _ => panic!("expected document picker"),
        }
    }

    #[test]
    fn test_remove_maps_row_to_pending_index() {
        let mut state = AttachMenuState::new();
        state.sync_pending(vec![
            ("a.png".to_string(), true),
            ("b.pdf".to_string(), false),
        ]);
        state.handle_event(&TuiEvent::ScrollDown);
        state.handle_event(&TuiEvent::ScrollDown);
        state.handle_event(&TuiEvent::ScrollDown);
        match state.handle_event(&TuiEvent::InputChar('d')) {
            Some(MenuEvent::Remove(1)) => {}
            _ => panic!("expected Remove(1)"),
        }
    }

    #[test]
    fn test_delete_on_action_row_is_noop() {
        let mut state = AttachMenuState::new();
        assert!(state.handle_event(&TuiEvent::Delete).is_none());
    }

    #[test]
    fn test_selection_clamped_after_shrink() {
        let mut state = AttachMenuState::new();
        state.sync_pending(vec![("a.png".to_string(), true)]);
        state.handle_event(&TuiEvent::ScrollDown);
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.selected, 2);
        state.sync_pending(vec![]);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = AttachMenuState::new();
        assert!(matches!(
            state.handle_event(&TuiEvent::Escape),
            Some(MenuEvent::Dismiss)
        ));
    }
}
