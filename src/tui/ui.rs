use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AttachMenu, FilePrompt, MessageList, TitleBar};

/// Full-frame layout: title bar, conversation, input box, then overlays.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height();
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    TitleBar::new(app.status_message.clone(), app.is_loading, spinner_frame)
        .render(frame, title_area);

    MessageList::new(
        &app.conversation,
        &mut tui.message_list,
        app.is_loading,
        spinner_frame,
    )
    .render(frame, main_area);

    tui.input_box.render(frame, input_area);

    // Overlays on top, prompt above menu.
    if let Some(menu) = &mut tui.attach_menu {
        AttachMenu::new(menu).render(frame, frame.area());
    }
    if let Some(prompt) = &tui.file_prompt {
        FilePrompt::new(prompt).render(frame, frame.area());
    }
}
