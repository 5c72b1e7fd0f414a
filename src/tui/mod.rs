//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values. This is the only
//! module that knows about ratatui and crossterm; the core stays
//! renderer-agnostic.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw: while a request is in flight it
//! draws every ~80ms so the spinner animates; otherwise it sleeps up to 500ms
//! and only redraws on events or resize.

pub mod component;
pub mod components;
pub mod event;
pub mod markdown;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::backend::{Attachment, ChatBackend, ChatRequest, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::picker;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AttachMenuState, FilePromptState, InputBox, InputEvent, MenuEvent, MessageListState,
    PromptEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Attachment menu overlay. Present exactly while `Composer::menu_open`.
    pub attach_menu: Option<AttachMenuState>,
    /// Path prompt overlay (None = hidden)
    pub file_prompt: Option<FilePromptState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            attach_menu: None,
            file_prompt: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::with_timeout(
        Some(config.backend_url.clone()),
        Duration::from_secs(config.timeout_secs),
    ));
    info!(
        "Starting UI with backend '{}' at {}",
        backend.name(),
        config.backend_url
    );
    let mut app = App::new(backend);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Sync component props with core state. The menu overlay exists
        // exactly while the composer says it is open, and its pending list
        // mirrors the composer's.
        tui.input_box.pending_count = app.composer.pending.len();
        tui.input_box.dimmed = app.is_loading;
        if app.composer.menu_open {
            let pending = app
                .composer
                .pending
                .iter()
                .map(|f| (f.name.clone(), f.is_image()))
                .collect();
            tui.attach_menu
                .get_or_insert_with(AttachMenuState::new)
                .sync_pending(pending);
        } else {
            tui.attach_menu = None;
        }

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits
            if matches!(tui_event, TuiEvent::ForceQuit) {
                update(&mut app, Action::Quit);
                break 'main;
            }

            // Path prompt is topmost; it captures everything while open
            if let Some(ref mut prompt) = tui.file_prompt {
                match prompt.handle_event(&tui_event) {
                    Some(PromptEvent::Confirm(path)) => match picker::pick_file(&path, prompt.kind)
                    {
                        Ok(file) => {
                            let kind = prompt.kind;
                            tui.file_prompt = None;
                            let effect = update(
                                &mut app,
                                Action::AddFiles {
                                    kind,
                                    files: vec![file],
                                },
                            );
                            if apply_effect(effect, &app, &tx) {
                                break 'main;
                            }
                        }
                        Err(e) => {
                            debug!("Pick rejected: {}", e);
                            prompt.error = Some(e.to_string());
                        }
                    },
                    Some(PromptEvent::Cancel) => {
                        tui.file_prompt = None;
                    }
                    None => {}
                }
                continue;
            }

            // Attachment menu next
            if let Some(ref mut menu) = tui.attach_menu {
                match menu.handle_event(&tui_event) {
                    Some(MenuEvent::Pick(kind)) => {
                        tui.file_prompt = Some(FilePromptState::new(kind));
                    }
                    Some(MenuEvent::Remove(index)) => {
                        update(&mut app, Action::RemoveFile(index));
                        let pending = app
                            .composer
                            .pending
                            .iter()
                            .map(|f| (f.name.clone(), f.is_image()))
                            .collect();
                        menu.sync_pending(pending);
                    }
                    Some(MenuEvent::Dismiss) => {
                        update(&mut app, Action::ToggleMenu);
                    }
                    None => {}
                }
                continue;
            }

            match tui_event {
                TuiEvent::ToggleAttachMenu => {
                    update(&mut app, Action::ToggleMenu);
                }
                TuiEvent::ListUploads => {
                    let effect = update(&mut app, Action::ListUploads);
                    if apply_effect(effect, &app, &tx) {
                        break 'main;
                    }
                }
                TuiEvent::Escape => {
                    update(&mut app, Action::Quit);
                    break 'main;
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&tui_event);
                }
                // While a request is in flight, Enter is ignored without
                // clearing the buffer — submissions are serialized.
                TuiEvent::Submit if app.is_loading => {
                    app.status_message = String::from("Still waiting on the previous message...");
                }
                other => {
                    if let Some(input_event) = tui.input_box.handle_event(&other) {
                        match input_event {
                            InputEvent::Submit(text) => {
                                update(&mut app, Action::SetInputText(text));
                                let effect = update(&mut app, Action::Submit);
                                if apply_effect(effect, &app, &tx) {
                                    break 'main;
                                }
                            }
                            InputEvent::ContentChanged => {
                                update(
                                    &mut app,
                                    Action::SetInputText(tui.input_box.buffer.clone()),
                                );
                            }
                        }
                    }
                }
            }
        }

        // Handle background task actions (request completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Executes an effect returned by the reducer. Returns true if the
/// application should quit.
fn apply_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnRequest {
            message,
            attachments,
        } => {
            spawn_request(app.backend.clone(), message, attachments, tx.clone());
            false
        }
        Effect::FetchUploads => {
            spawn_fetch_uploads(app.backend.clone(), tx.clone());
            false
        }
    }
}

/// Fires the chat request in the background. The frozen payload travels with
/// the task; the outcome comes back as a single `ResponseArrived` action.
fn spawn_request(
    backend: Arc<dyn ChatBackend>,
    message: String,
    attachments: Vec<Arc<Attachment>>,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning chat request");
    tokio::spawn(async move {
        let result = backend
            .send(ChatRequest {
                message: &message,
                attachments: &attachments,
            })
            .await;
        if tx.send(Action::ResponseArrived(result)).is_err() {
            warn!("Failed to deliver response: receiver dropped");
        }
    });
}

fn spawn_fetch_uploads(backend: Arc<dyn ChatBackend>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let result = backend.uploaded_files().await;
        if tx.send(Action::UploadListArrived(result)).is_err() {
            warn!("Failed to deliver upload listing: receiver dropped");
        }
    });
}
