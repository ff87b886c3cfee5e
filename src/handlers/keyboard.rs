//! Keyboard Input Handler
//!
//! Handles all keyboard input. Modal state is checked first (alert,
//! confirmation, preview, forms, search) so a key only ever reaches one
//! consumer.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use imgtui::api::ImageUpload;
use imgtui::log_debug;
use imgtui::logic::forms;
use imgtui::model::auth::AuthMode;
use imgtui::model::ui::ConfirmAction;
use imgtui::model::{FocusPane, Screen, TextInput};
use imgtui::services::api::ApiRequest;
use imgtui::services::files::read_upload_file;

use crate::App;

/// Rows moved by PageUp/PageDown (and ^D/^U in vim mode)
const PAGE_SIZE: isize = 10;

/// Handle keyboard input
pub async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    match app.model.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Dashboard => handle_dashboard_key(app, key).await,
    }
    Ok(())
}

/// Edit a text input; returns true when the key was consumed
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.push(c);
            true
        }
        _ => false,
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let form = &mut app.model.auth;

    match key.code {
        KeyCode::Esc => app.model.ui.should_quit = true,
        KeyCode::Char('r') if ctrl => form.toggle_mode(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            if form.submitting {
                return;
            }
            let request = match form.mode {
                AuthMode::Login => forms::validate_login(&form.email.value, &form.password.value)
                    .map(|(email, password)| ApiRequest::Login { email, password }),
                AuthMode::Register => forms::validate_register(
                    &form.username.value,
                    &form.email.value,
                    &form.password.value,
                )
                .map(|(username, email, password)| ApiRequest::Register {
                    username,
                    email,
                    password,
                }),
            };

            match request {
                Ok(request) => {
                    form.error = None;
                    form.notice = None;
                    form.submitting = true;
                    app.send(request);
                }
                Err(message) => form.error = Some(message.to_string()),
            }
        }
        _ => {
            if !form.submitting {
                edit_input(form.focused_input(), key);
            }
        }
    }
}

async fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    // Blocking alert swallows everything until dismissed
    if app.model.ui.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.model.ui.alert = None;
        }
        return;
    }

    if let Some(action) = app.model.ui.confirm.clone() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.model.ui.confirm = None;
                match action {
                    ConfirmAction::DeleteFolder { id, name } => {
                        log_debug(&format!("Deleting folder {} ({})", name, id));
                        app.send(ApiRequest::DeleteFolder { folder_id: id });
                    }
                    ConfirmAction::DeleteImage { id, name } => {
                        log_debug(&format!("Deleting image {} ({})", name, id));
                        app.send(ApiRequest::DeleteImage { image_id: id });
                    }
                    ConfirmAction::Logout => app.logout(),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.model.ui.confirm = None;
            }
            _ => {}
        }
        return;
    }

    if app.model.ui.preview.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_preview();
        }
        return;
    }

    if app.model.ui.create_folder.is_some() {
        handle_create_folder_key(app, key);
        return;
    }

    if app.model.ui.upload.is_some() {
        handle_upload_key(app, key).await;
        return;
    }

    if app.model.ui.search_mode {
        handle_search_key(app, key);
        return;
    }

    handle_browse_key(app, key);
}

fn handle_create_folder_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.ui.create_folder = None,
        KeyCode::Enter => {
            if let Some((name, parent_id)) = app.model.submit_create_folder() {
                app.send(ApiRequest::CreateFolder { name, parent_id });
            }
        }
        _ => {
            if let Some(form) = app.model.ui.create_folder.as_mut() {
                if !form.submitting {
                    edit_input(&mut form.name, key);
                }
            }
        }
    }
}

async fn handle_upload_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.model.ui.upload = None,
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(form) = app.model.ui.upload.as_mut() {
                form.switch_field();
            }
        }
        KeyCode::Enter => {
            let Some((name, path)) = app.model.submit_upload() else {
                return;
            };
            // File checks happen before anything is sent
            match read_upload_file(&path).await {
                Ok(file) => {
                    let upload = ImageUpload {
                        name,
                        file,
                        folder_id: app.model.navigation.current_folder().map(str::to_string),
                    };
                    app.send(ApiRequest::UploadImage { upload });
                }
                Err(e) => {
                    log_debug(&format!("Upload rejected for {}: {}", path, e));
                    app.model.reject_upload(e.to_string());
                }
            }
        }
        _ => {
            if let Some(form) = app.model.ui.upload.as_mut() {
                if !form.submitting {
                    edit_input(form.focused_input(), key);
                }
            }
        }
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.model.apply_search(),
        KeyCode::Esc => {
            // Abandon typing, keep the active filter
            app.model.ui.search_mode = false;
            app.model.ui.search_input = TextInput::with_value(app.model.navigation.search_term());
        }
        _ => {
            edit_input(&mut app.model.ui.search_input, key);
        }
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let vim = app.model.ui.vim_mode;

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,

        KeyCode::Tab | KeyCode::BackTab => {
            app.model.ui.focus = app.model.ui.focus.toggle();
        }

        KeyCode::Up => app.model.move_selection(-1),
        KeyCode::Down => app.model.move_selection(1),
        KeyCode::Char('k') if vim => app.model.move_selection(-1),
        KeyCode::Char('j') if vim => app.model.move_selection(1),
        KeyCode::PageUp => app.model.move_selection(-PAGE_SIZE),
        KeyCode::PageDown => app.model.move_selection(PAGE_SIZE),
        KeyCode::Char('u') if vim && ctrl => app.model.move_selection(-PAGE_SIZE),
        KeyCode::Char('d') if vim && ctrl => app.model.move_selection(PAGE_SIZE),
        KeyCode::Home => app.model.move_selection(isize::MIN),
        KeyCode::End => app.model.move_selection(isize::MAX),
        KeyCode::Char('G') if vim => app.model.move_selection(isize::MAX),

        KeyCode::Enter | KeyCode::Right => open_selected(app),
        KeyCode::Char('l') if vim => open_selected(app),

        KeyCode::Backspace | KeyCode::Left => {
            app.model.go_up();
        }
        KeyCode::Char('h') if vim => {
            app.model.go_up();
        }

        KeyCode::Char(c @ '0'..='9') => {
            let index = c as usize - '0' as usize;
            if index < app.model.navigation.breadcrumb().len() {
                app.model.jump_to_breadcrumb(index);
            }
        }

        KeyCode::Char('/') => start_search(app),
        KeyCode::Char('f') if ctrl => start_search(app),
        KeyCode::Esc => {
            if !app.model.navigation.search_term().is_empty() {
                app.model.clear_search();
            }
        }

        KeyCode::Char('n') => app.model.open_create_folder(),
        KeyCode::Char('u') if !ctrl => app.model.open_upload(),
        KeyCode::Char('d') if !ctrl => {
            app.model.request_delete_selected();
        }
        KeyCode::Delete => {
            app.model.request_delete_selected();
        }
        KeyCode::Char('r') => app.reload_content(),
        KeyCode::Char('L') => app.model.ui.confirm = Some(ConfirmAction::Logout),

        _ => {}
    }
}

fn open_selected(app: &mut App) {
    match app.model.ui.focus {
        FocusPane::Folders => {
            app.model.enter_selected_folder();
        }
        FocusPane::Images => app.open_preview(),
    }
}

fn start_search(app: &mut App) {
    app.model.ui.search_mode = true;
    app.model.ui.search_input = TextInput::with_value(app.model.navigation.search_term());
}
