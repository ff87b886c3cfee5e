use ratatui::widgets::ListState;
use ratatui::Frame;

use super::{
    breadcrumb, dialogs, folder_list, header, image_list, layout, legend, login, preview, search,
    status_bar, toast,
};
use crate::App;
use imgtui::model::{FocusPane, Screen};

/// Main render function - draws the current screen from the model
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();

    if app.model.screen == Screen::Login {
        login::render_login(f, &app.model.auth);
        return;
    }

    let model = &app.model;
    let has_search_query = !model.navigation.search_term().is_empty();
    let search_visible = model.ui.search_mode || has_search_query;

    let legend_height = legend::calculate_legend_height(
        size.width,
        model.ui.vim_mode,
        model.ui.focus,
        model.ui.search_mode,
        has_search_query,
    );
    let layout_info = layout::calculate_layout(size, search_visible, legend_height);

    header::render_header(
        f,
        layout_info.header_area,
        model.user.as_ref(),
        model.content.loading,
        model.content.last_error.as_deref(),
    );
    breadcrumb::render_breadcrumb(f, layout_info.breadcrumb_area, model.navigation.breadcrumb());

    // Create temporary ListStates for rendering
    let mut folder_state = ListState::default();
    folder_state.select(model.ui.folder_selection);
    folder_list::render_folder_list(
        f,
        layout_info.folders_area,
        &model.content.folders,
        &mut folder_state,
        model.ui.focus == FocusPane::Folders,
    );

    let mut image_state = ListState::default();
    image_state.select(model.ui.image_selection);
    image_list::render_image_list(
        f,
        layout_info.images_area,
        &model.content.images,
        // Title follows the listing actually shown, not the pending term
        model
            .content
            .shown_key
            .as_ref()
            .map(|k| k.search.as_str())
            .unwrap_or(""),
        &mut image_state,
        model.ui.focus == FocusPane::Images,
    );

    if let Some(search_area) = layout_info.search_area {
        let applied = model.navigation.search_term();
        let match_count = match &model.content.shown_key {
            Some(key) if !model.content.loading && key.search == applied => {
                Some(model.content.images.len())
            }
            _ => None,
        };
        search::render_search_input(
            f,
            search_area,
            &model.ui.search_input.value,
            model.ui.search_mode,
            applied,
            match_count,
            model.ui.vim_mode,
        );
    }

    legend::render_legend(
        f,
        layout_info.legend_area,
        model.ui.vim_mode,
        model.ui.focus,
        model.ui.search_mode,
        has_search_query,
    );
    status_bar::render_status_bar(f, layout_info.status_area, model);

    // Popups, lowest first
    let current_name = model.navigation.current_name();
    if let Some(form) = &model.ui.create_folder {
        dialogs::render_create_folder(f, form, current_name);
    }
    if let Some(form) = &model.ui.upload {
        dialogs::render_upload(f, form, current_name);
    }
    if let Some(state) = &app.model.ui.preview {
        preview::render_preview(f, state, app.preview_protocol.as_mut());
    }
    if let Some(action) = &app.model.ui.confirm {
        dialogs::render_confirmation(f, action);
    }
    if let Some(message) = &app.model.ui.alert {
        dialogs::render_alert(f, message);
    }

    if let Some((message, _timestamp)) = &app.model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
