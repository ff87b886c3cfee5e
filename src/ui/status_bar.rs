use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use imgtui::logic::formatting::{format_breadcrumb_path, format_size_mb};
use imgtui::model::{FocusPane, Model};

/// Build the "Label: value" parts shown in the status bar
fn build_status_parts(model: &Model) -> Vec<String> {
    let mut parts = vec![format!(
        "Path: {}",
        format_breadcrumb_path(model.navigation.breadcrumb().iter().map(|e| e.name.as_str()))
    )];

    parts.push(format!(
        "Items: {} folders, {} images",
        model.content.folders.len(),
        model.content.images.len()
    ));

    match model.ui.focus {
        FocusPane::Folders => {
            if let Some(folder) = model.selected_folder() {
                parts.push(format!("Selected: {}/", folder.name));
            }
        }
        FocusPane::Images => {
            if let Some(image) = model.selected_image() {
                parts.push(format!("Selected: {} ({})", image.name, format_size_mb(image.size)));
            }
        }
    }

    if let Some(error) = &model.content.last_error {
        parts.push(format!("Last error: {}", error));
    }

    parts
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model) {
    let parts = build_status_parts(model);

    let mut spans = vec![];
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        // Color the label before the first colon
        if let Some(colon_pos) = part.find(':') {
            let style = if part.starts_with("Last error") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Yellow)
            };
            spans.push(Span::styled(part[..=colon_pos].to_string(), style));
            spans.push(Span::raw(part[colon_pos + 1..].to_string()));
        } else {
            spans.push(Span::raw(part.clone()));
        }
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgtui::api::{Folder, User};

    #[test]
    fn test_status_parts_show_path_and_selection() {
        let mut model = Model::new(false);
        model.sign_in(User::default());
        let ticket = model.begin_reload();
        let contents = imgtui::api::FolderContents {
            folders: vec![Folder {
                id: "v1".to_string(),
                name: "Vacation".to_string(),
                parent_folder: None,
            }],
            images: vec![],
        };
        model.apply_load(&ticket, Ok(contents));

        let parts = build_status_parts(&model);
        assert_eq!(parts[0], "Path: Home");
        assert_eq!(parts[1], "Items: 1 folders, 0 images");
        assert_eq!(parts[2], "Selected: Vacation/");
    }
}
