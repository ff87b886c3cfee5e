use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use imgtui::logic::formatting::mask;
use imgtui::model::ui::{ConfirmAction, CreateFolderForm, UploadField, UploadForm};
use imgtui::model::TextInput;

/// One labelled input row; the focused one gets a cursor
pub(super) fn input_line<'a>(label: &'a str, input: &'a TextInput, focused: bool) -> Line<'a> {
    let value = if input.masked {
        mask(&input.value)
    } else {
        input.value.clone()
    };
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![Span::styled(format!("{:<10}", label), label_style), Span::raw(value)];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

pub(super) fn error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        None => Line::from(""),
    }
}

fn render_popup(f: &mut Frame, area: Rect, title: &str, border: Color, lines: Vec<Line>) {
    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Render the create-folder form
pub fn render_create_folder(f: &mut Frame, form: &CreateFolderForm, parent_name: &str) {
    let hint = if form.submitting {
        Line::from(Span::styled("Creating...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(
            "Enter: Create   Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let lines = vec![
        Line::from(format!("New folder in {}", parent_name)),
        Line::from(""),
        input_line("Name", &form.name, true),
        Line::from(""),
        error_line(form.error.as_deref()),
        hint,
    ];

    let area = centered_rect(f.area(), 56, 8);
    render_popup(f, area, "Create Folder", Color::Cyan, lines);
}

/// Render the upload form
pub fn render_upload(f: &mut Frame, form: &UploadForm, folder_name: &str) {
    let hint = if form.submitting {
        Line::from(Span::styled("Uploading...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(
            "Tab: Switch field   Enter: Upload   Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let lines = vec![
        Line::from(format!("Upload image to {} (max 10MB)", folder_name)),
        Line::from(""),
        input_line("File", &form.path, form.focus == UploadField::Path),
        input_line("Name", &form.name, form.focus == UploadField::Name),
        Line::from(""),
        error_line(form.error.as_deref()),
        hint,
    ];

    let area = centered_rect(f.area(), 64, 9);
    render_popup(f, area, "Upload Image", Color::Cyan, lines);
}

fn confirmation_text(action: &ConfirmAction) -> (&'static str, String) {
    match action {
        ConfirmAction::DeleteFolder { name, .. } => (
            "Confirm Delete",
            format!(
                "Delete folder?\n\nFolder: {}\n\nWARNING: This action cannot be undone!\n\nContinue? (y/n)",
                name
            ),
        ),
        ConfirmAction::DeleteImage { name, .. } => (
            "Confirm Delete",
            format!(
                "Delete image?\n\nImage: {}\n\nWARNING: This action cannot be undone!\n\nContinue? (y/n)",
                name
            ),
        ),
        ConfirmAction::Logout => ("Confirm Logout", "Log out?\n\nContinue? (y/n)".to_string()),
    }
}

/// Render a y/n confirmation dialog
pub fn render_confirmation(f: &mut Frame, action: &ConfirmAction) {
    let (title, text) = confirmation_text(action);
    let height = text.lines().count() as u16 + 2;
    let border = match action {
        ConfirmAction::Logout => Color::Yellow,
        _ => Color::Red,
    };

    let lines = text.lines().map(|l| Line::from(l.to_string())).collect();
    let area = centered_rect(f.area(), 50, height);
    render_popup(f, area, title, border, lines);
}

/// Popup size for an alert: long messages wrap instead of widening it
fn alert_size(message: &str) -> (u16, u16) {
    let chars = message.chars().count();
    let width = (chars.min(66) as u16 + 4).clamp(30, 70);
    let inner = usize::from(width - 2);
    let message_rows = chars.div_ceil(inner).clamp(1, 8) as u16;
    // message, blank row, hint, borders
    (width, message_rows + 4)
}

/// Render a blocking error alert
pub fn render_alert(f: &mut Frame, message: &str) {
    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled("Press Enter to dismiss", Style::default().fg(Color::DarkGray))),
    ];
    let (width, height) = alert_size(message);
    let area = centered_rect(f.area(), width, height);
    render_popup(f, area, "Error", Color::Red, lines);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_alert_size_bounds_long_messages() {
        assert_eq!(alert_size("Image not found"), (30, 5));
        assert_eq!(alert_size(&"x".repeat(66)), (70, 5));
        assert_eq!(alert_size(&"x".repeat(69)), (70, 6));

        let huge = "x".repeat(100_000);
        let (width, height) = alert_size(&huge);
        assert_eq!(width, 70);
        assert_eq!(height, 12);
    }

    #[test]
    fn test_input_line_masks_password() {
        let mut input = TextInput::masked();
        input.push('a');
        input.push('b');
        assert_eq!(text(&input_line("Password", &input, false)).trim_end(), "Password  ••");
    }

    #[test]
    fn test_input_line_cursor_only_when_focused() {
        let input = TextInput::with_value("cat");
        assert!(text(&input_line("Name", &input, true)).ends_with("cat█"));
        assert!(text(&input_line("Name", &input, false)).ends_with("cat"));
    }

    #[test]
    fn test_confirmation_text_names_item() {
        let (title, body) = confirmation_text(&ConfirmAction::DeleteImage {
            id: "i1".to_string(),
            name: "beach".to_string(),
        });
        assert_eq!(title, "Confirm Delete");
        assert!(body.contains("Image: beach"));
        assert!(body.ends_with("(y/n)"));
    }
}
