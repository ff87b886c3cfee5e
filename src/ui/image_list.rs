use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::folder_list::{highlight, pane_border, render_scrollbar};
use imgtui::api::Image;
use imgtui::logic::formatting::{format_date, format_size_mb};

const INFO_COLOR: Color = Color::Rgb(120, 120, 120);

/// Size and upload date shown right-aligned after the name
fn image_info(image: &Image) -> String {
    let date = format_date(&image.created_at);
    if date.is_empty() {
        format_size_mb(image.size)
    } else {
        format!("{}  {}", format_size_mb(image.size), date)
    }
}

/// Build one row; info is dropped when the pane is too narrow for it
fn build_image_spans(image: &Image, panel_width: u16) -> Vec<Span<'_>> {
    // borders(2) + highlight(2) + padding(2)
    let available_width = panel_width.saturating_sub(6) as usize;
    let spacing = 2;

    let icon = "🖼  ";
    let name_width = icon.width() + image.name.width();
    let info = image_info(image);
    let info_width = info.width();

    let mut spans = vec![Span::raw(icon), Span::raw(image.name.as_str())];
    if name_width + spacing + info_width <= available_width {
        let padding = available_width - name_width - info_width;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(info, Style::default().fg(INFO_COLOR)));
    } else {
        // Keep just the size if that fits
        let size = format_size_mb(image.size);
        if name_width + spacing + size.width() <= available_width {
            let padding = available_width - name_width - size.width();
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(size, Style::default().fg(INFO_COLOR)));
        }
    }
    spans
}

/// Render the images of the current folder (already filtered by search)
pub fn render_image_list(
    f: &mut Frame,
    area: Rect,
    images: &[Image],
    search_term: &str,
    state: &mut ListState,
    is_focused: bool,
) {
    let title = if search_term.is_empty() {
        format!("Images ({})", images.len())
    } else {
        format!("Images matching \"{}\" ({})", search_term, images.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(pane_border(is_focused));

    if images.is_empty() {
        let message = if search_term.is_empty() {
            "No images"
        } else {
            "No images match the search"
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = images
        .iter()
        .map(|image| ListItem::new(Line::from(build_image_spans(image, area.width))))
        .collect();

    let list = highlight(List::new(items).block(block), is_focused);
    f.render_stateful_widget(list, area, state);
    render_scrollbar(f, area, images.len(), state.offset());
}
