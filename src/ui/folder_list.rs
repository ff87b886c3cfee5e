use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

use imgtui::api::Folder;

/// Border color for a pane depending on focus
pub(super) fn pane_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Highlight used by both panes; unfocused panes keep the row without arrow
pub(super) fn highlight(list: List<'_>, is_focused: bool) -> List<'_> {
    list.highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(if is_focused { "> " } else { "  " })
}

/// Render a scrollbar when the list is longer than the visible area
pub(super) fn render_scrollbar(f: &mut Frame, area: Rect, total_items: usize, offset: usize) {
    let viewport_height = area.height.saturating_sub(2) as usize;
    if total_items <= viewport_height {
        return;
    }

    let mut scrollbar_state =
        ScrollbarState::new(total_items.saturating_sub(viewport_height)).position(offset);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("█");

    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            horizontal: 0,
            vertical: 1,
        }),
        &mut scrollbar_state,
    );
}

/// Render the child folders of the current folder
pub fn render_folder_list(
    f: &mut Frame,
    area: Rect,
    folders: &[Folder],
    state: &mut ListState,
    is_focused: bool,
) {
    let title = format!("Folders ({})", folders.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(pane_border(is_focused));

    if folders.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No folders",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = folders
        .iter()
        .map(|folder| {
            ListItem::new(Line::from(vec![
                Span::styled("📁 ", Style::default().fg(Color::Yellow)),
                Span::raw(folder.name.as_str()),
            ]))
        })
        .collect();

    let list = highlight(List::new(items).block(block), is_focused);
    f.render_stateful_widget(list, area, state);
    render_scrollbar(f, area, folders.len(), state.offset());
}
