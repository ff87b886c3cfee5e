use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use imgtui::model::FocusPane;

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(
    vim_mode: bool,
    focus: FocusPane,
    search_mode: bool,
    has_search_query: bool,
) -> Vec<Span<'static>> {
    // Typing a search: only the keys that end it
    if search_mode {
        return vec![
            key("Enter"),
            Span::raw(":Apply  "),
            key("Esc"),
            Span::raw(":Cancel"),
        ];
    }

    let mut hotkey_spans = vec![];

    if vim_mode {
        hotkey_spans.extend(vec![
            key("hjkl"),
            Span::raw(":Nav  "),
            key("G"),
            Span::raw(":Last  "),
            key("^d/^u"),
            Span::raw(":Page  "),
        ]);
    } else {
        hotkey_spans.extend(vec![
            key("↑/↓"),
            Span::raw(":Nav  "),
            key("←"),
            Span::raw(":Up  "),
        ]);
    }

    let open_label = match focus {
        FocusPane::Folders => ":Open  ",
        FocusPane::Images => ":Preview  ",
    };
    hotkey_spans.extend(vec![
        key("Enter"),
        Span::raw(open_label),
        key("Tab"),
        Span::raw(":Switch pane  "),
        key("0-9"),
        Span::raw(":Breadcrumb  "),
    ]);

    if has_search_query {
        hotkey_spans.extend(vec![key("Esc"), Span::raw(":Clear Search  ")]);
    } else {
        let search_key = if vim_mode { "/" } else { "^F" };
        hotkey_spans.extend(vec![key(search_key), Span::raw(":Search  ")]);
    }

    hotkey_spans.extend(vec![
        key("n"),
        Span::raw(":New folder  "),
        key("u"),
        Span::raw(":Upload  "),
        key("d"),
        Span::raw(":Delete  "),
        key("r"),
        Span::raw(":Reload  "),
        key("L"),
        Span::raw(":Logout  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Render the hotkey legend
pub fn render_legend(
    f: &mut Frame,
    area: Rect,
    vim_mode: bool,
    focus: FocusPane,
    search_mode: bool,
    has_search_query: bool,
) {
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, focus, search_mode, has_search_query));
    let legend = Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(legend, area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(
    terminal_width: u16,
    vim_mode: bool,
    focus: FocusPane,
    search_mode: bool,
    has_search_query: bool,
) -> u16 {
    // Count lines without the block; line_count() does not account for borders
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, focus, search_mode, has_search_query));
    let paragraph = Paragraph::new(vec![hotkey_line]).wrap(ratatui::widgets::Wrap { trim: false });

    let line_count = paragraph.line_count(terminal_width.saturating_sub(2));
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_legend_search_mode_only_shows_exit_keys() {
        let text = spans_to_text(&build_hotkey_spans(false, FocusPane::Folders, true, false));
        assert!(text.contains("Apply"));
        assert!(!text.contains("Upload"));
    }

    #[test]
    fn test_legend_open_label_follows_focus() {
        let folders = spans_to_text(&build_hotkey_spans(false, FocusPane::Folders, false, false));
        let images = spans_to_text(&build_hotkey_spans(false, FocusPane::Images, false, false));
        assert!(folders.contains("Enter:Open"));
        assert!(images.contains("Enter:Preview"));
    }

    #[test]
    fn test_legend_search_key_by_mode() {
        let normal = spans_to_text(&build_hotkey_spans(false, FocusPane::Folders, false, false));
        let vim = spans_to_text(&build_hotkey_spans(true, FocusPane::Folders, false, false));
        assert!(normal.contains("^F:Search"));
        assert!(vim.contains("/:Search"));
        assert!(vim.contains("hjkl"));
    }

    #[test]
    fn test_legend_offers_clear_when_filtered() {
        let text = spans_to_text(&build_hotkey_spans(false, FocusPane::Images, false, true));
        assert!(text.contains("Esc:Clear Search"));
    }

    #[test]
    fn test_legend_height_grows_when_narrow() {
        let wide = calculate_legend_height(400, false, FocusPane::Folders, false, false);
        let narrow = calculate_legend_height(40, false, FocusPane::Folders, false, false);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }
}
