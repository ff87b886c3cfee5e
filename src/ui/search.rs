//! Search Input UI
//!
//! Renders the image search box with the typed term and result count.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title for the search box
///
/// `match_count` is only meaningful once the term was applied and loaded.
fn search_title(active: bool, applied_term: &str, match_count: Option<usize>, vim_mode: bool) -> String {
    if active {
        " Search images - Enter to apply, Esc to cancel ".to_string()
    } else if !applied_term.is_empty() {
        match match_count {
            Some(count) => format!(" Search ({} matches) - Esc to clear ", count),
            None => " Search - Esc to clear ".to_string(),
        }
    } else {
        let search_key = if vim_mode { "/" } else { "Ctrl-F" };
        format!(" Search ({}) ", search_key)
    }
}

/// Render search input box above legend
///
/// # Arguments
/// - `input`: Text being typed (or the applied term when not typing)
/// - `active`: Whether input is actively receiving keystrokes
/// - `applied_term`: Term the current listing is filtered by
/// - `match_count`: Images shown for the applied term (None while loading)
pub fn render_search_input(
    f: &mut Frame,
    area: Rect,
    input: &str,
    active: bool,
    applied_term: &str,
    match_count: Option<usize>,
    vim_mode: bool,
) {
    let border_color = if active { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(search_title(active, applied_term, match_count, vim_mode))
        .style(Style::default().fg(border_color));

    let input_line = if active {
        let cursor_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::SLOW_BLINK);
        Line::from(vec![
            Span::raw("Name: "),
            Span::raw(input),
            Span::styled("█", cursor_style),
        ])
    } else {
        Line::from(vec![Span::styled(
            format!("Name: {}", applied_term),
            Style::default().fg(Color::Gray),
        )])
    };

    f.render_widget(Paragraph::new(vec![input_line]).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_title_states() {
        assert!(search_title(true, "", None, false).contains("Enter to apply"));
        assert_eq!(
            search_title(false, "cat", Some(2), false),
            " Search (2 matches) - Esc to clear "
        );
        assert_eq!(search_title(false, "cat", None, false), " Search - Esc to clear ");
        assert_eq!(search_title(false, "", None, true), " Search (/) ");
    }
}
