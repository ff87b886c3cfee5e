use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use imgtui::api::User;

/// Render the top bar: app name, signed-in user and load state
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    user: Option<&User>,
    loading: bool,
    last_error: Option<&str>,
) {
    let mut spans = vec![Span::styled(
        "Image Manager",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if let Some(user) = user {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Welcome, {}", user.display_name()),
            Style::default().fg(Color::White),
        ));
    }

    if loading {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Loading...", Style::default().fg(Color::Yellow)));
    } else if let Some(error) = last_error {
        // Raw error detail, the previous listing stays visible
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Error fetching data: {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(header, area);
}
