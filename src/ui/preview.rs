//! Image preview popup
//!
//! Metadata line on top, the image itself below. The decoded protocol is
//! owned by the runtime and only borrowed here for rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use ratatui_image::{protocol::StatefulProtocol, StatefulImage};

use super::layout::centered_rect;
use imgtui::logic::formatting::format_size_mb;
use imgtui::model::ui::{PreviewState, PreviewStatus};

fn metadata_line(state: &PreviewState) -> Line<'_> {
    let mut spans = vec![
        Span::styled("Size: ", Style::default().fg(Color::Yellow)),
        Span::raw(format_size_mb(state.size)),
    ];
    if let PreviewStatus::Ready { dimensions, format } = &state.status {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Dimensions: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!("{}x{}", dimensions.0, dimensions.1)));
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Color: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format.as_str()));
    }
    Line::from(spans)
}

/// Render the preview popup over the dashboard
pub fn render_preview(f: &mut Frame, state: &PreviewState, protocol: Option<&mut StatefulProtocol>) {
    let frame_area = f.area();
    let area = centered_rect(
        frame_area,
        frame_area.width.saturating_sub(8),
        frame_area.height.saturating_sub(4),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} (Esc to close) ", state.name))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    f.render_widget(Paragraph::new(metadata_line(state)), chunks[0]);

    match (&state.status, protocol) {
        (PreviewStatus::Ready { .. }, Some(protocol)) => {
            f.render_stateful_widget(StatefulImage::default(), chunks[1], protocol);
        }
        (PreviewStatus::Failed(message), _) => {
            let text = Paragraph::new(Line::from(Span::styled(
                format!("Image preview unavailable: {}", message),
                Style::default().fg(Color::Red),
            )));
            f.render_widget(text, chunks[1]);
        }
        _ => {
            let text = Paragraph::new(Line::from(Span::styled(
                "Loading image...",
                Style::default().fg(Color::Yellow),
            )));
            f.render_widget(text, chunks[1]);
        }
    }
}
