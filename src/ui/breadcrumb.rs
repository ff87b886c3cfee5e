use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use imgtui::model::BreadcrumbEntry;

/// Build the trail spans; each entry is prefixed with its jump key
fn build_breadcrumb_spans(breadcrumb: &[BreadcrumbEntry]) -> Vec<Span<'_>> {
    let last = breadcrumb.len().saturating_sub(1);
    let mut spans = Vec::with_capacity(breadcrumb.len() * 3);

    for (idx, entry) in breadcrumb.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        // Only 0-9 are reachable from the keyboard
        if idx < 10 {
            spans.push(Span::styled(
                format!("{}:", idx),
                Style::default().fg(Color::Yellow),
            ));
        }
        let style = if idx == last {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(entry.name.as_str(), style));
    }

    spans
}

/// Render the breadcrumb trail ("0:Home › 1:Vacation › 2:Beach")
pub fn render_breadcrumb(f: &mut Frame, area: Rect, breadcrumb: &[BreadcrumbEntry]) {
    let trail = Paragraph::new(Line::from(build_breadcrumb_spans(breadcrumb)))
        .block(Block::default().borders(Borders::ALL).title("Location"));
    f.render_widget(trail, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_breadcrumb_spans_numbered() {
        let trail = vec![
            BreadcrumbEntry::root(),
            BreadcrumbEntry {
                name: "Vacation".to_string(),
                folder_id: Some("v1".to_string()),
            },
        ];
        assert_eq!(text(&build_breadcrumb_spans(&trail)), "0:Home › 1:Vacation");
    }

    #[test]
    fn test_breadcrumb_spans_unnumbered_past_nine() {
        let mut trail = vec![BreadcrumbEntry::root()];
        for i in 1..=10 {
            trail.push(BreadcrumbEntry {
                name: format!("f{}", i),
                folder_id: Some(format!("id{}", i)),
            });
        }
        let rendered = text(&build_breadcrumb_spans(&trail));
        assert!(rendered.contains("9:f9"));
        assert!(rendered.ends_with(" › f10"));
    }
}
