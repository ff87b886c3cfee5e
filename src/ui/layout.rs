use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for the dashboard
pub struct LayoutInfo {
    /// Top bar (app title, user, loading state)
    pub header_area: Rect,
    /// Breadcrumb trail
    pub breadcrumb_area: Rect,
    /// Left pane: child folders
    pub folders_area: Rect,
    /// Right pane: images
    pub images_area: Rect,
    /// Search input area (if visible)
    pub search_area: Option<Rect>,
    pub legend_area: Rect,
    pub status_area: Rect,
}

/// Calculate the dashboard layout
///
/// Folders take 35% of the content width (at least 20 columns), images the
/// rest.
pub fn calculate_layout(terminal_size: Rect, search_visible: bool, legend_height: u16) -> LayoutInfo {
    let search_height = if search_visible { 3 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(3),             // Breadcrumb trail
            Constraint::Min(3),                // Folders + images
            Constraint::Length(search_height), // Search input (hidden when 0)
            Constraint::Length(legend_height), // Legend (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    let content_area = main_chunks[2];
    let folders_width = (content_area.width * 35 / 100).max(20).min(content_area.width);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(folders_width), Constraint::Min(0)])
        .split(content_area);

    LayoutInfo {
        header_area: main_chunks[0],
        breadcrumb_area: main_chunks[1],
        folders_area: panes[0],
        images_area: panes[1],
        search_area: if search_visible {
            Some(main_chunks[3])
        } else {
            None
        },
        legend_area: main_chunks[4],
        status_area: main_chunks[5],
    }
}

/// Centered popup area, clamped to the frame
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_panes() {
        let info = calculate_layout(Rect::new(0, 0, 100, 40), false, 3);
        assert!(info.search_area.is_none());
        assert_eq!(info.folders_area.width, 35);
        assert_eq!(info.images_area.width, 65);
        assert_eq!(info.status_area.y + info.status_area.height, 40);
    }

    #[test]
    fn test_layout_reserves_search_row() {
        let info = calculate_layout(Rect::new(0, 0, 100, 40), true, 3);
        let search = info.search_area.expect("search area");
        assert_eq!(search.height, 3);
        assert_eq!(search.y + search.height, info.legend_area.y);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(area, 20, 4), Rect::new(5, 3, 20, 4));
        assert_eq!(centered_rect(area, 50, 20), area);
    }
}
