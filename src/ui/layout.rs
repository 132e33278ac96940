use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub banner: Rect,
    pub heading: Rect,
    pub form: Rect,
    pub form_message: Rect,
    pub footer: Rect,
    pub status_bar: Rect,
}

/// The banner row collapses to zero height when hidden.
pub fn compute_layout(area: Rect, banner_visible: bool) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(u16::from(banner_visible)), // Banner
            Constraint::Length(2),                          // Heading
            Constraint::Length(3),                          // Email input
            Constraint::Length(1),                          // Form message
            Constraint::Min(4),                             // Footer
            Constraint::Length(1),                          // Status bar
        ])
        .split(area);

    AppLayout {
        banner: chunks[0],
        heading: chunks[1],
        form: chunks[2],
        form_message: chunks[3],
        footer: chunks[4],
        status_bar: chunks[5],
    }
}
