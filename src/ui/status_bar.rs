use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const KEY_HINTS: &str = " Esc quit · ^R reload footer · ^U clear ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let net_style = if state.connectivity.state().is_online {
        Style::default().fg(Color::Green).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Red).bg(Color::DarkGray)
    };

    let mut parts: Vec<Span> = vec![
        Span::styled(" ● ", net_style),
        Span::styled(format!("{} ", state.status_line()), Theme::status_bar()),
    ];

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.chars().count()).sum();
    let remaining = (area.width as usize).saturating_sub(used + KEY_HINTS.chars().count());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        KEY_HINTS,
        Style::default().fg(Color::Cyan).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
