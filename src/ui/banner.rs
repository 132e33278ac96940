use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const ONLINE_TEXT: &str = " ● Back online";
const OFFLINE_TEXT: &str = " ● You are offline. Check your connection.";

/// Renders nothing at all while the banner is hidden.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let connectivity = state.connectivity.state();
    if !connectivity.visible || area.height == 0 {
        return;
    }

    let (text, style) = if connectivity.is_online {
        (ONLINE_TEXT, Theme::banner_online())
    } else {
        (OFFLINE_TEXT, Theme::banner_offline())
    };

    let progress = state
        .banner_transition()
        .map(|t| t.progress())
        .unwrap_or(1.0);
    let revealed = Rect {
        width: revealed_width(area.width, progress),
        ..area
    };
    frame.render_widget(Paragraph::new(text).style(style), revealed);
}

/// Slide in from the left edge.
fn revealed_width(full: u16, progress: f64) -> u16 {
    let width = (f64::from(full) * progress).round() as u16;
    width.clamp(full.min(1), full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revealed_width() {
        assert_eq!(revealed_width(80, 0.0), 1);
        assert_eq!(revealed_width(80, 0.5), 40);
        assert_eq!(revealed_width(80, 1.0), 80);
        assert_eq!(revealed_width(0, 1.0), 0);
    }
}
