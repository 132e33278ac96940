mod banner;
mod footer;
mod layout;
pub mod motion;
mod skeleton;
mod status_bar;
mod subscribe_form;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, state.connectivity.state().visible);

    banner::render(frame, app_layout.banner, state);
    render_heading(frame, app_layout.heading);
    subscribe_form::render(frame, app_layout.form, state);
    subscribe_form::render_message(frame, app_layout.form_message, state);
    footer::render(frame, app_layout.footer, state);
    status_bar::render(frame, app_layout.status_bar, state);
}

fn render_heading(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(" Subscribe to our newsletter", theme::Theme::heading())),
        Line::from(Span::styled(
            " No spam. Unsubscribe any time.",
            theme::Theme::muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::connectivity::signal::testing::ManualSignal;
    use crate::connectivity::{ConnectivityMonitor, NetworkChange};
    use crate::footer::source::testing::StaticSource;
    use crate::footer::FooterFetcher;
    use crate::subscribe::api::testing::FakeApi;
    use crate::subscribe::SubmissionController;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn state() -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        let signal = ManualSignal::new(true);
        let monitor = ConnectivityMonitor::attach(&signal, Duration::from_secs(3), tx.clone());
        let form = SubmissionController::new(FakeApi::hanging(), "/", tx.clone());
        let footer_fetch = FooterFetcher::new(Arc::new(StaticSource(None)), tx);
        let mut config = AppConfig::default();
        config.ui.animations = false;
        AppState::new(config, monitor, form, footer_fetch)
    }

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(80)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_banner_absent_until_transition() {
        let mut state = state();
        assert!(!screen(&state).contains("offline."));

        state
            .connectivity
            .handle_change(NetworkChange::Unreachable);
        let text = screen(&state);
        assert!(text.lines().next().unwrap().contains("You are offline"));
    }

    fn cursor_x(state: &AppState) -> u16 {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal.get_cursor_position().unwrap().x
    }

    #[tokio::test]
    async fn test_cursor_tracks_display_width() {
        let mut narrow = state();
        narrow.form.input.insert_str("ab");
        let mut wide = state();
        wide.form.input.insert_str("メー");
        assert_eq!(cursor_x(&wide), cursor_x(&narrow) + 2);
    }

    #[tokio::test]
    async fn test_form_shows_error_message() {
        let mut state = state();
        let id = match state.form.submit("user@example.com").unwrap() {
            crate::subscribe::SubmitOutcome::Sent(id) => id,
            other => panic!("unexpected {:?}", other),
        };
        state.form.complete(
            id,
            Err(crate::subscribe::SubmitError::Response {
                status: 409,
                detail: Some("Already subscribed".into()),
            }),
        );
        assert!(screen(&state).contains("Already subscribed"));
    }
}
