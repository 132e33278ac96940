use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::footer::FooterLoad;
use crate::subscribe::{SubmitError, SubmitOutcome};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Connectivity(change) => {
            state.connectivity.handle_change(change);
            state.dirty = true;
            vec![]
        }
        AppEvent::BannerHideElapsed { generation } => {
            state.connectivity.handle_hide_elapsed(generation);
            state.dirty = true;
            vec![]
        }
        AppEvent::SubmitFinished { request_id, result } => {
            state.form.complete(request_id, result);
            state.dirty = true;
            vec![]
        }
        AppEvent::FooterLoaded { generation, result } => {
            if state.footer_fetch.finish(generation) {
                state.footer.apply(result);
                state.dirty = true;
            } else {
                debug!(generation, "stale footer result dropped");
            }
            vec![]
        }
        AppEvent::Tick => {
            state.ticks = state.ticks.wrapping_add(1);
            if state.is_animating() {
                state.dirty = true;
            }
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        CEvent::Paste(text) => {
            if state.form.accepts_input() {
                state.form.input.insert_str(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return vec![Action::Quit],
        KeyCode::Char('c') if ctrl => return vec![Action::Quit],
        KeyCode::Char('r') if ctrl => {
            if state.footer.load == FooterLoad::Fallback {
                state.footer.load = FooterLoad::Loading;
            }
            return vec![Action::FetchFooter];
        }
        _ => {}
    }

    // Locked while sending and after success.
    if !state.form.accepts_input() {
        debug!(code = ?key.code, "key ignored while form is locked");
        return vec![];
    }
    state.status_message = None;

    match key.code {
        KeyCode::Enter => submit(state),
        KeyCode::Char('u') if ctrl => state.form.input.clear(),
        KeyCode::Char(c) if !ctrl => {
            if !state.form.input.insert_char(c) {
                debug!(?c, "char rejected by email field");
            }
        }
        KeyCode::Backspace => state.form.input.delete_back(),
        KeyCode::Delete => state.form.input.delete_forward(),
        KeyCode::Left => state.form.input.move_left(),
        KeyCode::Right => state.form.input.move_right(),
        KeyCode::Home => state.form.input.move_home(),
        KeyCode::End => state.form.input.move_end(),
        _ => {}
    }
    vec![]
}

fn submit(state: &mut AppState) {
    match state.form.submit_input() {
        Ok(SubmitOutcome::Sent(request_id)) => debug!(request_id, "subscribe submitted"),
        Ok(SubmitOutcome::Ignored) => {}
        Err(SubmitError::Validation) => {
            state.status_message = Some("Enter an email address to subscribe.".to_string());
        }
        Err(e) => state.status_message = Some(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::connectivity::signal::testing::ManualSignal;
    use crate::connectivity::{ConnectivityMonitor, NetworkChange};
    use crate::footer::source::testing::StaticSource;
    use crate::footer::{FooterContent, FooterFetcher};
    use crate::subscribe::api::testing::FakeApi;
    use crate::subscribe::{SubmissionController, SubmitStatus};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn app(api: Arc<FakeApi>) -> (AppState, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signal = ManualSignal::new(true);
        let monitor = ConnectivityMonitor::attach(&signal, Duration::from_secs(3), tx.clone());
        let form = SubmissionController::new(api, "/", tx.clone());
        let footer_fetch = FooterFetcher::new(Arc::new(StaticSource(None)), tx);
        (AppState::new(AppConfig::default(), monitor, form, footer_fetch), rx)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_event(state, key(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_enter_on_empty_input_shows_hint() {
        let api = FakeApi::replying(Ok(serde_json::Value::Null));
        let (mut state, _rx) = app(api.clone());

        handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(state.form.status(), &SubmitStatus::Idle);
        assert!(state.status_message.is_some());
        assert_eq!(api.call_count(), 0);

        type_str(&mut state, "a");
        assert!(state.status_message.is_none());
    }

    #[tokio::test]
    async fn test_typing_and_submit_round_trip() {
        let api = FakeApi::replying(Ok(serde_json::json!({ "ok": true })));
        let (mut state, mut rx) = app(api);

        type_str(&mut state, "user@example.com");
        handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(state.form.status(), &SubmitStatus::Submitting);

        // Locked while in flight.
        type_str(&mut state, "xyz");
        assert_eq!(state.form.input.text, "user@example.com");

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::SubmitFinished { .. }));
        handle_event(&mut state, event);
        assert!(matches!(state.form.status(), SubmitStatus::Success { .. }));
        assert!(state.form.input.text.is_empty());

        // Stays locked after success.
        type_str(&mut state, "again");
        assert!(state.form.input.text.is_empty());
    }

    #[tokio::test]
    async fn test_editing_keys() {
        let api = FakeApi::hanging();
        let (mut state, _rx) = app(api);

        type_str(&mut state, "abc");
        handle_event(&mut state, key(KeyCode::Left));
        handle_event(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.form.input.text, "ac");
        handle_event(&mut state, key(KeyCode::Home));
        handle_event(&mut state, key(KeyCode::Delete));
        assert_eq!(state.form.input.text, "c");
        handle_event(&mut state, ctrl('u'));
        assert!(state.form.input.text.is_empty());
    }

    #[tokio::test]
    async fn test_paste_and_space_keep_address_clean() {
        let (mut state, _rx) = app(FakeApi::hanging());
        handle_event(&mut state, AppEvent::Terminal(CEvent::Paste(" user@example.com\n".into())));
        handle_event(&mut state, key(KeyCode::Char(' ')));
        assert_eq!(state.form.input.text, "user@example.com");
    }

    #[tokio::test]
    async fn test_quit_and_refetch_keys() {
        let (mut state, _rx) = app(FakeApi::hanging());
        assert_eq!(handle_event(&mut state, key(KeyCode::Esc)), vec![Action::Quit]);
        assert_eq!(handle_event(&mut state, ctrl('c')), vec![Action::Quit]);

        state.footer.apply(Err(anyhow::anyhow!("down")));
        assert_eq!(state.footer.load, FooterLoad::Fallback);
        assert_eq!(handle_event(&mut state, ctrl('r')), vec![Action::FetchFooter]);
        assert_eq!(state.footer.load, FooterLoad::Loading);
    }

    #[tokio::test]
    async fn test_superseded_footer_result_is_dropped() {
        let (mut state, _rx) = app(FakeApi::hanging());
        let first = state.footer_fetch.start();
        let second = state.footer_fetch.start();
        let content = |text: &str| FooterContent {
            content: text.into(),
            ..FooterContent::default()
        };

        handle_event(
            &mut state,
            AppEvent::FooterLoaded {
                generation: first,
                result: Ok(content("old")),
            },
        );
        assert_eq!(state.footer.load, FooterLoad::Loading);
        assert_eq!(state.footer.content, FooterContent::default());

        handle_event(
            &mut state,
            AppEvent::FooterLoaded {
                generation: second,
                result: Ok(content("new")),
            },
        );
        assert_eq!(state.footer.load, FooterLoad::Loaded);
        assert_eq!(state.footer.content.content, "new");

        // A repeat delivery for a finished fetch is ignored too.
        handle_event(
            &mut state,
            AppEvent::FooterLoaded {
                generation: second,
                result: Ok(content("again")),
            },
        );
        assert_eq!(state.footer.content.content, "new");
    }

    #[tokio::test]
    async fn test_connectivity_events_drive_banner() {
        let (mut state, _rx) = app(FakeApi::hanging());
        assert!(!state.connectivity.state().visible);

        handle_event(&mut state, AppEvent::Connectivity(NetworkChange::Unreachable));
        assert!(state.connectivity.state().visible);
        assert!(state.status_line().contains("offline"));

        handle_event(&mut state, AppEvent::Connectivity(NetworkChange::Reachable));
        let generation = state.connectivity.pending_hide().unwrap();
        handle_event(&mut state, AppEvent::BannerHideElapsed { generation });
        assert!(!state.connectivity.state().visible);
        assert!(state.status_line().contains("online"));
    }

    #[tokio::test]
    async fn test_dispose_ignores_late_events() {
        let api = FakeApi::hanging();
        let (mut state, _rx) = app(api);
        type_str(&mut state, "user@example.com");
        handle_event(&mut state, key(KeyCode::Enter));

        state.dispose();
        handle_event(
            &mut state,
            AppEvent::SubmitFinished {
                request_id: 1,
                result: Ok(serde_json::Value::Null),
            },
        );
        handle_event(&mut state, AppEvent::Connectivity(NetworkChange::Unreachable));

        assert_eq!(state.form.status(), &SubmitStatus::Submitting);
        assert!(!state.connectivity.state().visible);
    }
}
