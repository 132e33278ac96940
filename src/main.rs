mod app;
mod config;
mod connectivity;
mod footer;
mod logging;
mod subscribe;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::connectivity::{ConnectivityMonitor, TcpProbe};
use crate::footer::{FooterFetcher, FooterSource, HttpFooterSource};
use crate::subscribe::{HttpSubscribeApi, SubmissionController, SubmitError};
use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config, writing the defaults out on first run
    let cfg = config::load_config()?;
    if !config::config_exists() {
        if let Err(e) = config::save_config(&cfg) {
            eprintln!("Warning: could not write default config: {:#}", e);
        }
    }
    logging::init(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let (probe, probe_task) = TcpProbe::start(
        cfg.connectivity.probe_addr.clone(),
        cfg.connectivity.probe_interval(),
        cfg.connectivity.probe_timeout(),
    )
    .await;
    let monitor =
        ConnectivityMonitor::attach(probe.as_ref(), cfg.connectivity.hide_delay(), event_tx.clone());

    let api = Arc::new(HttpSubscribeApi::new(
        cfg.api.subscribe_url(),
        cfg.api.timeout(),
    )?);
    let form = SubmissionController::new(api, cfg.form.page.clone(), event_tx.clone())
        .on_success(|payload| info!(%payload, "subscription confirmed by server"))
        .on_error(|err| match err {
            SubmitError::Request(reason) => warn!(kind = "transport", %reason, "subscribe failed"),
            SubmitError::Response { status, detail } => {
                warn!(kind = "server", status, ?detail, "subscribe rejected")
            }
            SubmitError::Validation => {}
        });

    let footer_source: Arc<dyn FooterSource> = Arc::new(HttpFooterSource::new(
        cfg.api.footer_url(),
        cfg.api.timeout(),
    )?);

    let tick_rate = std::time::Duration::from_millis(cfg.ui.tick_rate_ms.max(1));
    let footer_fetch = FooterFetcher::new(footer_source, event_tx.clone());
    let mut state = AppState::new(cfg, monitor, form, footer_fetch);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    state.footer_fetch.start();

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            match action {
                Action::FetchFooter => {
                    state.footer_fetch.start();
                }
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    state.dispose();
    probe_task.abort();
    info!("shutting down");
    Ok(())
}
