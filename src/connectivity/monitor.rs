//! Connectivity banner state.
//!
//! The banner appears on every reachability transition. Coming back online
//! schedules a one-shot hide after a fixed delay. Going offline keeps the
//! banner up until connectivity returns. Each event replaces the single
//! pending hide timer, so only the latest one can ever hide the banner.

use crate::app::event::AppEvent;
use crate::connectivity::signal::{NetworkChange, NetworkSignal};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub is_online: bool,
    pub visible: bool,
}

/// The one pending hide. Dropping it cancels the timer task.
struct HideTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for HideTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct ConnectivityMonitor {
    state: ConnectivityState,
    hide_delay: Duration,
    hide_timer: Option<HideTimer>,
    generation: u64,
    listener: Option<JoinHandle<()>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    shown_at: Option<Instant>,
    disposed: bool,
}

impl ConnectivityMonitor {
    /// Seed from the signal's current value and start forwarding its
    /// transitions into the event loop as [`AppEvent::Connectivity`].
    pub fn attach(
        signal: &dyn NetworkSignal,
        hide_delay: Duration,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let mut changes = signal.subscribe();
        let forward_tx = event_tx.clone();
        let listener = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => {
                        if forward_tx.send(AppEvent::Connectivity(change)).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "connectivity listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self {
            state: ConnectivityState {
                is_online: signal.is_reachable(),
                visible: false,
            },
            hide_delay,
            hide_timer: None,
            generation: 0,
            listener: Some(listener),
            event_tx,
            shown_at: None,
            disposed: false,
        }
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// When the banner last (re)appeared, for its enter transition.
    pub fn shown_at(&self) -> Option<Instant> {
        self.shown_at
    }

    pub fn pending_hide(&self) -> Option<u64> {
        self.hide_timer.as_ref().map(|t| t.generation)
    }

    pub fn handle_change(&mut self, change: NetworkChange) {
        if self.disposed {
            return;
        }
        // Latest event wins: whatever was pending is cancelled.
        self.hide_timer = None;

        if !self.state.visible {
            self.shown_at = Some(Instant::now());
        }
        self.state = ConnectivityState {
            is_online: change.is_reachable(),
            visible: true,
        };
        debug!(?change, "connectivity banner shown");

        if change == NetworkChange::Reachable {
            self.schedule_hide();
        }
    }

    /// Apply a hide timer expiry. Expiries from replaced timers are ignored.
    pub fn handle_hide_elapsed(&mut self, generation: u64) {
        if self.disposed || self.pending_hide() != Some(generation) {
            return;
        }
        self.hide_timer = None;
        self.state.visible = false;
        self.shown_at = None;
        debug!("connectivity banner hidden");
    }

    /// Detach the listener and cancel any pending hide.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.hide_timer = None;
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }

    fn schedule_hide(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let delay = self.hide_delay;
        let tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::BannerHideElapsed { generation });
        });
        self.hide_timer = Some(HideTimer { generation, handle });
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.dispose();
    }
}
