//! TCP reachability probe.
//!
//! Periodically opens a TCP connection to a well-known address. A successful
//! connect within the timeout counts as reachable. Only transitions are
//! published to subscribers.

use crate::connectivity::signal::{NetworkChange, NetworkSignal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

const CHANGE_CAPACITY: usize = 16;
/// `tokio::time::interval` rejects a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct TcpProbe {
    addr: String,
    timeout: Duration,
    reachable: AtomicBool,
    changes: broadcast::Sender<NetworkChange>,
}

impl TcpProbe {
    /// Probe once to seed the current state, then keep probing every
    /// `interval` on a background task.
    pub async fn start(
        addr: String,
        interval: Duration,
        timeout: Duration,
    ) -> (Arc<Self>, JoinHandle<()>) {
        let interval = interval.max(MIN_PERIOD);
        let timeout = timeout.max(MIN_PERIOD);
        let initial = probe_once(&addr, timeout).await;
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let probe = Arc::new(Self {
            addr,
            timeout,
            reachable: AtomicBool::new(initial),
            changes,
        });
        info!(addr = %probe.addr, reachable = initial, "connectivity probe started");

        let worker = Arc::clone(&probe);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately and we already probed.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let reachable = probe_once(&worker.addr, worker.timeout).await;
                worker.record(reachable);
            }
        });

        (probe, handle)
    }

    /// Store an observation. Returns the change published, if any.
    fn record(&self, reachable: bool) -> Option<NetworkChange> {
        let previous = self.reachable.swap(reachable, Ordering::SeqCst);
        if previous == reachable {
            return None;
        }
        let change = NetworkChange::from_reachable(reachable);
        debug!(addr = %self.addr, ?change, "reachability changed");
        // No subscribers yet is fine; the current value is still queryable.
        let _ = self.changes.send(change);
        Some(change)
    }
}

impl NetworkSignal for TcpProbe {
    fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> broadcast::Receiver<NetworkChange> {
        self.changes.subscribe()
    }
}

async fn probe_once(addr: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    fn probe_with(reachable: bool) -> TcpProbe {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        TcpProbe {
            addr: "127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(100),
            reachable: AtomicBool::new(reachable),
            changes,
        }
    }

    #[test]
    fn test_record_publishes_transitions_only() {
        let probe = probe_with(true);
        let mut rx = probe.subscribe();

        assert_eq!(probe.record(true), None);
        assert_eq!(probe.record(false), Some(NetworkChange::Unreachable));
        assert_eq!(probe.record(false), None);
        assert_eq!(probe.record(true), Some(NetworkChange::Reachable));

        assert_eq!(rx.try_recv().unwrap(), NetworkChange::Unreachable);
        assert_eq!(rx.try_recv().unwrap(), NetworkChange::Reachable);
        assert!(rx.try_recv().is_err());
        assert!(probe.is_reachable());
    }

    #[tokio::test]
    async fn test_probe_once_against_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        assert!(probe_once(&addr, Duration::from_secs(1)).await);

        drop(listener);
        assert!(!probe_once(&addr, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_start_seeds_current_state() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let (probe, handle) =
            TcpProbe::start(addr, Duration::from_secs(60), Duration::from_secs(1)).await;
        assert!(probe.is_reachable());
        handle.abort();
    }

    #[tokio::test]
    async fn test_zero_periods_are_clamped() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let (probe, handle) = TcpProbe::start(addr, Duration::ZERO, Duration::ZERO).await;
        assert_eq!(probe.timeout, MIN_PERIOD);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
