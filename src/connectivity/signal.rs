use tokio::sync::broadcast;

/// A reachability transition reported by a [`NetworkSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkChange {
    Reachable,
    Unreachable,
}

impl NetworkChange {
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            NetworkChange::Reachable
        } else {
            NetworkChange::Unreachable
        }
    }

    pub fn is_reachable(self) -> bool {
        self == NetworkChange::Reachable
    }
}

/// Source of the environment's connectivity signal.
///
/// Exposes the current state and a stream of transitions. Implementations
/// only publish on transitions, never on every observation.
pub trait NetworkSignal: Send + Sync {
    fn is_reachable(&self) -> bool;
    fn subscribe(&self) -> broadcast::Receiver<NetworkChange>;
}
