//! Network reachability tracking and the transient online/offline banner.

pub mod monitor;
pub mod probe;
pub mod signal;

pub use monitor::{ConnectivityMonitor, ConnectivityState};
pub use probe::TcpProbe;
pub use signal::{NetworkChange, NetworkSignal};
