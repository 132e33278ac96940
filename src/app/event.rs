use crate::connectivity::NetworkChange;
use crate::footer::FooterContent;
use crate::subscribe::controller::RequestId;
use crate::subscribe::SubmitError;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Reachability transition from the network signal
    Connectivity(NetworkChange),

    /// The banner's hide delay ran out
    BannerHideElapsed {
        generation: u64,
    },

    /// Subscribe request resolved
    SubmitFinished {
        request_id: RequestId,
        result: Result<serde_json::Value, SubmitError>,
    },

    /// Footer fetch resolved
    FooterLoaded {
        generation: u64,
        result: anyhow::Result<FooterContent>,
    },

    /// Tick for UI refresh
    Tick,
}
