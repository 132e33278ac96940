use crate::config::AppConfig;
use crate::connectivity::ConnectivityMonitor;
use crate::footer::{Footer, FooterFetcher, FooterLoad};
use crate::subscribe::{SubmissionController, SubmitStatus};
use crate::ui::motion::{self, Transition};
use std::time::Instant;

pub struct AppState {
    pub config: AppConfig,
    pub connectivity: ConnectivityMonitor,
    pub form: SubmissionController,
    pub footer: Footer,
    pub footer_fetch: FooterFetcher,
    pub ticks: u64,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        connectivity: ConnectivityMonitor,
        form: SubmissionController,
        footer_fetch: FooterFetcher,
    ) -> Self {
        Self {
            config,
            connectivity,
            form,
            footer: Footer::new(),
            footer_fetch,
            ticks: 0,
            should_quit: false,
            dirty: true,
            status_message: None,
        }
    }

    /// Enter transition of the banner, if it is shown and animations are on.
    pub fn banner_transition(&self) -> Option<Transition> {
        if !self.config.ui.animations || !self.connectivity.state().visible {
            return None;
        }
        self.connectivity
            .shown_at()
            .map(|start| Transition::new(start, motion::BANNER_ENTER))
    }

    /// Whether the next tick needs a redraw.
    pub fn is_animating(&self) -> bool {
        if !self.config.ui.animations {
            return false;
        }
        let banner_moving = self
            .banner_transition()
            .is_some_and(|t| !t.is_done_at(Instant::now()));
        banner_moving
            || self.footer.load == FooterLoad::Loading
            || matches!(self.form.status(), SubmitStatus::Submitting)
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        let net = if self.connectivity.state().is_online {
            "online"
        } else {
            "offline"
        };
        let footer = match self.footer.load {
            FooterLoad::Loading => "loading",
            FooterLoad::Loaded => "live",
            FooterLoad::Fallback => "default",
        };
        let form = match self.form.status() {
            SubmitStatus::Idle => "ready",
            SubmitStatus::Submitting => "sending",
            SubmitStatus::Success { .. } => "subscribed",
            SubmitStatus::Error { .. } => "failed",
        };
        format!("Network: {} | Footer: {} | Form: {}", net, footer, form)
    }

    /// Tear down both controllers and any footer fetch. Late events become
    /// no-ops.
    pub fn dispose(&mut self) {
        self.connectivity.dispose();
        self.form.dispose();
        self.footer_fetch.cancel();
    }
}
