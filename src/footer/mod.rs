//! Server-supplied footer content.
//!
//! The footer is a best-effort enhancement: it starts from built-in defaults
//! and a failed fetch is logged and otherwise ignored.

pub mod source;

use crate::app::event::AppEvent;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub use source::{FooterSource, HttpFooterSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub links: Vec<FooterLink>,
    #[serde(default)]
    pub social_media: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub title: String,
    pub url: String,
    #[serde(default = "default_target")]
    pub target: String,
}

impl FooterLink {
    pub fn opens_new_window(&self) -> bool {
        self.target == "_blank"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

fn default_target() -> String {
    "_self".to_string()
}

impl Default for FooterContent {
    fn default() -> Self {
        Self {
            content: "Stay in the loop: product news, guides and release notes, once a month."
                .to_string(),
            links: vec![
                FooterLink {
                    title: "Privacy".into(),
                    url: "/privacy".into(),
                    target: default_target(),
                },
                FooterLink {
                    title: "Terms".into(),
                    url: "/terms".into(),
                    target: default_target(),
                },
            ],
            social_media: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterLoad {
    Loading,
    Loaded,
    /// The first fetch failed; defaults are shown.
    Fallback,
}

#[derive(Debug)]
pub struct Footer {
    pub content: FooterContent,
    pub load: FooterLoad,
}

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self {
            content: FooterContent::default(),
            load: FooterLoad::Loading,
        }
    }

    /// Apply a fetch result. Failures keep the last-known content.
    pub fn apply(&mut self, result: Result<FooterContent>) {
        match result {
            Ok(content) => {
                info!(
                    links = content.links.len(),
                    social = content.social_media.len(),
                    "footer content loaded"
                );
                self.content = content;
                self.load = FooterLoad::Loaded;
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "footer fetch failed; keeping current content");
                if self.load == FooterLoad::Loading {
                    self.load = FooterLoad::Fallback;
                }
            }
        }
    }
}

/// The one running fetch. Dropping it cancels the task.
struct FetchTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs footer fetches on a background task, at most one at a time.
///
/// Results are delivered as [`AppEvent::FooterLoaded`] tagged with the
/// generation that produced them. Starting a fetch aborts the previous one,
/// so an older response can never land after a newer one.
pub struct FooterFetcher {
    source: Arc<dyn FooterSource>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    generation: u64,
    task: Option<FetchTask>,
}

impl FooterFetcher {
    pub fn new(source: Arc<dyn FooterSource>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            source,
            event_tx,
            generation: 0,
            task: None,
        }
    }

    pub fn start(&mut self) -> u64 {
        self.task = None;
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            let result = source.fetch().await;
            let _ = tx.send(AppEvent::FooterLoaded { generation, result });
        });
        self.task = Some(FetchTask { generation, handle });
        generation
    }

    /// Claim a delivered result. `false` means it came from a replaced fetch
    /// and must be dropped.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.task.as_ref().map(|t| t.generation) != Some(generation) {
            return false;
        }
        self.task = None;
        true
    }

    pub fn cancel(&mut self) {
        self.task = None;
    }
}
