//! Subscribe form lifecycle: `Idle -> Submitting -> Success | Error`.
//!
//! At most one request is in flight per controller. The request runs on a
//! spawned task and reports back through the event loop as
//! [`AppEvent::SubmitFinished`], which the loop hands to
//! [`SubmissionController::complete`]. Completions for stale requests, or
//! arriving after [`SubmissionController::dispose`], are dropped.

use crate::app::event::AppEvent;
use crate::app::input::InputState;
use crate::subscribe::api::{SubscribeApi, SubscribeRequest};
use crate::subscribe::error::SubmitError;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const SUCCESS_MESSAGE: &str = "Thanks for subscribing! Please check your inbox to confirm.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

pub type RequestId = u64;
pub type SuccessCallback = Box<dyn FnMut(&Value) + Send>;
pub type ErrorCallback = Box<dyn FnMut(&SubmitError) + Send>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Success { message: String },
    Error { message: String },
}

impl SubmitStatus {
    /// User-facing text. Empty while idle or submitting.
    pub fn message(&self) -> &str {
        match self {
            SubmitStatus::Success { message } | SubmitStatus::Error { message } => message,
            SubmitStatus::Idle | SubmitStatus::Submitting => "",
        }
    }
}

/// What a call to [`SubmissionController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent(RequestId),
    /// A request was already in flight (or the form is gone).
    Ignored,
}

struct InFlight {
    id: RequestId,
    handle: JoinHandle<()>,
}

pub struct SubmissionController {
    pub input: InputState,
    status: SubmitStatus,
    api: Arc<dyn SubscribeApi>,
    page: String,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    disposed: bool,
}

impl SubmissionController {
    pub fn new(
        api: Arc<dyn SubscribeApi>,
        page: impl Into<String>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            input: InputState::new(),
            status: SubmitStatus::Idle,
            api,
            page: page.into(),
            event_tx,
            in_flight: None,
            next_request_id: 0,
            on_success: None,
            on_error: None,
            disposed: false,
        }
    }

    pub fn on_success(mut self, callback: impl FnMut(&Value) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnMut(&SubmitError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether keystrokes and submit are enabled. A successful form stays
    /// locked so the same address is not sent twice.
    pub fn accepts_input(&self) -> bool {
        !self.disposed
            && self.in_flight.is_none()
            && matches!(self.status, SubmitStatus::Idle | SubmitStatus::Error { .. })
    }

    /// Submit whatever is in the input field.
    pub fn submit_input(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let email = self.input.text.clone();
        self.submit(&email)
    }

    pub fn submit(&mut self, email: &str) -> Result<SubmitOutcome, SubmitError> {
        if self.disposed || self.in_flight.is_some() {
            debug!("submit ignored: request already in flight");
            return Ok(SubmitOutcome::Ignored);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(SubmitError::Validation);
        }

        self.status = SubmitStatus::Submitting;
        self.next_request_id += 1;
        let id = self.next_request_id;
        let request = SubscribeRequest::new(email, &self.page, Utc::now());
        info!(request_id = id, page = %self.page, "subscribe request sent");

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            let result = api.subscribe(request).await;
            let _ = tx.send(AppEvent::SubmitFinished {
                request_id: id,
                result,
            });
        });
        self.in_flight = Some(InFlight { id, handle });
        Ok(SubmitOutcome::Sent(id))
    }

    /// Apply the result of request `request_id`.
    pub fn complete(&mut self, request_id: RequestId, result: Result<Value, SubmitError>) {
        if self.disposed {
            debug!(request_id, "completion after dispose dropped");
            return;
        }
        if self.in_flight.as_ref().map(|f| f.id) != Some(request_id) {
            debug!(request_id, "stale completion dropped");
            return;
        }

        match result {
            Ok(payload) => {
                info!(request_id, "subscribed");
                self.status = SubmitStatus::Success {
                    message: SUCCESS_MESSAGE.to_string(),
                };
                self.input.clear();
                if let Some(callback) = self.on_success.as_mut() {
                    callback(&payload);
                }
            }
            Err(err) => {
                warn!(request_id, error = %err, "subscribe failed");
                let message = err.detail().unwrap_or(FALLBACK_ERROR_MESSAGE).to_string();
                self.status = SubmitStatus::Error { message };
                if let Some(callback) = self.on_error.as_mut() {
                    callback(&err);
                }
            }
        }

        // Cleared last so nothing observes Submitting without a request.
        self.in_flight = None;
    }

    /// Abort any in-flight request and ignore everything afterwards.
    pub fn dispose(&mut self) {
        self.disposed = true;
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        self.dispose();
    }
}
