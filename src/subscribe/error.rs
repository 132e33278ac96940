use thiserror::Error;

/// Why a submission did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Empty input. Never reaches the network.
    #[error("an email address is required")]
    Validation,
    /// Transport failure: no response was received.
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}{}", detail_suffix(.detail))]
    Response { status: u16, detail: Option<String> },
}

impl SubmitError {
    /// Server-provided explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            SubmitError::Response {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}
