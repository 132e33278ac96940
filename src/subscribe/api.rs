//! Subscribe endpoint client.

use crate::subscribe::error::SubmitError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Source tag attached to every subscription made from this client.
pub const SOURCE: &str = "website";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub opt_in: bool,
    pub source: String,
    pub metadata: SubscribeMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribeMetadata {
    pub page: String,
    /// RFC 3339 / ISO-8601, UTC.
    pub timestamp: String,
}

impl SubscribeRequest {
    pub fn new(email: &str, page: &str, now: DateTime<Utc>) -> Self {
        Self {
            email: email.to_string(),
            opt_in: true,
            source: SOURCE.to_string(),
            metadata: SubscribeMetadata {
                page: page.to_string(),
                timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }
}

#[async_trait]
pub trait SubscribeApi: Send + Sync {
    /// Issue exactly one request. The success payload is passed through
    /// untouched.
    async fn subscribe(&self, request: SubscribeRequest) -> Result<Value, SubmitError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

pub struct HttpSubscribeApi {
    http: Client,
    url: String,
}

impl HttpSubscribeApi {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SubscribeApi for HttpSubscribeApi {
    async fn subscribe(&self, request: SubscribeRequest) -> Result<Value, SubmitError> {
        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SubmitError::Request(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "subscribe response");

        if status.is_success() {
            if body.is_empty() {
                return Ok(Value::Null);
            }
            // Non-JSON success bodies are still successes.
            return Ok(serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned())));
        }

        let detail = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| d.as_str().map(str::to_string));
        Err(SubmitError::Response {
            status: status.as_u16(),
            detail,
        })
    }
}
