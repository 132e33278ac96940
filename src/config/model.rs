//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoints of the site backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_subscribe_path")]
    pub subscribe_path: String,
    #[serde(default = "default_footer_path")]
    pub footer_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn subscribe_url(&self) -> String {
        join_url(&self.base_url, &self.subscribe_path)
    }

    pub fn footer_url(&self) -> String {
        join_url(&self.base_url, &self.footer_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            subscribe_path: default_subscribe_path(),
            footer_path: default_footer_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Subscribe form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Page path reported in the subscription metadata.
    #[serde(default = "default_page")]
    pub page: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

/// Reachability probe and banner timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    #[serde(default = "default_probe_addr")]
    pub probe_addr: String,
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// How long the "back online" banner stays up.
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,
}

impl ConnectivityConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_addr: default_probe_addr(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            hide_delay_ms: default_hide_delay_ms(),
        }
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_true")]
    pub animations: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            animations: true,
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `tracing` filter directive, e.g. `info` or `siteline=debug`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_subscribe_path() -> String {
    "/api/newsletter/subscribe".to_string()
}
fn default_footer_path() -> String {
    "/api/footer".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_page() -> String {
    "/".to_string()
}
fn default_probe_addr() -> String {
    "1.1.1.1:443".to_string()
}
fn default_probe_interval_ms() -> u64 {
    2000
}
fn default_probe_timeout_ms() -> u64 {
    1500
}
fn default_hide_delay_ms() -> u64 {
    3000
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_log_dir() -> String {
    "~/.local/share/siteline/logs".to_string()
}
fn default_level() -> String {
    "info".to_string()
}
