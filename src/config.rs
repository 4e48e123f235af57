//! Client configuration.
//!
//! Values come from the environment with logged defaults. The discrepancy
//! threshold lives here rather than as a constant: the server owns the real
//! decision and the client only mirrors it for display.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_DISCREPANCY_THRESHOLD: f64 = 50_000.0;

const ENV_BASE_URL: &str = "POS_API_URL";
const ENV_THRESHOLD: &str = "POS_DISCREPANCY_THRESHOLD";
const ENV_DATA_DIR: &str = "POS_DATA_DIR";
const ENV_LOG_DIR: &str = "POS_LOG_DIR";
const ENV_TIMEOUT: &str = "POS_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend root, e.g. `https://pos.example.com/api`. Always normalized.
    pub base_url: String,
    /// Absolute handover discrepancy above which manager approval is shown as required.
    pub discrepancy_threshold: f64,
    /// Directory for the SQLite session store. `None` keeps the session in the OS keyring.
    pub data_dir: Option<PathBuf>,
    /// Directory for rolling log files. `None` logs to the console only.
    pub log_dir: Option<PathBuf>,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            discrepancy_threshold: DEFAULT_DISCREPANCY_THRESHOLD,
            data_dir: None,
            log_dir: None,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let base_url = var(ENV_BASE_URL).unwrap_or_else(|| {
            info!("{ENV_BASE_URL} not set, using default: {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        let discrepancy_threshold =
            parse_or(ENV_THRESHOLD, DEFAULT_DISCREPANCY_THRESHOLD).abs();
        let request_timeout = var(ENV_TIMEOUT)
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                Ok(_) => None,
                Err(e) => {
                    warn!("Invalid {ENV_TIMEOUT} value: {e}");
                    None
                }
            })
            .map(Duration::from_secs);

        Self {
            base_url: normalize_base_url(&base_url),
            discrepancy_threshold,
            data_dir: var(ENV_DATA_DIR).map(PathBuf::from),
            log_dir: var(ENV_LOG_DIR).map(PathBuf::from),
            request_timeout,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.discrepancy_threshold = threshold.abs();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

/// Normalise the backend URL:
/// - trim whitespace
/// - ensure a scheme is present (http for localhost, https otherwise)
/// - strip trailing slashes
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();
    if url.is_empty() {
        return url;
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    match var(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value ({raw}): {e}; using default {default}");
            default
        }),
    }
}
