//! Runtime configuration loaded from the environment (and `.env`).

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

/// Top-level configuration for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub predictor: PredictorConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let endpoint =
            env::var("CREDIT_SCORING_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let endpoint = parse_endpoint(&endpoint)?;

        let timeout = match env::var("CREDIT_SCORING_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let log_level = env::var("CREDIT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_file = env::var("CREDIT_LOG_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            predictor: PredictorConfig { endpoint, timeout },
            telemetry: TelemetryConfig {
                log_level,
                log_file,
            },
        })
    }

    /// Replace the endpoint with a command-line override.
    pub fn with_endpoint(mut self, endpoint: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = endpoint {
            self.predictor.endpoint = parse_endpoint(raw)?;
        }
        Ok(self)
    }
}

/// Where and how to reach the scoring service.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub endpoint: Url,
    /// `None` means requests may hang indefinitely.
    pub timeout: Option<Duration>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidEndpoint { value: String, reason: String },
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEndpoint { value, reason } => {
                write!(f, "CREDIT_SCORING_URL must be an http(s) URL, got '{value}' ({reason})")
            }
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "CREDIT_SCORING_TIMEOUT_SECS must be a positive integer, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidEndpoint {
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        // SAFETY: env-mutating tests hold `env_guard`, so no other test thread
        // in this module reads or writes these variables concurrently.
        unsafe {
            env::remove_var("CREDIT_SCORING_URL");
            env::remove_var("CREDIT_SCORING_TIMEOUT_SECS");
            env::remove_var("CREDIT_LOG_LEVEL");
            env::remove_var("CREDIT_LOG_FILE");
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.predictor.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.predictor.timeout, None);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_file, None);
    }

    #[test]
    fn reads_timeout_and_rejects_zero() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        unsafe { env::set_var("CREDIT_SCORING_TIMEOUT_SECS", "20") };
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.predictor.timeout, Some(Duration::from_secs(20)));

        unsafe { env::set_var("CREDIT_SCORING_TIMEOUT_SECS", "0") };
        let err = AppConfig::load().expect_err("zero timeout is rejected");
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
        reset_env();
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        unsafe { env::set_var("CREDIT_SCORING_URL", "ftp://scoring.local/predict") };
        let err = AppConfig::load().expect_err("ftp is not accepted");
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        reset_env();
    }

    #[test]
    fn cli_override_replaces_endpoint() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load()
            .and_then(|c| c.with_endpoint(Some("https://bank.example/predict")))
            .expect("override applies");
        assert_eq!(config.predictor.endpoint.as_str(), "https://bank.example/predict");

        let err = AppConfig::load()
            .and_then(|c| c.with_endpoint(Some("not a url")))
            .expect_err("garbage override is rejected");
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }
}
