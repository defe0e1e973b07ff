//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Hosted backend used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://studierbridge-backend-production.up.railway.app/api";
const DEFAULT_SESSION_DIR: &str = ".studierbridge";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings for the command-line client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDIERBRIDGE")]
pub struct ClientSettings {
    /// Backend base URL.
    pub api_base_url: Option<String>,
    /// Directory holding the persisted session.
    pub session_dir: Option<PathBuf>,
    /// Seconds between unread-count refreshes on the dashboard.
    pub poll_interval_secs: Option<u64>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl ClientSettings {
    /// Configured base URL, falling back to the hosted backend.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Poll period; zero is treated as one second.
    pub fn poll_interval(&self) -> Duration {
        let secs = self.poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        Duration::from_secs(secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("studierbridge")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("STUDIERBRIDGE_API_BASE_URL", None::<String>),
            ("STUDIERBRIDGE_SESSION_DIR", None::<String>),
            ("STUDIERBRIDGE_POLL_INTERVAL_SECS", None::<String>),
            ("STUDIERBRIDGE_REQUEST_TIMEOUT_SECS", None::<String>),
            ("STUDIERBRIDGE_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("default parses").as_str(),
            DEFAULT_API_BASE_URL
        );
        assert_eq!(settings.session_dir(), PathBuf::from(".studierbridge"));
        assert_eq!(settings.poll_interval(), Duration::from_secs(30));
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert!(!settings.json_logs);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "STUDIERBRIDGE_API_BASE_URL",
                Some("http://localhost:8000/api".to_owned()),
            ),
            ("STUDIERBRIDGE_SESSION_DIR", Some("/tmp/sb".to_owned())),
            ("STUDIERBRIDGE_POLL_INTERVAL_SECS", Some("0".to_owned())),
            ("STUDIERBRIDGE_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            ("STUDIERBRIDGE_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("override parses").as_str(),
            "http://localhost:8000/api"
        );
        assert_eq!(settings.session_dir(), PathBuf::from("/tmp/sb"));
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert!(settings.json_logs);
    }
}
