//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if required vars are missing.
//! CLI flags override the environment. Sensitive values wrapped in
//! secrecy::SecretString to prevent log leaks.

use std::time::Duration;

pub use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Config {
    /// Jellyfin base URL, e.g. http://jellyfin:8096 (trailing slash trimmed).
    pub jellyfin_url: String,
    /// Jellyfin API key, sent as the X-Emby-Token header.
    pub jellyfin_api_key: SecretString,
    /// SABnzbd base URL, e.g. http://sabnzbd:8080 (trailing slash trimmed).
    pub sab_url: String,
    /// SABnzbd API key, sent as the apikey query parameter.
    pub sab_api_key: SecretString,
    /// Poll interval.
    pub interval: Duration,
    /// Continuous idle time required before resuming SABnzbd.
    pub resume_cooldown: Duration,
    /// Treat paused/buffering sessions as active playback.
    pub include_paused: bool,
    /// Verify TLS certificates on HTTPS endpoints.
    pub verify_tls: bool,
    /// Per-HTTP-request timeout.
    pub request_timeout: Duration,
    /// Log level used when RUST_LOG is not set.
    pub log_level: String,
}

/// Values taken from CLI flags. `None` falls through to the environment,
/// then to the built-in default.
#[derive(Debug, Default)]
pub struct Overrides {
    pub jellyfin_url: Option<String>,
    pub jellyfin_api_key: Option<String>,
    pub sab_url: Option<String>,
    pub sab_api_key: Option<String>,
    pub interval: Option<u64>,
    pub resume_cooldown: Option<u64>,
    pub include_paused: Option<bool>,
    pub verify_tls: Option<bool>,
    pub request_timeout: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from environment variables alone.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Self::resolve(&Overrides::default())
    }

    /// Resolve configuration with CLI overrides taking precedence over
    /// the environment. All missing required values are reported in one
    /// error so the operator fixes them in a single pass.
    pub fn resolve(ov: &Overrides) -> Result<Self> {
        let jellyfin_url = ov.jellyfin_url.clone().or_else(|| env_nonempty("JELLYFIN_URL"));
        let jellyfin_api_key = ov
            .jellyfin_api_key
            .clone()
            .or_else(|| env_nonempty("JELLYFIN_API_KEY"));
        let sab_url = ov.sab_url.clone().or_else(|| env_nonempty("SAB_URL"));
        let sab_api_key = ov.sab_api_key.clone().or_else(|| env_nonempty("SAB_API_KEY"));

        let missing: Vec<&str> = [
            ("JELLYFIN_URL", jellyfin_url.is_none()),
            ("JELLYFIN_API_KEY", jellyfin_api_key.is_none()),
            ("SAB_URL", sab_url.is_none()),
            ("SAB_API_KEY", sab_api_key.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required configuration: {}",
                missing.join(", ")
            )));
        }

        let interval = match ov.interval {
            Some(secs) => secs,
            None => env_u64("INTERVAL", 30)?,
        };
        let resume_cooldown = match ov.resume_cooldown {
            Some(secs) => secs,
            None => env_u64("RESUME_COOLDOWN", 60)?,
        };
        let request_timeout = match ov.request_timeout {
            Some(secs) => secs,
            None => env_u64("REQUEST_TIMEOUT", 8)?,
        };

        Ok(Self {
            jellyfin_url: trim_base_url(&jellyfin_url.unwrap_or_default()),
            jellyfin_api_key: SecretString::from(jellyfin_api_key.unwrap_or_default()),
            sab_url: trim_base_url(&sab_url.unwrap_or_default()),
            sab_api_key: SecretString::from(sab_api_key.unwrap_or_default()),
            interval: Duration::from_secs(interval),
            resume_cooldown: Duration::from_secs(resume_cooldown),
            include_paused: ov
                .include_paused
                .unwrap_or_else(|| env_bool("INCLUDE_PAUSED", false)),
            verify_tls: ov.verify_tls.unwrap_or_else(|| env_bool("VERIFY_TLS", true)),
            request_timeout: Duration::from_secs(request_timeout),
            log_level: ov
                .log_level
                .clone()
                .or_else(|| env_nonempty("LOG_LEVEL"))
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Config {
    /// Build an HTTP client honoring the request timeout and TLS toggle.
    /// Each collaborator gets its own client.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout)
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()?)
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match env_nonempty(name) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{name} must be an integer, got {v:?}"))),
        None => Ok(default),
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match env_nonempty(name) {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        ),
        None => default,
    }
}
