//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Path of the profile-creation endpoint, both upstream and on the proxy.
pub const CREATE_PROFILE_PATH: &str = "/api/create_profile";

const DEFAULT_API_BASE_URL: &str = "https://man-vs-machine-vert.vercel.app";
/// Shared key accepted by the development deployment of the profile API.
const DEVELOPMENT_API_KEY: &str = "a55Z4Sk8";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds on.
    pub port: u16,
    /// Cosmetic pause applied before a step change is committed.
    pub transition_delay: Duration,
    /// Onboarding sessions untouched for this long are pruned.
    pub session_idle_timeout: Duration,
    pub submission: SubmissionConfig,
}

/// Where and how completed profiles are submitted.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Base URL of the external profile API.
    pub api_base_url: String,
    /// Base URL of the same-origin proxy.
    pub proxy_base_url: String,
    /// Submit through the proxy instead of calling the external API directly.
    pub use_proxy: bool,
    /// Shared secret placed in the payload's `key` field.
    pub api_key: SecretString,
    pub default_height: i32,
    pub default_weight: i32,
}

impl SubmissionConfig {
    pub fn new(api_base_url: impl Into<String>, api_key: SecretString) -> Self {
        let api_base_url = api_base_url.into();
        Self {
            proxy_base_url: api_base_url.clone(),
            api_base_url,
            use_proxy: false,
            api_key,
            default_height: 178,
            default_weight: 72,
        }
    }

    /// Endpoint the submission client posts to, honoring the proxy toggle.
    pub fn submit_url(&self) -> String {
        let base = if self.use_proxy {
            &self.proxy_base_url
        } else {
            &self.api_base_url
        };
        join_url(base, CREATE_PROFILE_PATH)
    }

    /// Endpoint the proxy forwards to.
    pub fn upstream_url(&self) -> String {
        join_url(&self.api_base_url, CREATE_PROFILE_PATH)
    }
}

impl AppConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = var("FOODIET_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let transition_delay_ms: u64 = var("FOODIET_TRANSITION_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(150);

        let session_idle_secs: u64 = var("FOODIET_SESSION_IDLE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let api_base_url =
            var("FOODIET_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let proxy_base_url = var("FOODIET_PROXY_BASE_URL")
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}"));

        let use_proxy = var("FOODIET_USE_PROXY")
            .map(|s| parse_bool(&s))
            .unwrap_or(false);

        let api_key = match var("FOODIET_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(key) => SecretString::from(key),
            None => {
                tracing::warn!("FOODIET_API_KEY not set, using the development key");
                SecretString::from(DEVELOPMENT_API_KEY.to_string())
            }
        };

        let default_height: i32 = var("FOODIET_DEFAULT_HEIGHT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(178);
        let default_weight: i32 = var("FOODIET_DEFAULT_WEIGHT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(72);

        Self {
            port,
            transition_delay: Duration::from_millis(transition_delay_ms),
            session_idle_timeout: Duration::from_secs(session_idle_secs),
            submission: SubmissionConfig {
                api_base_url,
                proxy_base_url,
                use_proxy,
                api_key,
                default_height,
                default_weight,
            },
        }
    }
}

impl AppConfig {
    /// Reject base URLs the HTTP client could never reach.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("FOODIET_API_BASE_URL", &self.submission.api_base_url),
            ("FOODIET_PROXY_BASE_URL", &self.submission.proxy_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected an http(s) URL, got {url:?}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
