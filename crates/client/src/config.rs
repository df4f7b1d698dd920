//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MML_API_URL` - Backend API root (default: `http://127.0.0.1:5000/api`)
//! - `MML_CONNECT_TIMEOUT_SECS` - TCP connect timeout (default: 10)
//! - `MML_HOME_CACHE_TTL_SECS` - Home feed cache TTL, 0 disables (default: 300)
//! - `MML_USERNAME` - Username or email to log in with at start-up
//! - `MML_PASSWORD` - Password for `MML_USERNAME`

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend API root.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

const DEFAULT_CONNECT_TIMEOUT_SECS: &str = "10";
const DEFAULT_HOME_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API root; endpoint paths are resolved against it
    pub api_url: Url,
    /// TCP connect timeout for the HTTP client
    pub connect_timeout: Duration,
    /// How long the home feed is reused before re-fetching
    pub home_cache_ttl: Duration,
    /// Credentials for automatic login at start-up
    pub credentials: Option<Credentials>,
}

/// Login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    /// Username or email address
    pub username: String,
    /// Account password
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Configuration with defaults for everything but the API root.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            connect_timeout: Duration::from_secs(10),
            home_cache_ttl: Duration::from_secs(300),
            credentials: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid, or if only one
    /// of `MML_USERNAME` / `MML_PASSWORD` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let api_url = parse_api_url(&env.get_or_default("MML_API_URL", DEFAULT_API_URL))?;
        let connect_timeout = env.get_secs("MML_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let home_cache_ttl = env.get_secs("MML_HOME_CACHE_TTL_SECS", DEFAULT_HOME_CACHE_TTL_SECS)?;

        let credentials = match (env.get_optional("MML_USERNAME"), env.get_optional("MML_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials {
                username,
                password: SecretString::from(password),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingEnvVar("MML_PASSWORD".to_string())),
            (None, Some(_)) => return Err(ConfigError::MissingEnvVar("MML_USERNAME".to_string())),
        };

        Ok(Self {
            api_url,
            connect_timeout,
            home_cache_ttl,
            credentials,
        })
    }
}

/// Parse and validate an API root URL.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` unless the URL is absolute http(s).
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("MML_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "MML_API_URL".to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key).unwrap_or_else(|| default.to_string())
    }

    fn get_secs(&self, key: &str, default: &str) -> Result<Duration, ConfigError> {
        self.get_or_default(key, default)
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
