//! API configuration.
//!
//! An [`ApiConfig`] can be built in code, parsed from JSON, or read from the
//! environment:
//!
//! | variable | field | default |
//! |---|---|---|
//! | `CRUDUX_API_URL` | `url` | required |
//! | `CRUDUX_API_VERSION` | `version` | empty |
//! | `CRUDUX_AUTH_SCHEME` | `auth_scheme` | `Bearer` |
//! | `CRUDUX_TOKEN_KEY` | `token_key` | `token` |
//! | `CRUDUX_TIMEOUT_SECS` | `timeout_secs` | `30` |

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crudux_token_store::TOKEN_KEY;

use crate::auth::AuthScheme;
use crate::error::Error;

pub const ENV_API_URL: &str = "CRUDUX_API_URL";
pub const ENV_API_VERSION: &str = "CRUDUX_API_VERSION";
pub const ENV_AUTH_SCHEME: &str = "CRUDUX_AUTH_SCHEME";
pub const ENV_TOKEN_KEY: &str = "CRUDUX_TOKEN_KEY";
pub const ENV_TIMEOUT_SECS: &str = "CRUDUX_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_token_key() -> String {
    TOKEN_KEY.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `https://api.example.com`
    #[serde(default)]
    pub url: String,

    /// Optional version segment appended to the base URL
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub auth_scheme: AuthScheme,

    /// Token store key written by login and read by authenticated requests
    #[serde(default = "default_token_key")]
    pub token_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            version: String::new(),
            auth_scheme: AuthScheme::default(),
            token_key: default_token_key(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    /// Set the request timeout. Sub-second parts round up to a whole second.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout
            .as_secs()
            .saturating_add(u64::from(timeout.subsec_nanos() > 0));
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: ApiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("Reading API configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build a configuration from the `CRUDUX_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let url = lookup(ENV_API_URL)
            .ok_or_else(|| Error::config(format!("{} is not set", ENV_API_URL)))?;

        let mut config = ApiConfig::new(url);
        if let Some(version) = lookup(ENV_API_VERSION) {
            config.version = version;
        }
        if let Some(scheme) = lookup(ENV_AUTH_SCHEME) {
            config.auth_scheme = AuthScheme::from(scheme);
        }
        if let Some(key) = lookup(ENV_TOKEN_KEY) {
            config.token_key = key;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{} must be a number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no endpoint could be built from.
    pub fn validate(&self) -> Result<(), Error> {
        if self.url.trim().is_empty() {
            return Err(Error::config("The API requires a url"));
        }

        let parsed = url::Url::parse(self.url.trim())?;
        if parsed.cannot_be_a_base() {
            return Err(Error::config(format!(
                "The API url must be absolute, got {}",
                self.url
            )));
        }

        if self.token_key.trim().is_empty() {
            return Err(Error::config("The token key cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("The request timeout must be at least one second"));
        }

        Ok(())
    }

    /// The URL every resource path is appended to: `<url>[/<version>]`,
    /// without a trailing slash.
    pub fn base_url(&self) -> String {
        let mut base = self.url.trim().trim_end_matches('/').to_string();
        let version = self.version.trim().trim_matches('/');
        if !version.is_empty() {
            base.push('/');
            base.push_str(version);
        }
        base
    }
}
