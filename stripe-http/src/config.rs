//! Client configuration.
//!
//! A [`ClientConfig`] is built in code with `with_*` methods, or loaded from
//! the process environment with [`ClientConfig::from_env`]:
//!
//! | Variable               | Meaning                              | Default                      |
//! |------------------------|--------------------------------------|------------------------------|
//! | `STRIPE_API_KEY`       | secret key (required)                |                              |
//! | `STRIPE_API_BASE`      | REST API base URL                    | `https://api.stripe.com/`    |
//! | `STRIPE_FILES_BASE`    | upload host base URL                 | `https://files.stripe.com/`  |
//! | `STRIPE_API_VERSION`   | value of the `Stripe-Version` header | `2019-12-03`                 |
//! | `STRIPE_TIMEOUT_SECS`  | per-request timeout in seconds       | none                         |

use std::fmt;
use std::time::Duration;

use http::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

use crate::constants::{
    DEFAULT_API_VERSION, ENV_API_BASE, ENV_API_KEY, ENV_API_VERSION, ENV_FILES_BASE,
    ENV_TIMEOUT_SECS,
};

/// A secret API key. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("environment variable {name} is not set")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// A URL variable could not be parsed.
    #[error("environment variable {name} is not a valid URL: {source}")]
    InvalidUrl {
        /// Variable name.
        name: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The timeout variable is not a whole number of seconds.
    #[error("environment variable {name} is not a number of seconds: {value:?}")]
    InvalidTimeout {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// The underlying parse error.
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Settings shared by every request a [`Client`](crate::Client) sends.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) api_key: ApiKey,
    pub(crate) api_base: Option<Url>,
    pub(crate) files_base: Option<Url>,
    pub(crate) api_version: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) default_headers: HeaderMap,
    pub(crate) http_client: Option<ClientWithMiddleware>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_base", &self.api_base)
            .field("files_base", &self.files_base)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with the given secret key and default
    /// endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: None,
            files_base: None,
            api_version: DEFAULT_API_VERSION.to_owned(),
            timeout: None,
            default_headers: HeaderMap::new(),
            http_client: None,
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `STRIPE_API_KEY` is unset or another
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::Missing { name: ENV_API_KEY })?;
        let mut config = Self::new(api_key);

        if let Some(base) = get(ENV_API_BASE) {
            let url = Url::parse(&base).map_err(|source| ConfigError::InvalidUrl {
                name: ENV_API_BASE,
                source,
            })?;
            config = config.with_api_base(url);
        }
        if let Some(base) = get(ENV_FILES_BASE) {
            let url = Url::parse(&base).map_err(|source| ConfigError::InvalidUrl {
                name: ENV_FILES_BASE,
                source,
            })?;
            config = config.with_files_base(url);
        }
        if let Some(version) = get(ENV_API_VERSION) {
            config = config.with_api_version(version);
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout {
                    name: ENV_TIMEOUT_SECS,
                    value: value.clone(),
                    source,
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Overrides the REST API base URL.
    #[must_use]
    pub fn with_api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Overrides the upload host base URL.
    #[must_use]
    pub fn with_files_base(mut self, url: Url) -> Self {
        self.files_base = Some(url);
        self
    }

    /// Pins a different API version.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets a timeout for every request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attaches headers to every request.
    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Sends requests through `client`, e.g. one carrying retry middleware.
    #[must_use]
    pub fn with_http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Returns the configured API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
