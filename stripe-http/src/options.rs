//! Per-request options.

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ApiKey;

/// Settings that apply to a single request and override the client's.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Key used instead of the client's.
    pub api_key: Option<ApiKey>,
    /// Sent as `Idempotency-Key`.
    pub idempotency_key: Option<String>,
    /// Sent as `Stripe-Account`.
    pub stripe_account: Option<String>,
    /// Sent as `Stripe-Version` instead of the client's.
    pub stripe_version: Option<String>,
    /// Appended to the parameters' own `expand` list.
    pub expand: Vec<String>,
    /// Extra headers, sent verbatim.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses another API key for this request.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the idempotency key.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Acts on behalf of a connected account.
    #[must_use]
    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }

    /// Pins the API version of this request.
    #[must_use]
    pub fn with_stripe_version(mut self, version: impl Into<String>) -> Self {
        self.stripe_version = Some(version.into());
        self
    }

    /// Expands a field of the response.
    #[must_use]
    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
