//! Endpoints, header names and environment variables used by the client.

/// Base URL of the REST API.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/";

/// Base URL of the file upload host.
pub const DEFAULT_FILES_BASE: &str = "https://files.stripe.com/";

/// API version the resource types in `stripe-types` describe.
pub const DEFAULT_API_VERSION: &str = "2019-12-03";

/// Pins the API version of a request.
pub const STRIPE_VERSION_HEADER: &str = "Stripe-Version";

/// Makes a `POST` safely retryable.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Acts on behalf of a connected account.
pub const STRIPE_ACCOUNT_HEADER: &str = "Stripe-Account";

/// Identifier the API assigns to every request.
pub const REQUEST_ID_HEADER: &str = "Request-Id";

/// Content type of `POST` bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Secret API key.
pub const ENV_API_KEY: &str = "STRIPE_API_KEY";

/// Override for [`DEFAULT_API_BASE`].
pub const ENV_API_BASE: &str = "STRIPE_API_BASE";

/// Override for [`DEFAULT_FILES_BASE`].
pub const ENV_FILES_BASE: &str = "STRIPE_FILES_BASE";

/// Override for [`DEFAULT_API_VERSION`].
pub const ENV_API_VERSION: &str = "STRIPE_API_VERSION";

/// Per-request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "STRIPE_TIMEOUT_SECS";
