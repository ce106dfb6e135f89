//! Errors returned by the client.
//!
//! Every failure is one of three things: parameters rejected locally before
//! any request, a transport or decoding problem, or an error document the
//! API sent back. The last is surfaced verbatim in [`ApiError`].
//! [`Error::condition`] folds all of them into a small [`ErrorCondition`]
//! set callers can branch on.

use http::StatusCode;
use stripe_types::error::{ApiErrorObject, ErrorType};
use stripe_types::form::FormError;
use stripe_types::validate::InvalidParameters;

use crate::config::ConfigError;

/// Errors that can occur while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parameters were rejected before any request was sent.
    #[error(transparent)]
    InvalidParameters(#[from] InvalidParameters),

    /// The client configuration is incomplete or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// URL construction failed.
    #[error("URL parse error: {context}: {source}")]
    Url {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent or no response arrived.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying transport error.
        #[source]
        source: reqwest_middleware::Error,
    },

    /// The response body could not be read.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to deserialize JSON (HTTP {status}): {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: &'static str,
        /// Status of the response.
        status: StatusCode,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The parameters could not be encoded.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The API returned an error document.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An error document returned by the API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("HTTP {status}: {error}")]
pub struct ApiError {
    /// Status of the response.
    pub status: StatusCode,
    /// Value of the `Request-Id` response header.
    pub request_id: Option<String>,
    /// The error document.
    pub error: ApiErrorObject,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCondition {
    /// Missing or malformed parameters, detected locally or by the API.
    InvalidParameters,
    /// The identifier does not refer to an existing object.
    NotFound,
    /// The operation is not permitted in the object's current status.
    InvalidState,
    /// The API key is missing or invalid.
    Authentication,
    /// Too many requests.
    RateLimit,
    /// The payment method was declined or could not be used.
    Card,
    /// An idempotency key was reused with different parameters.
    Idempotency,
    /// Unexpected failure on the API side.
    Api,
    /// The API could not be reached.
    Connection,
    /// The response could not be understood.
    Decode,
}

impl Error {
    /// Classifies the error.
    #[must_use]
    pub fn condition(&self) -> ErrorCondition {
        match self {
            Self::InvalidParameters(_) | Self::Config(_) | Self::Url { .. } | Self::Form(_) => {
                ErrorCondition::InvalidParameters
            }
            Self::Http { .. } | Self::ResponseBodyRead { .. } => ErrorCondition::Connection,
            Self::Decode { .. } => ErrorCondition::Decode,
            Self::Api(api) => api.condition(),
        }
    }

    /// Returns the API's error document, if the API produced this error.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            _ => None,
        }
    }
}

impl ApiError {
    /// Classifies the error document.
    #[must_use]
    pub fn condition(&self) -> ErrorCondition {
        match &self.error.kind {
            ErrorType::InvalidRequest => self.invalid_request_condition(),
            ErrorType::Authentication => ErrorCondition::Authentication,
            ErrorType::RateLimit => ErrorCondition::RateLimit,
            ErrorType::Card => ErrorCondition::Card,
            ErrorType::Idempotency => ErrorCondition::Idempotency,
            ErrorType::ApiConnection => ErrorCondition::Connection,
            ErrorType::Api | ErrorType::Unknown(_) => ErrorCondition::Api,
        }
    }

    fn invalid_request_condition(&self) -> ErrorCondition {
        let code = self.error.code.as_deref();
        if self.status == StatusCode::NOT_FOUND || code == Some("resource_missing") {
            return ErrorCondition::NotFound;
        }
        let state_code =
            code.is_some_and(|c| c == "resource_invalid_state" || c.ends_with("_unexpected_state"));
        if state_code || self.status == StatusCode::CONFLICT {
            return ErrorCondition::InvalidState;
        }
        ErrorCondition::InvalidParameters
    }
}
