//! The error document returned by the API.
//!
//! Failed requests carry a body of the form `{"error": {...}}`. The same
//! shape is embedded in `SetupIntent.last_setup_error` to describe the most
//! recent failed setup attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expandable::ApiObject;
use crate::setup_intent::SetupIntent;

open_string_enum! {
    /// The kind of error returned.
    pub enum ErrorType {
        /// The API could not be reached.
        ApiConnection = "api_connection_error",
        /// An unexpected failure on the API side.
        Api = "api_error",
        /// The request could not be authenticated.
        Authentication = "authentication_error",
        /// The payment method was declined or could not be used.
        Card = "card_error",
        /// An idempotency key was reused with different parameters.
        Idempotency = "idempotency_error",
        /// The request had missing or malformed parameters.
        InvalidRequest = "invalid_request_error",
        /// Too many requests hit the API too quickly.
        RateLimit = "rate_limit_error",
    }
}

/// A remote error, as documented by the API.
///
/// # JSON Format
///
/// ```json
/// {
///   "type": "card_error",
///   "code": "card_declined",
///   "decline_code": "insufficient_funds",
///   "doc_url": "https://stripe.com/docs/error-codes/card-declined",
///   "message": "Your card has insufficient funds.",
///   "param": "payment_method"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// The type of error returned.
    #[serde(rename = "type")]
    pub kind: ErrorType,

    /// For card errors, the ID of the failed charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,

    /// A short machine-readable code, for errors that can be handled
    /// programmatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// For card errors resulting from a decline, the issuer's reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_code: Option<String>,

    /// A URL to more information about the error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,

    /// A human-readable message with more details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The parameter the error relates to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    /// The payment intent involved in the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent: Option<ApiObject>,

    /// The payment method involved in the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<ApiObject>,

    /// The setup intent involved in the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_intent: Option<Box<SetupIntent>>,

    /// The source involved in the failure (account, card, bank account…).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ApiObject>,
}

impl ApiErrorObject {
    /// Creates an error of the given kind with no further detail.
    #[must_use]
    pub const fn new(kind: ErrorType) -> Self {
        Self {
            kind,
            charge: None,
            code: None,
            decline_code: None,
            doc_url: None,
            message: None,
            param: None,
            payment_intent: None,
            payment_method: None,
            setup_intent: None,
            source: None,
        }
    }

    /// Sets the machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the offending parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }
}

impl fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(code) = &self.code {
            write!(f, " ({code})")?;
        }
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        if let Some(param) = &self.param {
            write!(f, " [param: {param}]")?;
        }
        Ok(())
    }
}

/// Body of a failed API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error itself.
    pub error: ApiErrorObject,
}

/// A string did not match any documented value of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {type_name} value: {value:?}")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub type_name: &'static str,
    /// The rejected value.
    pub value: String,
}

impl UnknownVariant {
    /// Creates a new unknown-variant error.
    #[must_use]
    pub fn new(type_name: &'static str, value: impl Into<String>) -> Self {
        Self {
            type_name,
            value: value.into(),
        }
    }
}
