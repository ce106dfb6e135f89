//! Local parameter checks.
//!
//! Anything that can be rejected without asking the server is rejected here,
//! before a request is built. Constraints that depend on remote state (a
//! schedule's current status, whether an id exists) are left to the API.

use crate::list::{MAX_LIMIT, MIN_LIMIT};

/// Parameters were rejected before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid parameter `{param}`: {message}")]
pub struct InvalidParameters {
    /// Bracket-notation path of the offending parameter (e.g. `phases[1][plans]`).
    pub param: String,
    /// Human-readable reason.
    pub message: String,
}

impl InvalidParameters {
    /// Creates a new invalid-parameters error.
    #[must_use]
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }
}

/// Parameters that can be checked locally.
pub trait Validate {
    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameters`] naming the first offending parameter.
    fn validate(&self) -> Result<(), InvalidParameters>;
}

/// Checks that a page size lies within `[1, 100]`.
///
/// # Errors
///
/// Returns [`InvalidParameters`] for `limit` outside the accepted range.
pub fn check_limit(limit: Option<u8>) -> Result<(), InvalidParameters> {
    match limit {
        Some(l) if !(MIN_LIMIT..=MAX_LIMIT).contains(&l) => Err(InvalidParameters::new(
            "limit",
            format!("must be between {MIN_LIMIT} and {MAX_LIMIT}, got {l}"),
        )),
        _ => Ok(()),
    }
}

/// Checks that an object identifier is usable in a request path.
///
/// # Errors
///
/// Returns [`InvalidParameters`] for an empty or blank identifier.
pub fn check_id(id: &str) -> Result<(), InvalidParameters> {
    if id.trim().is_empty() {
        return Err(InvalidParameters::new("id", "must be a non-empty identifier"));
    }
    Ok(())
}
