#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Resource and parameter types for the Stripe HTTP API.
//!
//! This crate defines the serialization-level shapes for the Files,
//! SetupIntents and SubscriptionSchedules resources, together with the
//! primitives they share (timestamps, expandable references, list
//! envelopes, empty-string sentinels). It performs no I/O; the
//! `stripe-http` crate builds the typed client on top of it.
//!
//! # Modules
//!
//! - [`timestamp`] — Unix timestamps and the `"now"` date parameter
//! - [`expandable`] — Identifier-or-object references resolved by `expand`
//! - [`emptyable`] — Parameters that accept an empty-string clear sentinel
//! - [`list`] — List envelope, cursor pagination and range filters
//! - [`form`] — Bracket-notation key/value encoding of parameters
//! - [`validate`] — Local parameter checks run before any request
//! - [`error`] — The remote error document
//! - [`file`] — File resource
//! - [`setup_intent`] — `SetupIntent` resource
//! - [`subscription_schedule`] — `SubscriptionSchedule` resource

#[macro_use]
mod macros;

pub mod emptyable;
pub mod error;
pub mod expandable;
pub mod file;
pub mod form;
pub mod list;
pub mod setup_intent;
pub mod subscription_schedule;
pub mod timestamp;
pub mod validate;

use std::collections::HashMap;

pub use emptyable::Emptyable;
pub use error::{ApiErrorObject, ErrorResponse, ErrorType};
pub use expandable::{ApiObject, Expandable};
pub use file::File;
pub use list::{HasId, List, Paginate, RangeQuery};
pub use setup_intent::SetupIntent;
pub use subscription_schedule::SubscriptionSchedule;
pub use timestamp::{DateOrNow, UnixTimestamp};
pub use validate::{InvalidParameters, Validate};

/// Key-value pairs attached to an object.
///
/// Setting a key to the empty string in an update removes it.
pub type Metadata = HashMap<String, String>;

/// Three-letter ISO currency code, lowercase (e.g. `"usd"`).
pub type Currency = String;
