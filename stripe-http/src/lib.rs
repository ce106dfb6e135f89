#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Typed HTTP client for the Stripe Files, SetupIntents and
//! SubscriptionSchedules APIs.
//!
//! Requests are form-encoded (multipart for file uploads), authenticated
//! with a bearer secret key and pinned to an API version. Responses decode
//! into the types of [`stripe_types`].
//!
//! # Modules
//!
//! - [`client`] — The [`Client`] and its request pipeline
//! - [`config`] — API key, base URLs, version and timeout
//! - [`options`] — Per-request overrides such as idempotency keys
//! - [`resources`] — Resource handles: files, setup intents, schedules
//! - [`pagination`] — Auto-pagination over list endpoints
//! - [`error`] — Error type and its coarse classification
//! - [`constants`] — Default hosts, header names and environment variables
//!
//! # Example
//!
//! ```no_run
//! use stripe_http::{Client, ClientConfig, RequestOptions};
//! use stripe_types::setup_intent::SetupIntentCreateParams;
//!
//! # async fn run() -> Result<(), stripe_http::Error> {
//! let client = Client::new(ClientConfig::new("sk_test_123"))?;
//! let params = SetupIntentCreateParams::new()
//!     .with_customer("cus_1")
//!     .with_payment_method_types(["card"]);
//! let intent = client
//!     .setup_intents()
//!     .create(&params, &RequestOptions::new().with_idempotency_key("order-42"))
//!     .await?;
//! println!("{} is {}", intent.id, intent.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod options;
pub mod pagination;
pub mod resources;

#[cfg(test)]
mod test_support;

pub use client::Client;
pub use config::{ApiKey, ClientConfig, ConfigError};
pub use error::{ApiError, Error, ErrorCondition};
pub use options::RequestOptions;
pub use pagination::paginate;
pub use stripe_types;
