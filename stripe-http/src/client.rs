//! The HTTP client.
//!
//! [`Client`] owns the transport and the shared configuration, and exposes
//! one handle per resource:
//!
//! ```no_run
//! # async fn run() -> Result<(), stripe_http::Error> {
//! use stripe_http::{Client, ClientConfig, RequestOptions};
//! use stripe_types::setup_intent::SetupIntentCreateParams;
//!
//! let client = Client::new(ClientConfig::new("sk_test_123"))?;
//! let params = SetupIntentCreateParams::new()
//!     .with_customer("cus_1")
//!     .with_payment_method_types(["card"]);
//! let intent = client
//!     .setup_intents()
//!     .create(&params, &RequestOptions::new())
//!     .await?;
//! # let _ = intent;
//! # Ok(())
//! # }
//! ```
//!
//! `GET` requests carry their parameters in the query string, `POST`
//! requests in an `application/x-www-form-urlencoded` body, and uploads in a
//! `multipart/form-data` body sent to the upload host. Retries and request
//! signing are left to middleware on the [`ClientWithMiddleware`] passed
//! through [`ClientConfig::with_http_client`].

use std::fmt::Display;
use std::time::Duration;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, StatusCode};
use reqwest::multipart;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stripe_types::error::ErrorResponse;
use stripe_types::form;
use stripe_types::validate::Validate;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::{ApiKey, ClientConfig};
use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_FILES_BASE, FORM_CONTENT_TYPE, IDEMPOTENCY_KEY_HEADER,
    REQUEST_ID_HEADER, STRIPE_ACCOUNT_HEADER, STRIPE_VERSION_HEADER,
};
use crate::error::{ApiError, Error};
use crate::options::RequestOptions;
use crate::resources::{Files, SetupIntents, SubscriptionSchedules};

/// Which host a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Host {
    /// The REST API.
    Api,
    /// The upload host.
    Files,
}

/// Body of an outgoing request.
enum Body {
    Empty,
    Form(String),
    Multipart(multipart::Form),
}

/// Typed client for the API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    http: ClientWithMiddleware,
    api_base: Url,
    files_base: Url,
    api_key: ApiKey,
    api_version: String,
    timeout: Option<Duration>,
    headers: HeaderMap,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_base", &self.api_base.as_str())
            .field("files_base", &self.files_base.as_str())
            .field("api_key", &self.api_key)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if a default base URL cannot be parsed.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let api_base = match config.api_base {
            Some(url) => url,
            None => Url::parse(DEFAULT_API_BASE).map_err(|source| Error::Url {
                context: "Failed to parse default API base",
                source,
            })?,
        };
        let files_base = match config.files_base {
            Some(url) => url,
            None => Url::parse(DEFAULT_FILES_BASE).map_err(|source| Error::Url {
                context: "Failed to parse default files base",
                source,
            })?,
        };
        let http = config
            .http_client
            .unwrap_or_else(|| ClientBuilder::new(reqwest::Client::new()).build());
        Ok(Self {
            http,
            api_base,
            files_base,
            api_key: config.api_key,
            api_version: config.api_version,
            timeout: config.timeout,
            headers: config.default_headers,
        })
    }

    /// Builds a client from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the environment is incomplete, or
    /// [`Error::Url`] as [`Client::new`] does.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Returns the REST API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Returns the upload host base URL.
    #[must_use]
    pub const fn files_base(&self) -> &Url {
        &self.files_base
    }

    /// Returns the API version sent with every request.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The Files resource.
    #[must_use]
    pub const fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// The `SetupIntent` resource.
    #[must_use]
    pub const fn setup_intents(&self) -> SetupIntents<'_> {
        SetupIntents::new(self)
    }

    /// The `SubscriptionSchedule` resource.
    #[must_use]
    pub const fn subscription_schedules(&self) -> SubscriptionSchedules<'_> {
        SubscriptionSchedules::new(self)
    }

    /// Sends a `GET` with `params` in the query string.
    pub(crate) async fn get<P, R>(
        &self,
        segments: &[&str],
        context: &'static str,
        params: &P,
        options: &RequestOptions,
    ) -> Result<R, Error>
    where
        P: Serialize + Validate + ?Sized,
        R: DeserializeOwned,
    {
        params.validate()?;
        let mut pairs = form::encode(params)?;
        form::append_expand(&mut pairs, &options.expand);
        let mut url = self.endpoint(Host::Api, segments, context)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }
        self.execute(Method::GET, url, Body::Empty, context, options)
            .await
    }

    /// Sends a `POST` with `params` as a urlencoded body.
    pub(crate) async fn post<P, R>(
        &self,
        segments: &[&str],
        context: &'static str,
        params: &P,
        options: &RequestOptions,
    ) -> Result<R, Error>
    where
        P: Serialize + Validate + ?Sized,
        R: DeserializeOwned,
    {
        params.validate()?;
        let mut pairs = form::encode(params)?;
        form::append_expand(&mut pairs, &options.expand);
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&pairs)
            .finish();
        let url = self.endpoint(Host::Api, segments, context)?;
        self.execute(Method::POST, url, Body::Form(body), context, options)
            .await
    }

    /// Sends a `POST` with a multipart body.
    pub(crate) async fn post_multipart<R>(
        &self,
        host: Host,
        segments: &[&str],
        context: &'static str,
        body: multipart::Form,
        options: &RequestOptions,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(host, segments, context)?;
        self.execute(Method::POST, url, Body::Multipart(body), context, options)
            .await
    }

    /// Joins path segments onto a base URL, percent-encoding each one.
    fn endpoint(&self, host: Host, segments: &[&str], context: &'static str) -> Result<Url, Error> {
        let mut url = match host {
            Host::Api => self.api_base.clone(),
            Host::Files => self.files_base.clone(),
        };
        url.path_segments_mut()
            .map_err(|()| Error::Url {
                context,
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "stripe.request",
            skip_all,
            fields(
                http.method = %method,
                url.path = %url.path(),
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn execute<R>(
        &self,
        method: Method,
        url: Url,
        body: Body,
        context: &'static str,
        options: &RequestOptions,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let api_key = options.api_key.as_ref().unwrap_or(&self.api_key);
        let version = options
            .stripe_version
            .as_deref()
            .unwrap_or(&self.api_version);

        let mut req = self
            .http
            .request(method, url)
            .headers(self.headers.clone())
            .bearer_auth(api_key.expose())
            .header(STRIPE_VERSION_HEADER, version);
        if let Some(key) = &options.idempotency_key {
            req = req.header(IDEMPOTENCY_KEY_HEADER, key.as_str());
        }
        if let Some(account) = &options.stripe_account {
            req = req.header(STRIPE_ACCOUNT_HEADER, account.as_str());
        }
        for (key, value) in &options.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        req = match body {
            Body::Empty => req,
            Body::Form(text) => req.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(text),
            Body::Multipart(form) => req.multipart(form),
        };

        let result = Self::send(req, context).await;
        record_result_on_span(&result);
        result
    }

    async fn send<R>(req: reqwest_middleware::RequestBuilder, context: &'static str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = req
            .send()
            .await
            .map_err(|source| Error::Http { context, source })?;
        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response
            .bytes()
            .await
            .map_err(|source| Error::ResponseBodyRead { context, source })?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
                context,
                status,
                source,
            });
        }
        Err(Self::api_error(status, request_id, &bytes, context))
    }

    fn api_error(
        status: StatusCode,
        request_id: Option<String>,
        bytes: &[u8],
        context: &'static str,
    ) -> Error {
        match serde_json::from_slice::<ErrorResponse>(bytes) {
            Ok(ErrorResponse { error }) => Error::Api(ApiError {
                status,
                request_id,
                error,
            }),
            Err(source) => Error::Decode {
                context,
                status,
                source,
            },
        }
    }
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to Stripe failed");
        }
    }
}

/// Records the outcome of a request on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
