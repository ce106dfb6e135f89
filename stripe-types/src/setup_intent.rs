//! The `SetupIntent` resource.
//!
//! A `SetupIntent` guides the process of saving a customer's payment
//! credentials for future payments. Its status evolves on the server:
//!
//! ```text
//! requires_payment_method ──confirm──► succeeded
//!          ▲                    ├────► requires_action ──(authentication)──► requires_confirmation | succeeded
//!          └──────(failure)─────┘
//! any non-terminal status ──cancel──► canceled
//! ```
//!
//! The transitions are enforced by the API; [`SetupIntentStatus`] only
//! describes them so callers can decide which verb makes sense.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::Metadata;
use crate::error::ApiErrorObject;
use crate::expandable::{ApiObject, Expandable};
use crate::list::{HasId, RangeQuery};
use crate::timestamp::UnixTimestamp;
use crate::validate::{InvalidParameters, Validate, check_limit};

pub mod params;

use params::{ConfirmMandateData, MandateData, PaymentMethodOptionsParams, SingleUse};

string_enum! {
    /// Status of a [`SetupIntent`].
    pub enum SetupIntentStatus {
        /// Canceled; terminal.
        Canceled = "canceled",
        /// The payment method is being processed.
        Processing = "processing",
        /// The customer must complete an action (e.g. 3D Secure).
        RequiresAction = "requires_action",
        /// Ready to be confirmed.
        RequiresConfirmation = "requires_confirmation",
        /// A payment method must be attached. Initial status.
        RequiresPaymentMethod = "requires_payment_method",
        /// The payment method was set up; terminal.
        Succeeded = "succeeded",
    }
}

impl SetupIntentStatus {
    /// Returns `true` for `succeeded` and `canceled`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled)
    }

    /// Returns `true` if the API accepts `cancel` in this status.
    #[must_use]
    pub const fn can_cancel(self) -> bool {
        matches!(
            self,
            Self::RequiresPaymentMethod | Self::RequiresConfirmation | Self::RequiresAction
        )
    }

    /// Returns `true` if the API accepts `confirm` in this status.
    #[must_use]
    pub const fn can_confirm(self) -> bool {
        matches!(self, Self::RequiresPaymentMethod | Self::RequiresConfirmation)
    }

    /// Statuses a successful `confirm` may lead to.
    #[must_use]
    pub const fn confirm_outcomes() -> &'static [Self] {
        &[
            Self::Succeeded,
            Self::RequiresAction,
            Self::RequiresPaymentMethod,
        ]
    }

    /// Statuses reachable from this one without an explicit `cancel`.
    #[must_use]
    pub const fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::RequiresPaymentMethod | Self::RequiresConfirmation => Self::confirm_outcomes(),
            Self::RequiresAction => &[Self::RequiresConfirmation, Self::Succeeded],
            Self::Processing => &[Self::Succeeded, Self::RequiresPaymentMethod],
            Self::Succeeded | Self::Canceled => &[],
        }
    }
}

string_enum! {
    /// Reason a [`SetupIntent`] was canceled.
    pub enum CancellationReason {
        /// Abandoned by the customer.
        Abandoned = "abandoned",
        /// A duplicate of another intent.
        Duplicate = "duplicate",
        /// Canceled at the customer's request.
        RequestedByCustomer = "requested_by_customer",
    }
}

open_string_enum! {
    /// How the payment method is intended to be used in the future.
    pub enum SetupIntentUsage {
        /// Charged later without the customer present. The default.
        OffSession = "off_session",
        /// Charged later with the customer present.
        OnSession = "on_session",
    }
}

impl Default for SetupIntentUsage {
    fn default() -> Self {
        Self::OffSession
    }
}

open_string_enum! {
    /// Kind of pending client-side step.
    pub enum NextActionType {
        /// Redirect the customer to a URL.
        RedirectToUrl = "redirect_to_url",
        /// Let the client SDK handle the action.
        UseStripeSdk = "use_stripe_sdk",
    }
}

string_enum! {
    /// 3D Secure behaviour reported for card setups.
    pub enum RequestThreeDSecure {
        /// Always request 3D Secure.
        Any = "any",
        /// Request it when required or available.
        Automatic = "automatic",
        /// Only when the issuer challenges.
        ChallengeOnly = "challenge_only",
    }
}

/// A `SetupIntent`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupIntent {
    /// Unique identifier for the object.
    pub id: String,

    /// Always `"setup_intent"`.
    #[serde(default = "setup_intent_object")]
    pub object: String,

    /// ID of the Connect application that created the intent.
    #[serde(default)]
    pub application: Option<Expandable<ApiObject>>,

    /// Reason for cancellation; set only once canceled.
    #[serde(default)]
    pub cancellation_reason: Option<CancellationReason>,

    /// Secret used client-side to retrieve the intent with a publishable key.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Time at which the object was created.
    pub created: UnixTimestamp,

    /// Customer the intent belongs to; may be a deleted customer.
    #[serde(default)]
    pub customer: Option<Expandable<ApiObject>>,

    /// An arbitrary string attached to the object.
    #[serde(default)]
    pub description: Option<String>,

    /// The error encountered in the previous setup attempt.
    #[serde(default)]
    pub last_setup_error: Option<ApiErrorObject>,

    /// `true` in live mode, `false` in test mode.
    #[serde(default)]
    pub livemode: bool,

    /// Multi-use mandate generated by the intent.
    #[serde(default)]
    pub mandate: Option<Expandable<ApiObject>>,

    /// Attached key-value pairs.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub metadata: Metadata,

    /// Pending action the customer must take.
    #[serde(default)]
    pub next_action: Option<NextAction>,

    /// Account on behalf of which the intent was set up.
    #[serde(default)]
    pub on_behalf_of: Option<Expandable<ApiObject>>,

    /// Payment method used with this intent.
    #[serde(default)]
    pub payment_method: Option<Expandable<ApiObject>>,

    /// Payment-method-specific configuration.
    #[serde(default)]
    pub payment_method_options: Option<PaymentMethodOptions>,

    /// Payment method types this intent is allowed to set up.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub payment_method_types: Vec<String>,

    /// Single-use mandate generated by the intent.
    #[serde(default)]
    pub single_use_mandate: Option<Expandable<ApiObject>>,

    /// Current status.
    pub status: SetupIntentStatus,

    /// Intended future usage of the payment method.
    #[serde(default)]
    pub usage: SetupIntentUsage,
}

fn setup_intent_object() -> String {
    "setup_intent".to_owned()
}

impl HasId for SetupIntent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A pending client-side step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextAction {
    /// Kind of action.
    #[serde(rename = "type")]
    pub kind: NextActionType,

    /// Present for `redirect_to_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to_url: Option<RedirectToUrl>,

    /// Opaque data for the client SDK; its shape may change at any time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_stripe_sdk: Option<serde_json::Value>,
}

/// Redirect target for a `redirect_to_url` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectToUrl {
    /// Where the customer is sent after authenticating.
    #[serde(default)]
    pub return_url: Option<String>,

    /// The URL the customer must be redirected to.
    #[serde(default)]
    pub url: Option<String>,
}

/// Payment-method-specific configuration of an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodOptions {
    /// Card options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardOptions>,
}

/// Card options of an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOptions {
    /// 3D Secure behaviour.
    #[serde(default)]
    pub request_three_d_secure: Option<RequestThreeDSecure>,
}

/// Parameters for creating a `SetupIntent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetupIntentCreateParams {
    /// Confirm immediately. Defaults to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,

    /// Customer the intent belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// An arbitrary string attached to the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Generates a mandate on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_data: Option<MandateData>,

    /// Attached key-value pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Account on behalf of which to set up the payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,

    /// Payment method to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Payment-method-specific configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_options: Option<PaymentMethodOptionsParams>,

    /// Allowed payment method types. The server defaults to `["card"]`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub payment_method_types: Vec<String>,

    /// Where to send the customer after authentication (with `confirm`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,

    /// Generates a single-use mandate on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_use: Option<SingleUse>,

    /// Intended future usage. The server defaults to `off_session`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<SetupIntentUsage>,
}

impl SetupIntentCreateParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the customer.
    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Sets the allowed payment method types.
    #[must_use]
    pub fn with_payment_method_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_method_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the payment method.
    #[must_use]
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }
}

impl Validate for SetupIntentCreateParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        if let Some(mandate) = &self.mandate_data {
            mandate.validate("mandate_data")?;
        }
        Ok(())
    }
}

/// Parameters for retrieving a `SetupIntent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupIntentRetrieveParams {
    /// Required when retrieving with a publishable key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

impl Validate for SetupIntentRetrieveParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

/// Parameters for updating a `SetupIntent`. Omitted fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupIntentUpdateParams {
    /// Customer the intent belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// An arbitrary string attached to the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Key-value pairs to merge; an empty value removes the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Payment method to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Allowed payment method types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_types: Option<Vec<String>>,
}

impl Validate for SetupIntentUpdateParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

/// Parameters for listing `SetupIntent`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupIntentListParams {
    /// Filter on creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<RangeQuery>,

    /// Only intents for this customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Cursor: return objects created before this object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Page size, between 1 and 100 (default 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,

    /// Only intents using this payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Cursor: return objects created after this object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
}

impl_paginate!(SetupIntentListParams);

impl Validate for SetupIntentListParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        check_limit(self.limit)
    }
}

/// Parameters for canceling a `SetupIntent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetupIntentCancelParams {
    /// Reason for canceling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<CancellationReason>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

impl Validate for SetupIntentCancelParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

/// Parameters for confirming a `SetupIntent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetupIntentConfirmParams {
    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Generates a mandate on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_data: Option<ConfirmMandateData>,

    /// Payment method to attach before confirming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Payment-method-specific configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_options: Option<PaymentMethodOptionsParams>,

    /// Where to send the customer after authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

impl Validate for SetupIntentConfirmParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        match &self.mandate_data {
            Some(ConfirmMandateData::Full(mandate)) => mandate.validate("mandate_data"),
            Some(ConfirmMandateData::Inferred(_)) | None => Ok(()),
        }
    }
}
