//! The `SubscriptionSchedule` resource.
//!
//! A schedule describes a sequence of phases, each a set of plans active for
//! a time window. The server advances the schedule; its lifecycle is
//!
//! ```text
//! not_started ──(start_date reached)──► active ──(last phase ends)──► end_behavior
//!      │                                  │
//!      └───────────── cancel ─────────────┴──► canceled
//!      └───────────── release ────────────┴──► released
//! ```
//!
//! where `end_behavior` resolves through [`EndBehavior::terminal_status`].

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::Metadata;
use crate::expandable::{ApiObject, Expandable};
use crate::list::{HasId, RangeQuery};
use crate::timestamp::UnixTimestamp;
use crate::validate::{InvalidParameters, Validate, check_limit};

pub mod create;
pub mod params;
pub mod update;

string_enum! {
    /// Status of a [`SubscriptionSchedule`].
    pub enum SubscriptionScheduleStatus {
        /// The current phase is running.
        Active = "active",
        /// Canceled; terminal.
        Canceled = "canceled",
        /// All phases ran and the end behavior was applied; terminal.
        Completed = "completed",
        /// The start date has not been reached.
        NotStarted = "not_started",
        /// The subscription was detached from the schedule; terminal.
        Released = "released",
    }
}

impl SubscriptionScheduleStatus {
    /// Returns `true` for `canceled`, `completed` and `released`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled | Self::Completed | Self::Released)
    }

    /// Returns `true` if the API accepts `cancel` in this status.
    #[must_use]
    pub const fn can_cancel(self) -> bool {
        matches!(self, Self::NotStarted | Self::Active)
    }

    /// Returns `true` if the API accepts `release` in this status.
    #[must_use]
    pub const fn can_release(self) -> bool {
        matches!(self, Self::NotStarted | Self::Active)
    }
}

string_enum! {
    /// What happens once the last phase ends.
    pub enum EndBehavior {
        /// Cancel the subscription.
        Cancel = "cancel",
        /// Complete the schedule and leave the subscription untouched.
        None = "none",
        /// Release the subscription from the schedule.
        Release = "release",
        /// Keep renewing the last phase.
        Renew = "renew",
    }
}

impl EndBehavior {
    /// The schedule status reached when the last phase ends.
    #[must_use]
    pub const fn terminal_status(self) -> SubscriptionScheduleStatus {
        match self {
            Self::Cancel => SubscriptionScheduleStatus::Canceled,
            Self::None => SubscriptionScheduleStatus::Completed,
            Self::Release => SubscriptionScheduleStatus::Released,
            Self::Renew => SubscriptionScheduleStatus::Active,
        }
    }
}

string_enum! {
    /// How invoices generated by the subscription are paid.
    pub enum CollectionMethod {
        /// Charge the default payment method automatically.
        ChargeAutomatically = "charge_automatically",
        /// Email an invoice to the customer.
        SendInvoice = "send_invoice",
    }
}

open_string_enum! {
    /// Unit of a renewal interval.
    pub enum IntervalUnit {
        /// Days.
        Day = "day",
        /// Weeks.
        Week = "week",
        /// Months.
        Month = "month",
        /// Years.
        Year = "year",
    }
}

/// A `SubscriptionSchedule`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSchedule {
    /// Unique identifier for the object.
    pub id: String,

    /// Always `"subscription_schedule"`.
    #[serde(default = "schedule_object")]
    pub object: String,

    /// When the schedule was canceled.
    #[serde(default)]
    pub canceled_at: Option<UnixTimestamp>,

    /// When the schedule was completed.
    #[serde(default)]
    pub completed_at: Option<UnixTimestamp>,

    /// Time at which the object was created.
    pub created: UnixTimestamp,

    /// Window of the phase currently running.
    #[serde(default)]
    pub current_phase: Option<CurrentPhase>,

    /// Customer who owns the schedule.
    pub customer: Expandable<ApiObject>,

    /// Settings applied to phases that do not override them.
    #[serde(default)]
    pub default_settings: Option<DefaultSettings>,

    /// What happens once the last phase ends.
    pub end_behavior: EndBehavior,

    /// `true` in live mode, `false` in test mode.
    #[serde(default)]
    pub livemode: bool,

    /// Attached key-value pairs.
    #[serde(default)]
    pub metadata: Option<Metadata>,

    /// The phases, in order.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub phases: Vec<Phase>,

    /// When the schedule was released.
    #[serde(default)]
    pub released_at: Option<UnixTimestamp>,

    /// ID of the subscription released from the schedule.
    #[serde(default)]
    pub released_subscription: Option<String>,

    /// Renewal cadence when `end_behavior` is `renew`.
    #[serde(default)]
    pub renewal_interval: Option<RenewalInterval>,

    /// Current status.
    pub status: SubscriptionScheduleStatus,

    /// Subscription managed by the schedule.
    #[serde(default)]
    pub subscription: Option<Expandable<ApiObject>>,
}

fn schedule_object() -> String {
    "subscription_schedule".to_owned()
}

impl HasId for SubscriptionSchedule {
    fn id(&self) -> &str {
        &self.id
    }
}

impl SubscriptionSchedule {
    /// Returns the phase whose window contains `at`.
    #[must_use]
    pub fn phase_at(&self, at: UnixTimestamp) -> Option<&Phase> {
        self.phases
            .iter()
            .find(|p| p.start_date <= at && at < p.end_date)
    }
}

/// Window of the running phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPhase {
    /// End of the phase.
    pub end_date: UnixTimestamp,
    /// Start of the phase.
    pub start_date: UnixTimestamp,
}

/// Settings applied to phases that do not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Usage thresholds that trigger an invoice.
    #[serde(default)]
    pub billing_thresholds: Option<BillingThresholds>,

    /// How invoices are paid.
    #[serde(default)]
    pub collection_method: Option<CollectionMethod>,

    /// Payment method used for the subscription.
    #[serde(default)]
    pub default_payment_method: Option<Expandable<ApiObject>>,

    /// Invoice settings.
    #[serde(default)]
    pub invoice_settings: Option<InvoiceSettings>,
}

/// Thresholds that trigger an invoice before the period ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingThresholds {
    /// Monetary threshold, in the smallest currency unit.
    #[serde(default)]
    pub amount_gte: Option<i64>,

    /// Whether reaching the threshold resets the billing cycle anchor.
    #[serde(default)]
    pub reset_billing_cycle_anchor: Option<bool>,
}

/// Invoice settings of a phase or schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    /// Days until an emailed invoice is due.
    #[serde(default)]
    pub days_until_due: Option<u32>,
}

/// Renewal cadence of a renewing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalInterval {
    /// Unit of the interval.
    pub interval: IntervalUnit,
    /// Number of units.
    pub length: u32,
}

/// A phase as reported by the API.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Percentage of each invoice transferred to the application owner.
    #[serde(default)]
    pub application_fee_percent: Option<f64>,

    /// Usage thresholds that trigger an invoice.
    #[serde(default)]
    pub billing_thresholds: Option<BillingThresholds>,

    /// How invoices are paid during the phase.
    #[serde(default)]
    pub collection_method: Option<CollectionMethod>,

    /// Coupon applied during the phase.
    #[serde(default)]
    pub coupon: Option<Expandable<ApiObject>>,

    /// Payment method used during the phase.
    #[serde(default)]
    pub default_payment_method: Option<Expandable<ApiObject>>,

    /// Tax rates applied to every plan of the phase.
    #[serde(default)]
    pub default_tax_rates: Option<Vec<ApiObject>>,

    /// End of the phase.
    pub end_date: UnixTimestamp,

    /// Invoice settings for the phase.
    #[serde(default)]
    pub invoice_settings: Option<InvoiceSettings>,

    /// Plans active during the phase.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub plans: Vec<PhasePlan>,

    /// Start of the phase.
    pub start_date: UnixTimestamp,

    /// Legacy tax percentage applied to invoices.
    #[serde(default)]
    pub tax_percent: Option<f64>,

    /// End of the trial, if the phase starts with one.
    #[serde(default)]
    pub trial_end: Option<UnixTimestamp>,
}

/// A plan line of a reported phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePlan {
    /// Usage threshold that triggers an invoice for this plan.
    #[serde(default)]
    pub billing_thresholds: Option<PlanBillingThresholds>,

    /// The plan.
    pub plan: Expandable<ApiObject>,

    /// Quantity of the plan.
    #[serde(default)]
    pub quantity: Option<u64>,

    /// Tax rates applied to this plan.
    #[serde(default)]
    pub tax_rates: Option<Vec<ApiObject>>,
}

/// Per-plan usage threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanBillingThresholds {
    /// Usage quantity that triggers an invoice.
    pub usage_gte: i64,
}

/// Returns `true` if each phase starts exactly where the previous one ends.
#[must_use]
pub fn phases_are_contiguous(phases: &[Phase]) -> bool {
    phases.windows(2).all(|w| w[0].end_date == w[1].start_date)
}

/// Parameters for retrieving a `SubscriptionSchedule`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionScheduleRetrieveParams {
    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

impl Validate for SubscriptionScheduleRetrieveParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

/// Parameters for listing `SubscriptionSchedule`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionScheduleListParams {
    /// Filter on cancellation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<RangeQuery>,

    /// Filter on completion time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<RangeQuery>,

    /// Filter on creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<RangeQuery>,

    /// Only schedules for this customer.
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

    /// Filter on release time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<RangeQuery>,

    /// Only schedules that have not started yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<bool>,

    /// Cursor: return objects created after this object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
}

impl_paginate!(SubscriptionScheduleListParams);

impl Validate for SubscriptionScheduleListParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        check_limit(self.limit)
    }
}

/// Parameters for canceling a `SubscriptionSchedule`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionScheduleCancelParams {
    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Invoice pending usage immediately. Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_now: Option<bool>,

    /// Prorate the final invoice. Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prorate: Option<bool>,
}

impl Validate for SubscriptionScheduleCancelParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

/// Parameters for releasing a `SubscriptionSchedule`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionScheduleReleaseParams {
    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Keep the subscription's `cancel_at` after release.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_cancel_date: Option<bool>,
}

impl Validate for SubscriptionScheduleReleaseParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

pub use create::SubscriptionScheduleCreateParams;
pub use update::SubscriptionScheduleUpdateParams;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schedule_json() -> serde_json::Value {
        json!({
            "id": "sub_sched_1",
            "object": "subscription_schedule",
            "canceled_at": null,
            "completed_at": null,
            "created": 1_572_900_000,
            "current_phase": { "start_date": 1_572_953_600, "end_date": 1_575_545_600 },
            "customer": "cus_1",
            "default_settings": {
                "billing_thresholds": null,
                "collection_method": "charge_automatically",
                "default_payment_method": null,
                "invoice_settings": null
            },
            "end_behavior": "release",
            "livemode": false,
            "metadata": {},
            "phases": [
                {
                    "application_fee_percent": null,
                    "billing_thresholds": null,
                    "collection_method": null,
                    "coupon": null,
                    "default_payment_method": null,
                    "default_tax_rates": [],
                    "end_date": 1_575_545_600,
                    "invoice_settings": null,
                    "plans": [{ "billing_thresholds": null, "plan": "plan_gold", "quantity": 1, "tax_rates": [] }],
                    "start_date": 1_572_953_600,
                    "tax_percent": null,
                    "trial_end": null
                },
                {
                    "end_date": 1_578_224_000,
                    "plans": [{ "plan": "plan_silver", "quantity": 2 }],
                    "start_date": 1_575_545_600
                }
            ],
            "released_at": null,
            "released_subscription": null,
            "renewal_interval": null,
            "status": "active",
            "subscription": "sub_1"
        })
    }

    #[test]
    fn test_schedule_deserialize() {
        let schedule: SubscriptionSchedule = serde_json::from_value(schedule_json()).unwrap();
        assert_eq!(schedule.status, SubscriptionScheduleStatus::Active);
        assert_eq!(schedule.end_behavior, EndBehavior::Release);
        assert_eq!(schedule.customer.id(), "cus_1");
        assert_eq!(schedule.phases.len(), 2);
        assert_eq!(schedule.phases[1].plans[0].quantity, Some(2));
        assert!(phases_are_contiguous(&schedule.phases));
        let inside = UnixTimestamp::from_secs(1_576_000_000);
        assert_eq!(
            schedule.phase_at(inside).map(|p| p.plans[0].plan.id()),
            Some("plan_silver")
        );
    }

    #[test]
    fn test_gap_between_phases_is_detected() {
        let mut schedule: SubscriptionSchedule = serde_json::from_value(schedule_json()).unwrap();
        schedule.phases[1].start_date = UnixTimestamp::from_secs(1_575_545_601);
        assert!(!phases_are_contiguous(&schedule.phases));
    }

    #[test]
    fn test_status_helpers() {
        for status in SubscriptionScheduleStatus::ALL {
            assert_eq!(status.can_cancel(), !status.is_terminal());
            assert_eq!(status.can_release(), status.can_cancel());
        }
    }

    #[test]
    fn test_end_behavior_terminal_status() {
        assert_eq!(
            EndBehavior::Cancel.terminal_status(),
            SubscriptionScheduleStatus::Canceled
        );
        assert_eq!(
            EndBehavior::Release.terminal_status(),
            SubscriptionScheduleStatus::Released
        );
        assert_eq!(
            EndBehavior::None.terminal_status(),
            SubscriptionScheduleStatus::Completed
        );
        assert_eq!(
            EndBehavior::Renew.terminal_status(),
            SubscriptionScheduleStatus::Active
        );
    }

    #[test]
    fn test_list_params_range_filters() {
        let params = SubscriptionScheduleListParams {
            canceled_at: Some(RangeQuery::since(UnixTimestamp::from_secs(1_572_953_600))),
            scheduled: Some(true),
            ..SubscriptionScheduleListParams::default()
        };
        let mut pairs = crate::form::encode(&params).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("canceled_at[gte]".to_owned(), "1572953600".to_owned()),
                ("scheduled".to_owned(), "true".to_owned()),
            ]
        );
    }
}
