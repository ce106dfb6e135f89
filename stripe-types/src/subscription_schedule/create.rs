//! Parameters for creating a schedule.

use serde::Serialize;

use super::params::{BillingThresholds, DefaultSettings, InvoiceSettings, PhasePlan, PhaseShape};
use super::{CollectionMethod, EndBehavior};
use crate::Metadata;
use crate::emptyable::Emptyable;
use crate::timestamp::{DateOrNow, UnixTimestamp};
use crate::validate::{InvalidParameters, Validate};

/// Parameters for creating a `SubscriptionSchedule`.
///
/// Either describe the schedule (`customer`, `phases`, ...) or adopt an
/// existing subscription with `from_subscription`; the two are exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriptionScheduleCreateParams {
    /// Customer the schedule is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    /// Settings applied to phases that do not override them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_settings: Option<DefaultSettings>,

    /// What happens once the last phase ends. The server defaults to `release`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_behavior: Option<EndBehavior>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Subscription to build the schedule from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_subscription: Option<String>,

    /// Attached key-value pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// The phases, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,

    /// When the first phase starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateOrNow>,
}

impl SubscriptionScheduleCreateParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates parameters that adopt an existing subscription.
    #[must_use]
    pub fn from_subscription(subscription: impl Into<String>) -> Self {
        Self {
            from_subscription: Some(subscription.into()),
            ..Self::default()
        }
    }

    /// Sets the customer.
    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<DateOrNow>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the end behavior.
    #[must_use]
    pub const fn with_end_behavior(mut self, end_behavior: EndBehavior) -> Self {
        self.end_behavior = Some(end_behavior);
        self
    }

    /// Appends a phase.
    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }
}

impl Validate for SubscriptionScheduleCreateParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        if self.from_subscription.is_some() {
            let conflicting = [
                ("phases", !self.phases.is_empty()),
                ("customer", self.customer.is_some()),
                ("default_settings", self.default_settings.is_some()),
                ("end_behavior", self.end_behavior.is_some()),
                ("start_date", self.start_date.is_some()),
            ];
            if let Some((name, _)) = conflicting.iter().find(|(_, set)| *set) {
                return Err(InvalidParameters::new(
                    "from_subscription",
                    format!("cannot be combined with `{name}`"),
                ));
            }
        }
        self.phases
            .iter()
            .enumerate()
            .try_for_each(|(i, phase)| phase.shape().check(i))
    }
}

/// A phase of a new schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    /// Percentage of each invoice transferred to the application owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_fee_percent: Option<f64>,

    /// Usage thresholds; `Emptyable::Empty` removes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_thresholds: Option<Emptyable<BillingThresholds>>,

    /// How invoices are paid during the phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_method: Option<CollectionMethod>,

    /// Coupon applied during the phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,

    /// Payment method used during the phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,

    /// Tax rate identifiers applied to every plan; `Emptyable::Empty` removes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tax_rates: Option<Emptyable<Vec<String>>>,

    /// End of the phase. Exclusive with `iterations`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<UnixTimestamp>,

    /// Invoice settings for the phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_settings: Option<InvoiceSettings>,

    /// Number of billing cycles the phase lasts. Exclusive with `end_date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,

    /// Plans active during the phase. At least one.
    pub plans: Vec<PhasePlan>,

    /// Legacy tax percentage applied to invoices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,

    /// Start with a trial using each plan's trial period. Exclusive with `trial_end`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<bool>,

    /// End of the trial. Exclusive with `trial`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<UnixTimestamp>,
}

impl Phase {
    /// Creates a phase with the given plans and no other settings.
    #[must_use]
    pub const fn new(plans: Vec<PhasePlan>) -> Self {
        Self {
            application_fee_percent: None,
            billing_thresholds: None,
            collection_method: None,
            coupon: None,
            default_payment_method: None,
            default_tax_rates: None,
            end_date: None,
            invoice_settings: None,
            iterations: None,
            plans,
            tax_percent: None,
            trial: None,
            trial_end: None,
        }
    }

    /// Sets the number of billing cycles.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: UnixTimestamp) -> Self {
        self.end_date = Some(end_date);
        self
    }

    fn shape(&self) -> PhaseShape<'_> {
        PhaseShape {
            plans: &self.plans,
            has_end_date: self.end_date.is_some(),
            has_iterations: self.iterations.is_some(),
            trial: self.trial,
            has_trial_end: self.trial_end.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form;

    fn gold() -> Phase {
        Phase::new(vec![PhasePlan::new("plan_gold").with_quantity(1)])
    }

    #[test]
    fn test_create_encodes_now_and_nested_plans() {
        let params = SubscriptionScheduleCreateParams::new()
            .with_customer("cus_1")
            .with_start_date(DateOrNow::Now)
            .with_phase(gold().with_iterations(3));
        params.validate().unwrap();
        let mut pairs = form::encode(&params).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("customer".to_owned(), "cus_1".to_owned()),
                ("phases[0][iterations]".to_owned(), "3".to_owned()),
                ("phases[0][plans][0][plan]".to_owned(), "plan_gold".to_owned()),
                ("phases[0][plans][0][quantity]".to_owned(), "1".to_owned()),
                ("start_date".to_owned(), "now".to_owned()),
            ]
        );
    }

    #[test]
    fn test_from_subscription_is_exclusive() {
        let params = SubscriptionScheduleCreateParams::from_subscription("sub_1");
        assert!(params.validate().is_ok());

        let err = SubscriptionScheduleCreateParams::from_subscription("sub_1")
            .with_phase(gold())
            .validate()
            .unwrap_err();
        assert_eq!(err.param, "from_subscription");
        assert!(err.message.contains("phases"));

        let err = SubscriptionScheduleCreateParams::from_subscription("sub_1")
            .with_end_behavior(EndBehavior::Cancel)
            .validate()
            .unwrap_err();
        assert!(err.message.contains("end_behavior"));
    }

    #[test]
    fn test_phase_without_plans_is_rejected() {
        let err = SubscriptionScheduleCreateParams::new()
            .with_customer("cus_1")
            .with_phase(gold())
            .with_phase(Phase::new(Vec::new()))
            .validate()
            .unwrap_err();
        assert_eq!(err.param, "phases[1][plans]");
    }

    #[test]
    fn test_end_date_and_iterations_are_exclusive() {
        let phase = gold()
            .with_iterations(2)
            .with_end_date(UnixTimestamp::from_secs(1_575_545_600));
        let err = SubscriptionScheduleCreateParams::new()
            .with_phase(phase)
            .validate()
            .unwrap_err();
        assert_eq!(err.param, "phases[0][iterations]");
    }

    #[test]
    fn test_trial_and_trial_end_are_exclusive() {
        let phase = Phase {
            trial: Some(true),
            trial_end: Some(UnixTimestamp::from_secs(1_573_000_000)),
            ..gold()
        };
        let err = SubscriptionScheduleCreateParams::new()
            .with_phase(phase)
            .validate()
            .unwrap_err();
        assert_eq!(err.param, "phases[0][trial_end]");
    }
}
