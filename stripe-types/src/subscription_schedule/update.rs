//! Parameters for updating a schedule.
//!
//! Passing `phases` replaces the whole phase list. Phases that have already
//! started must be sent back unchanged; their `start_date` anchors the rest.

use serde::Serialize;

use super::params::{BillingThresholds, DefaultSettings, InvoiceSettings, PhasePlan, PhaseShape};
use super::{CollectionMethod, EndBehavior};
use crate::Metadata;
use crate::emptyable::Emptyable;
use crate::timestamp::DateOrNow;
use crate::validate::{InvalidParameters, Validate};

/// Parameters for updating a `SubscriptionSchedule`. Omitted fields are
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriptionScheduleUpdateParams {
    /// Settings applied to phases that do not override them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_settings: Option<DefaultSettings>,

    /// What happens once the last phase ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_behavior: Option<EndBehavior>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Key-value pairs to merge; an empty value removes the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Replacement phase list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<Phase>>,

    /// Prorate changes to the current phase. Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prorate: Option<bool>,
}

impl SubscriptionScheduleUpdateParams {
    /// Creates empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the end behavior.
    #[must_use]
    pub const fn with_end_behavior(mut self, end_behavior: EndBehavior) -> Self {
        self.end_behavior = Some(end_behavior);
        self
    }

    /// Replaces the phase list.
    #[must_use]
    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.phases = Some(phases);
        self
    }
}

impl Validate for SubscriptionScheduleUpdateParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        self.phases
            .iter()
            .flatten()
            .enumerate()
            .try_for_each(|(i, phase)| phase.shape().check(i))
    }
}

/// A phase sent with an update.
///
/// Boundaries accept `"now"`, and `tax_percent` can be cleared.
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
    pub end_date: Option<DateOrNow>,

    /// Invoice settings for the phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_settings: Option<InvoiceSettings>,

    /// Number of billing cycles the phase lasts. Exclusive with `end_date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,

    /// Plans active during the phase. At least one.
    pub plans: Vec<PhasePlan>,

    /// Start of the phase. Required on a phase that has already started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateOrNow>,

    /// Legacy tax percentage; `Emptyable::Empty` removes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<Emptyable<f64>>,

    /// Start with a trial using each plan's trial period. Exclusive with `trial_end`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<bool>,

    /// End of the trial. Exclusive with `trial`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<DateOrNow>,
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
            start_date: None,
            tax_percent: None,
            trial: None,
            trial_end: None,
        }
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateOrNow) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: DateOrNow) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the number of billing cycles.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
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
    use crate::timestamp::UnixTimestamp;

    #[test]
    fn test_omitted_fields_are_not_sent() {
        let params = SubscriptionScheduleUpdateParams::new().with_end_behavior(EndBehavior::Cancel);
        assert_eq!(
            form::encode(&params).unwrap(),
            vec![("end_behavior".to_owned(), "cancel".to_owned())]
        );
    }

    #[test]
    fn test_cleared_fields_are_sent_empty() {
        let phase = Phase {
            default_tax_rates: Some(Emptyable::Empty),
            tax_percent: Some(Emptyable::Empty),
            ..Phase::new(vec![PhasePlan::new("plan_gold")])
                .with_start_date(DateOrNow::At(UnixTimestamp::from_secs(1_572_953_600)))
                .with_end_date(DateOrNow::Now)
        };
        let params = SubscriptionScheduleUpdateParams::new().with_phases(vec![phase]);
        params.validate().unwrap();
        let mut pairs = form::encode(&params).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("phases[0][default_tax_rates]".to_owned(), String::new()),
                ("phases[0][end_date]".to_owned(), "now".to_owned()),
                ("phases[0][plans][0][plan]".to_owned(), "plan_gold".to_owned()),
                ("phases[0][start_date]".to_owned(), "1572953600".to_owned()),
                ("phases[0][tax_percent]".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn test_update_phase_checks() {
        let phase = Phase::new(vec![PhasePlan::new("plan_gold")])
            .with_end_date(DateOrNow::Now)
            .with_iterations(1);
        let err = SubscriptionScheduleUpdateParams::new()
            .with_phases(vec![phase])
            .validate()
            .unwrap_err();
        assert_eq!(err.param, "phases[0][iterations]");
    }
}
