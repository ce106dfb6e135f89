//! Parameter shapes shared by schedule create and update.

use serde::Serialize;

use super::CollectionMethod;
use crate::emptyable::Emptyable;
use crate::validate::InvalidParameters;

pub use super::{BillingThresholds, InvoiceSettings, PlanBillingThresholds};

/// Settings applied to phases that do not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefaultSettings {
    /// Usage thresholds; `Emptyable::Empty` removes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_thresholds: Option<Emptyable<BillingThresholds>>,

    /// How invoices are paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_method: Option<CollectionMethod>,

    /// Payment method used for the subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,

    /// Invoice settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_settings: Option<InvoiceSettings>,
}

/// A plan line of a phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhasePlan {
    /// Usage threshold; `Emptyable::Empty` removes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_thresholds: Option<Emptyable<PlanBillingThresholds>>,

    /// Plan identifier.
    pub plan: String,

    /// Quantity of the plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,

    /// Tax rate identifiers; `Emptyable::Empty` removes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rates: Option<Emptyable<Vec<String>>>,
}

impl PhasePlan {
    /// Creates a plan line for `plan`.
    #[must_use]
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            billing_thresholds: None,
            plan: plan.into(),
            quantity: None,
            tax_rates: None,
        }
    }

    /// Sets the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// The constraints every phase must satisfy, whichever verb carries it.
pub(crate) struct PhaseShape<'a> {
    pub plans: &'a [PhasePlan],
    pub has_end_date: bool,
    pub has_iterations: bool,
    pub trial: Option<bool>,
    pub has_trial_end: bool,
}

impl PhaseShape<'_> {
    pub(crate) fn check(&self, index: usize) -> Result<(), InvalidParameters> {
        let prefix = format!("phases[{index}]");
        if self.plans.is_empty() {
            return Err(InvalidParameters::new(
                format!("{prefix}[plans]"),
                "a phase needs at least one plan",
            ));
        }
        if let Some(i) = self.plans.iter().position(|p| p.plan.trim().is_empty()) {
            return Err(InvalidParameters::new(
                format!("{prefix}[plans][{i}][plan]"),
                "must be a non-empty plan identifier",
            ));
        }
        if self.has_end_date && self.has_iterations {
            return Err(InvalidParameters::new(
                format!("{prefix}[iterations]"),
                "cannot be combined with end_date",
            ));
        }
        if self.trial == Some(true) && self.has_trial_end {
            return Err(InvalidParameters::new(
                format!("{prefix}[trial_end]"),
                "cannot be combined with trial",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form;

    #[test]
    fn test_cleared_tax_rates_encode_as_empty_string() {
        let plan = PhasePlan {
            tax_rates: Some(Emptyable::Empty),
            ..PhasePlan::new("plan_gold")
        };
        let mut pairs = form::encode(&plan).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("plan".to_owned(), "plan_gold".to_owned()),
                ("tax_rates".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn test_default_settings_thresholds() {
        let settings = DefaultSettings {
            billing_thresholds: Some(Emptyable::Set(BillingThresholds {
                amount_gte: Some(10_000),
                reset_billing_cycle_anchor: None,
            })),
            collection_method: Some(CollectionMethod::SendInvoice),
            ..DefaultSettings::default()
        };
        let mut pairs = form::encode(&settings).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("billing_thresholds[amount_gte]".to_owned(), "10000".to_owned()),
                ("collection_method".to_owned(), "send_invoice".to_owned()),
            ]
        );
    }
}
