//! Nested parameter shapes used by `SetupIntent` create and confirm.

use serde::{Deserialize, Serialize};

use crate::Currency;
use crate::timestamp::UnixTimestamp;
use crate::validate::InvalidParameters;

/// Mandate generated when the intent succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandateData {
    /// How the customer accepted the mandate.
    pub customer_acceptance: CustomerAcceptance,
}

impl MandateData {
    /// Creates mandate data for an acceptance given while the customer was
    /// online.
    #[must_use]
    pub fn online(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            customer_acceptance: CustomerAcceptance::Online {
                accepted_at: None,
                online: OnlineAcceptance {
                    ip_address: ip_address.into(),
                    user_agent: user_agent.into(),
                },
            },
        }
    }

    /// Creates mandate data for an acceptance given offline.
    #[must_use]
    pub const fn offline() -> Self {
        Self {
            customer_acceptance: CustomerAcceptance::Offline { accepted_at: None },
        }
    }

    pub(crate) fn validate(&self, prefix: &str) -> Result<(), InvalidParameters> {
        if let CustomerAcceptance::Online { online, .. } = &self.customer_acceptance {
            let base = format!("{prefix}[customer_acceptance][online]");
            if online.ip_address.trim().is_empty() {
                return Err(InvalidParameters::new(
                    format!("{base}[ip_address]"),
                    "required for online acceptance",
                ));
            }
            if online.user_agent.trim().is_empty() {
                return Err(InvalidParameters::new(
                    format!("{base}[user_agent]"),
                    "required for online acceptance",
                ));
            }
        }
        Ok(())
    }
}

/// How the customer accepted a mandate, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomerAcceptance {
    /// Accepted offline, e.g. on a signed paper form.
    Offline {
        /// When the customer accepted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accepted_at: Option<UnixTimestamp>,
    },
    /// Accepted online.
    Online {
        /// When the customer accepted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accepted_at: Option<UnixTimestamp>,
        /// Where the acceptance came from.
        online: OnlineAcceptance,
    },
}

/// Client details of an online acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineAcceptance {
    /// IP address the acceptance came from.
    pub ip_address: String,
    /// User agent of the browser the acceptance came from.
    pub user_agent: String,
}

/// Mandate data accepted by `confirm`.
///
/// When confirming with a publishable key the client may leave the IP
/// address and user agent out; the API then infers them from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfirmMandateData {
    /// Fully described acceptance.
    Full(MandateData),
    /// Online acceptance with client details inferred by the API.
    Inferred(InferredMandateData),
}

impl ConfirmMandateData {
    /// Online acceptance whose client details are inferred by the API.
    #[must_use]
    pub const fn inferred_online() -> Self {
        Self::Inferred(InferredMandateData {
            customer_acceptance: InferredAcceptance::Online {
                online: InferredOnline {
                    ip_address: None,
                    user_agent: None,
                },
            },
        })
    }
}

impl From<MandateData> for ConfirmMandateData {
    fn from(data: MandateData) -> Self {
        Self::Full(data)
    }
}

/// Mandate data whose client details may be inferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredMandateData {
    /// How the customer accepted the mandate.
    pub customer_acceptance: InferredAcceptance,
}

/// Acceptance with optional client details, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InferredAcceptance {
    /// Accepted online.
    Online {
        /// Client details; missing fields are inferred.
        online: InferredOnline,
    },
}

/// Optional client details of an online acceptance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredOnline {
    /// IP address the acceptance came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// User agent of the browser the acceptance came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Payment-method-specific configuration sent with create or confirm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodOptionsParams {
    /// Card options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardOptionsParams>,
}

/// Card options sent with create or confirm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOptionsParams {
    /// Whether the setup is a mail-order/telephone-order transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moto: Option<bool>,

    /// 3D Secure behaviour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_three_d_secure: Option<RequestThreeDSecure>,
}

string_enum! {
    /// 3D Secure behaviour a caller may request.
    pub enum RequestThreeDSecure {
        /// Always request 3D Secure.
        Any = "any",
        /// Request it when required or available.
        Automatic = "automatic",
    }
}

/// A single-use mandate for one payment of a fixed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUse {
    /// Amount in the smallest currency unit.
    pub amount: u64,
    /// Three-letter ISO currency code, sent as given.
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form;
    use serde_json::json;

    #[test]
    fn test_online_acceptance_is_tagged() {
        let data = MandateData::online("203.0.113.7", "Mozilla/5.0");
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "customer_acceptance": {
                    "type": "online",
                    "online": { "ip_address": "203.0.113.7", "user_agent": "Mozilla/5.0" }
                }
            })
        );
    }

    #[test]
    fn test_inferred_confirm_mandate_encodes_type_only() {
        let pairs = form::encode(&json!({
            "mandate_data": ConfirmMandateData::inferred_online()
        }))
        .unwrap();
        assert_eq!(
            pairs,
            vec![(
                "mandate_data[customer_acceptance][type]".to_owned(),
                "online".to_owned()
            )]
        );
    }
}
