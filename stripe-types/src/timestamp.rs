//! Unix timestamps as used by the API.
//!
//! Every time field on the wire (`created`, `canceled_at`, phase boundaries)
//! is an integer count of seconds since the Unix epoch. Some parameters
//! also accept the literal `"now"`, represented by [`DateOrNow`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::ops::Add;
use std::time::SystemTime;

/// Seconds since the Unix epoch (1970-01-01T00:00:00Z).
///
/// Serialized as a plain JSON integer:
///
/// ```json
/// 1572953600
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(i64);

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<u64> for UnixTimestamp {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0.saturating_add_unsigned(rhs))
    }
}

impl From<i64> for UnixTimestamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

impl UnixTimestamp {
    /// Creates a new [`UnixTimestamp`] from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    ///
    /// A clock set before the epoch yields `0`.
    #[must_use]
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
        Self(secs)
    }

    /// Returns the timestamp as raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0
    }
}

/// A date parameter that also accepts the literal `"now"`.
///
/// Used by `start_date` on schedule creation and by the `start_date`,
/// `end_date` and `trial_end` of phases passed to an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrNow {
    /// The moment the request is processed.
    Now,
    /// A fixed point in time.
    At(UnixTimestamp),
}

impl From<UnixTimestamp> for DateOrNow {
    fn from(ts: UnixTimestamp) -> Self {
        Self::At(ts)
    }
}

impl Serialize for DateOrNow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Now => serializer.serialize_str("now"),
            Self::At(ts) => serializer.serialize_i64(ts.as_secs()),
        }
    }
}

impl<'de> Deserialize<'de> for DateOrNow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Secs(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Secs(secs) => Ok(Self::At(UnixTimestamp(secs))),
            Raw::Text(s) if s == "now" => Ok(Self::Now),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a timestamp or \"now\", got {s:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_plain_integer() {
        let ts = UnixTimestamp::from_secs(1_572_953_600);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1572953600");
        let back: UnixTimestamp = serde_json::from_str("1572953600").unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_timestamp_add() {
        let ts = UnixTimestamp::from_secs(100) + 20;
        assert_eq!(ts.as_secs(), 120);
    }

    #[test]
    fn test_date_or_now_serialize() {
        assert_eq!(serde_json::to_string(&DateOrNow::Now).unwrap(), "\"now\"");
        let at = DateOrNow::At(UnixTimestamp::from_secs(42));
        assert_eq!(serde_json::to_string(&at).unwrap(), "42");
    }

    #[test]
    fn test_date_or_now_rejects_other_strings() {
        let result: Result<DateOrNow, _> = serde_json::from_str("\"tomorrow\"");
        assert!(result.is_err());
        let now: DateOrNow = serde_json::from_str("\"now\"").unwrap();
        assert_eq!(now, DateOrNow::Now);
    }
}
