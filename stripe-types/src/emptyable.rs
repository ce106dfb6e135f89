//! Parameters that accept an empty string to clear a previously-set value.
//!
//! An update distinguishes three states for such a field:
//!
//! | Rust value                        | Encoded as     | Effect                 |
//! |-----------------------------------|----------------|------------------------|
//! | `None`                            | (omitted)      | leave unchanged        |
//! | `Some(Emptyable::Empty)`          | `field=`       | clear the stored value |
//! | `Some(Emptyable::Set(value))`     | `field=value`  | replace the value      |
//!
//! A set empty list (`Set(vec![])`) encodes as `field=` too, so it clears
//! the list rather than leaving it unchanged.

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parameter value or the empty-string clear sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Emptyable<T> {
    /// Clear the stored value.
    Empty,
    /// Set the value.
    Set(T),
}

impl<T> Emptyable<T> {
    /// Returns `true` for the clear sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the value, if one is set.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T> From<T> for Emptyable<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: Serialize> Serialize for Emptyable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Emptyable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Text(String),
            Value(T),
        }

        match Raw::<T>::deserialize(deserializer)? {
            Raw::Text(s) if s.is_empty() => Ok(Self::Empty),
            Raw::Text(s) => {
                T::deserialize(IntoDeserializer::<'de, D::Error>::into_deserializer(s)).map(Self::Set)
            }
            Raw::Value(value) => Ok(Self::Set(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Params {
        #[serde(skip_serializing_if = "Option::is_none")]
        tax_rates: Option<Emptyable<Vec<String>>>,
    }

    #[test]
    fn test_three_states_serialize_distinctly() {
        let absent = Params { tax_rates: None };
        let cleared = Params {
            tax_rates: Some(Emptyable::Empty),
        };
        let set = Params {
            tax_rates: Some(vec!["txr_1".to_owned()].into()),
        };
        assert_eq!(serde_json::to_value(&absent).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(&cleared).unwrap(), json!({ "tax_rates": "" }));
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({ "tax_rates": ["txr_1"] })
        );
    }

    #[test]
    fn test_set_empty_list_clears() {
        let params = Params {
            tax_rates: Some(Emptyable::Set(Vec::new())),
        };
        assert_eq!(
            crate::form::encode(&params).unwrap(),
            vec![("tax_rates".to_owned(), String::new())]
        );
    }

    #[test]
    fn test_deserialize_empty_string() {
        let value: Emptyable<Vec<String>> = serde_json::from_value(json!("")).unwrap();
        assert!(value.is_empty());
        let value: Emptyable<Vec<String>> = serde_json::from_value(json!(["a"])).unwrap();
        assert_eq!(value.as_set().unwrap(), &vec!["a".to_owned()]);
    }
}
