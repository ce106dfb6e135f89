//! References that are either a bare identifier or the expanded object.
//!
//! Fields such as `SetupIntent.customer` come back as an identifier string
//! unless the request named them in its `expand` list, in which case the
//! full object is inlined.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::list::HasId;

/// Identifier-or-object union resolved by the `expand` request option.
///
/// # JSON Format
///
/// ```json
/// "cus_123"
/// ```
///
/// or, when expanded:
///
/// ```json
/// { "id": "cus_123", "object": "customer", "email": "jenny@example.com" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    /// The referenced object's identifier.
    Id(String),
    /// The referenced object, inlined.
    Object(Box<T>),
}

impl<T> Expandable<T> {
    /// Returns `true` if the object was inlined.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the inlined object, if any.
    #[must_use]
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Object(obj) => Some(obj),
        }
    }

    /// Consumes the reference and returns the inlined object, if any.
    #[must_use]
    pub fn into_object(self) -> Option<T> {
        match self {
            Self::Id(_) => None,
            Self::Object(obj) => Some(*obj),
        }
    }
}

impl<T: HasId> Expandable<T> {
    /// Returns the identifier whether or not the object was expanded.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Object(obj) => obj.id(),
        }
    }
}

impl<T> From<String> for Expandable<T> {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

/// Loosely-typed object for resources outside this crate's scope.
///
/// Customers, payment methods, mandates, accounts and the like are only
/// referenced from the resources modelled here. When expanded they keep
/// their identifier and type discriminator; every other field is retained
/// as raw JSON in [`ApiObject::fields`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiObject {
    /// Unique identifier for the object.
    #[serde(default)]
    pub id: String,

    /// Type discriminator (e.g. `"customer"`).
    #[serde(default)]
    pub object: String,

    /// Set to `true` when the referenced object has been deleted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,

    /// All remaining fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApiObject {
    /// Returns a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl HasId for ApiObject {
    fn id(&self) -> &str {
        &self.id
    }
}
