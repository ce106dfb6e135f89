//! List envelope and cursor pagination.
//!
//! Every `list` endpoint returns a [`List`] page ordered by creation time,
//! newest first. Further pages are requested with the `starting_after` or
//! `ending_before` cursor set to an object id from the current page.

use serde::{Deserialize, Serialize};

use crate::timestamp::UnixTimestamp;

/// Smallest accepted page size.
pub const MIN_LIMIT: u8 = 1;

/// Largest accepted page size.
pub const MAX_LIMIT: u8 = 100;

/// Page size applied by the server when `limit` is omitted.
pub const DEFAULT_LIMIT: u8 = 10;

/// One page of a list endpoint.
///
/// # JSON Format
///
/// ```json
/// {
///   "object": "list",
///   "data": [ { "id": "file_1", "object": "file" } ],
///   "has_more": false,
///   "url": "/v1/files"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    /// Always `"list"`.
    #[serde(default = "list_object")]
    pub object: String,

    /// The objects on this page, in server order.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    /// Whether more objects exist beyond this page.
    #[serde(default)]
    pub has_more: bool,

    /// The URL this list was fetched from.
    #[serde(default)]
    pub url: String,
}

fn list_object() -> String {
    "list".to_owned()
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            object: list_object(),
            data: Vec::new(),
            has_more: false,
            url: String::new(),
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the page holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of objects on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Objects that carry an identifier usable as a pagination cursor.
pub trait HasId {
    /// Returns the object's identifier.
    fn id(&self) -> &str;
}

/// List parameters that support cursor pagination.
///
/// The auto-paging stream in `stripe-http` uses this to move the cursor
/// from page to page without knowing the concrete parameter type.
pub trait Paginate {
    /// Returns the `starting_after` cursor.
    fn starting_after(&self) -> Option<&str>;

    /// Returns the `ending_before` cursor.
    fn ending_before(&self) -> Option<&str>;

    /// Replaces the `starting_after` cursor.
    fn set_starting_after(&mut self, cursor: Option<String>);

    /// Replaces the `ending_before` cursor.
    fn set_ending_before(&mut self, cursor: Option<String>);

    /// Returns the requested page size.
    fn limit(&self) -> Option<u8>;
}

/// Timestamp filter for list parameters.
///
/// Either an exact match (`created=1572953600`) or any combination of
/// bounds (`created[gte]=…&created[lt]=…`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeQuery {
    /// Exactly this timestamp.
    Exact(UnixTimestamp),
    /// Within the given bounds.
    Bounds(RangeBounds),
}

/// Bounds of a [`RangeQuery`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Strictly greater than.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<UnixTimestamp>,
    /// Greater than or equal to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<UnixTimestamp>,
    /// Strictly less than.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<UnixTimestamp>,
    /// Less than or equal to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<UnixTimestamp>,
}

impl RangeQuery {
    /// Matches timestamps at or after `ts`.
    #[must_use]
    pub fn since(ts: UnixTimestamp) -> Self {
        Self::Bounds(RangeBounds {
            gte: Some(ts),
            ..RangeBounds::default()
        })
    }

    /// Matches timestamps strictly before `ts`.
    #[must_use]
    pub fn before(ts: UnixTimestamp) -> Self {
        Self::Bounds(RangeBounds {
            lt: Some(ts),
            ..RangeBounds::default()
        })
    }

    /// Matches timestamps in the half-open interval `[from, to)`.
    #[must_use]
    pub fn between(from: UnixTimestamp, to: UnixTimestamp) -> Self {
        Self::Bounds(RangeBounds {
            gte: Some(from),
            lt: Some(to),
            ..RangeBounds::default()
        })
    }

    /// Returns `true` if `ts` satisfies the filter.
    #[must_use]
    pub fn contains(&self, ts: UnixTimestamp) -> bool {
        match self {
            Self::Exact(exact) => ts == *exact,
            Self::Bounds(b) => {
                b.gt.is_none_or(|v| ts > v)
                    && b.gte.is_none_or(|v| ts >= v)
                    && b.lt.is_none_or(|v| ts < v)
                    && b.lte.is_none_or(|v| ts <= v)
            }
        }
    }
}

impl From<UnixTimestamp> for RangeQuery {
    fn from(ts: UnixTimestamp) -> Self {
        Self::Exact(ts)
    }
}
