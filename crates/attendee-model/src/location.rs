//! Document coordinates and hint-registry scoping
//!
//! Provides [`Location`] for document ranges and [`HrId`] for correlating a
//! document-change event with the hints it produced.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character range `[start, end)` in document coordinates
///
/// Serialized as a two-element array, matching the host's `[start, end]`
/// region encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Location {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Location {
    /// Create new location
    #[inline]
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if `other` lies entirely within this range
    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Location) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<[usize; 2]> for Location {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Location> for [usize; 2] {
    fn from(location: Location) -> Self {
        [location.start, location.end]
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Map a location inside a context's text back to absolute coordinates
///
/// Both bounds of `relative` are shifted by the start of `reference`.
#[inline]
#[must_use]
pub fn normalize_location(relative: Location, reference: Location) -> Location {
    Location::new(
        relative.start + reference.start,
        relative.end + reference.start,
    )
}

/// Identifier of one document-change event in the hints registry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HrId(pub String);

impl HrId {
    /// Create new hint-registry id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HrId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for HrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
