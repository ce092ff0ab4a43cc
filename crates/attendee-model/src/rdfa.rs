//! RDFa contexts as delivered by the host's triple extraction

use crate::location::Location;
use serde::{Deserialize, Serialize};

/// Predicate used for `rdf:type` statements in extracted contexts
pub const RDF_TYPE_PREDICATE: &str = "a";

/// Type URI marking an attendee list region
pub const ATTENDEE_LIST_TYPE: &str = "http://data.notable.redpencil.io/#AttendeeList";

/// Structured statement attached to a document region
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    /// Create new triple
    #[inline]
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// `rdf:type` statement for `subject`
    #[inline]
    #[must_use]
    pub fn rdf_type(subject: impl Into<String>, object: impl Into<String>) -> Self {
        Self::new(subject, RDF_TYPE_PREDICATE, object)
    }

    /// Check if this is an `rdf:type` statement with the given object
    #[inline]
    #[must_use]
    pub fn is_type(&self, type_uri: &str) -> bool {
        self.predicate == RDF_TYPE_PREDICATE && self.object == type_uri
    }
}

/// Document span plus the ordered statements attached to it
///
/// The host serializes the statements under `context`; `triples` is accepted
/// as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub region: Location,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "context")]
    pub triples: Vec<Triple>,
}

impl Context {
    /// Create new context
    #[inline]
    #[must_use]
    pub fn new(region: Location, text: Option<String>, triples: Vec<Triple>) -> Self {
        Self {
            region,
            text,
            triples,
        }
    }

    /// Innermost statement, the one closest to the span
    #[inline]
    #[must_use]
    pub fn last_triple(&self) -> Option<&Triple> {
        self.triples.last()
    }
}
