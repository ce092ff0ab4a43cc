//! Ports to the host and the persistence layer
//!
//! The plugin writes to host state only through [`HintsRegistry`] and
//! [`Editor`], and to persisted data only through [`AttendeeStore`].
//! Implementations provide their own synchronization; the plugin holds no
//! lock across these calls.

use crate::card::Card;
use crate::error::CollaboratorError;
use async_trait::async_trait;
use attendee_model::{HrId, Location, Membership, Organization, Person, Role};
use serde::{Deserialize, Serialize};

/// Registry of hint cards kept by the host editor
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HintsRegistry: Send + Sync {
    /// Remove hints registered exactly at `location`
    ///
    /// Removing where nothing is registered succeeds.
    async fn remove_hints_at_location(
        &self,
        location: Location,
        hr_id: &HrId,
        source: &str,
    ) -> Result<(), CollaboratorError>;

    /// Remove hints registered anywhere inside `region`
    async fn remove_hints_in_region(
        &self,
        region: Location,
        hr_id: &HrId,
        source: &str,
    ) -> Result<(), CollaboratorError>;

    /// Register a batch of cards, all or none
    async fn add_hints(
        &self,
        hr_id: &HrId,
        source: &str,
        cards: Vec<Card>,
    ) -> Result<(), CollaboratorError>;

    /// Map a location recorded under `hr_id` to the current document
    async fn update_location_to_current_index(
        &self,
        hr_id: &HrId,
        location: Location,
    ) -> Result<Location, CollaboratorError>;
}

/// Host editor surface used at commit time
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Editor: Send + Sync {
    /// Select the document node at `location` that satisfies `matcher`
    async fn select_context(
        &self,
        location: Location,
        matcher: &ContextMatcher,
    ) -> Result<Selection, CollaboratorError>;

    /// Apply `update` to the selected node
    async fn update(&self, selection: Selection, update: NodeUpdate)
        -> Result<(), CollaboratorError>;
}

/// Persistence of people, organizations, roles and memberships
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendeeStore: Send + Sync {
    async fn find_all_organizations(&self) -> Result<Vec<Organization>, CollaboratorError>;

    async fn find_all_roles(&self) -> Result<Vec<Role>, CollaboratorError>;

    async fn query_people(&self, query: &PersonQuery) -> Result<Vec<Person>, CollaboratorError>;

    async fn query_memberships(
        &self,
        query: &MembershipQuery,
    ) -> Result<Vec<Membership>, CollaboratorError>;

    /// Create and save a person, returning the persisted entity
    async fn create_person(&self, person: NewPerson) -> Result<Person, CollaboratorError>;

    /// Create and save a membership, returning the persisted entity
    async fn create_membership(
        &self,
        membership: NewMembership,
    ) -> Result<Membership, CollaboratorError>;
}

/// Criteria the editor uses to pick a node at a location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMatcher {
    #[serde(rename = "typeof", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl ContextMatcher {
    /// Match nodes annotated with `type_uri`
    #[inline]
    #[must_use]
    pub fn typed(type_uri: impl Into<String>) -> Self {
        Self {
            type_uri: Some(type_uri.into()),
            datatype: None,
        }
    }
}

/// Nodes selected by the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub location: Location,
    /// Host-defined node handles
    pub nodes: Vec<String>,
}

/// Mutation applied to a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeUpdate {
    /// Replace the node's inner content
    SetInnerHtml(String),
}

/// Query over people
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonQuery {
    pub include: Option<String>,
}

/// Query over memberships
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipQuery {
    /// Relationships to load with each membership
    pub include: Option<String>,
    /// Match on the member's first name
    pub member_firstname: Option<String>,
}

impl MembershipQuery {
    /// All memberships with `include` loaded
    #[inline]
    #[must_use]
    pub fn all(include: impl Into<String>) -> Self {
        Self {
            include: Some(include.into()),
            member_firstname: None,
        }
    }

    /// Restrict to members whose first name matches `firstname`
    #[inline]
    #[must_use]
    pub fn with_member_firstname(mut self, firstname: impl Into<String>) -> Self {
        self.member_firstname = Some(firstname.into());
        self
    }
}

/// Attributes of a person to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub firstname: String,
    pub lastname: String,
    pub organization: Organization,
}

/// Attributes of a membership to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub member: Person,
    pub role: Role,
}
