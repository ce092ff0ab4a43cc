//! Persisted entities: people, organizations, roles and memberships
//!
//! Identity is by id. Two values with the same id are the same entity even if
//! one of them was loaded with fewer relationships included.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create new id
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

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(
    /// Person identifier
    PersonId
);
entity_id!(
    /// Organization identifier
    OrganizationId
);
entity_id!(
    /// Role identifier
    RoleId
);
entity_id!(
    /// Membership identifier
    MembershipId
);

/// Organization a person belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub title: String,
}

impl Organization {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<OrganizationId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Role held within a membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub label: String,
}

impl Role {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<RoleId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A person that can attend a meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub organization: Option<Organization>,
}

impl Person {
    /// Create new person without an organization
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<PersonId>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            organization: None,
        }
    }

    /// With organization
    #[inline]
    #[must_use]
    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organization = Some(organization);
        self
    }

    /// Organization title, empty when the person has none
    #[inline]
    #[must_use]
    pub fn organization_title(&self) -> &str {
        self.organization.as_ref().map_or("", |o| o.title.as_str())
    }

    /// `firstname lastname organization`, skipping empty parts
    #[must_use]
    pub fn label(&self) -> String {
        [
            self.firstname.as_str(),
            self.lastname.as_str(),
            self.organization_title(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Attendee unit: a person holding a role, reaching an organization through
/// the person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub member: Person,
    pub role: Role,
}

impl Membership {
    /// Create new membership
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<MembershipId>, member: Person, role: Role) -> Self {
        Self {
            id: id.into(),
            member,
            role,
        }
    }

    /// Organization reached through the member
    #[inline]
    #[must_use]
    pub fn organization(&self) -> Option<&Organization> {
        self.member.organization.as_ref()
    }

    /// Label shown for this membership in candidate lists
    #[inline]
    #[must_use]
    pub fn label(&self) -> String {
        self.member.label()
    }

    /// Check if this membership has `person` as member
    #[inline]
    #[must_use]
    pub fn is_held_by(&self, person: &PersonId) -> bool {
        &self.member.id == person
    }
}
