//! Card status and the transition table
//!
//! The status is a single enum value, so exactly one mode is active at any
//! time. [`StatusFlags`] is the boolean view hosts bind their templates to.

use crate::error::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};

/// Interaction mode of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Browsing existing memberships to pick one
    Selecting,
    /// Reviewing the populated list
    Editing,
    /// Looking for someone not yet on the list
    Adding,
    /// Choosing a role for an existing person
    CreatingMembership,
    /// Entering a person that does not exist yet
    CreatingPerson,
}

impl CardStatus {
    /// Every status, in declaration order
    pub const ALL: [CardStatus; 5] = [
        CardStatus::Selecting,
        CardStatus::Editing,
        CardStatus::Adding,
        CardStatus::CreatingMembership,
        CardStatus::CreatingPerson,
    ];

    /// Check if candidate search results feed this mode
    #[inline]
    #[must_use]
    pub fn takes_candidates(&self) -> bool {
        matches!(self, Self::Selecting | Self::Adding)
    }

    /// Check if this is one of the creation sub-flows
    #[inline]
    #[must_use]
    pub fn is_creating(&self) -> bool {
        matches!(self, Self::CreatingMembership | Self::CreatingPerson)
    }
}

/// User or persistence event driving a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEvent {
    /// An existing membership was picked
    PickMembership,
    /// User asked to add someone
    RequestAdd,
    /// An existing person was chosen to become a member
    ChoosePerson,
    /// The new membership was saved
    MembershipPersisted,
    /// No person matches; create one
    NoMatchingPerson,
    /// The new person was saved
    PersonPersisted,
    /// Write the list into the document
    Commit,
}

/// Status reached by applying `event` in `from`, if allowed
#[must_use]
pub fn next_status(from: CardStatus, event: CardEvent) -> Option<CardStatus> {
    use CardEvent::*;
    use CardStatus::*;
    match (from, event) {
        (Selecting | Adding, PickMembership) => Some(Editing),
        (Editing, RequestAdd) => Some(Adding),
        (Adding, ChoosePerson) => Some(CreatingMembership),
        (CreatingMembership, MembershipPersisted) => Some(Editing),
        (Adding, NoMatchingPerson) => Some(CreatingPerson),
        (CreatingPerson, PersonPersisted) => Some(CreatingMembership),
        (Editing, Commit) => Some(Editing),
        _ => None,
    }
}

/// Events accepted in `from`
#[must_use]
pub fn allowed_events(from: CardStatus) -> Vec<CardEvent> {
    use CardEvent::*;
    [
        PickMembership,
        RequestAdd,
        ChoosePerson,
        MembershipPersisted,
        NoMatchingPerson,
        PersonPersisted,
        Commit,
    ]
    .into_iter()
    .filter(|event| next_status(from, *event).is_some())
    .collect()
}

/// Validate `event` in `from` and return the target status
///
/// # Errors
/// - `PluginError::IllegalTransition` if the table has no entry
pub fn validate_transition(from: CardStatus, event: CardEvent) -> PluginResult<CardStatus> {
    next_status(from, event).ok_or(PluginError::IllegalTransition { from, event })
}

/// Boolean view of a status, one flag per mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct StatusFlags {
    pub is_selecting: bool,
    pub is_editing: bool,
    pub is_adding: bool,
    pub is_creating_membership: bool,
    pub is_creating_person: bool,
}

impl StatusFlags {
    /// Number of flags set
    #[must_use]
    pub fn true_count(&self) -> usize {
        [
            self.is_selecting,
            self.is_editing,
            self.is_adding,
            self.is_creating_membership,
            self.is_creating_person,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }
}

impl From<CardStatus> for StatusFlags {
    fn from(status: CardStatus) -> Self {
        Self {
            is_selecting: status == CardStatus::Selecting,
            is_editing: status == CardStatus::Editing,
            is_adding: status == CardStatus::Adding,
            is_creating_membership: status == CardStatus::CreatingMembership,
            is_creating_person: status == CardStatus::CreatingPerson,
        }
    }
}
