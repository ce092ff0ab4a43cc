//! Attendee list card
//!
//! One card per hint. The card owns the attendee list being edited, the
//! selection fields of the creation sub-flows and the status that decides
//! which actions are accepted.
//!
//! # Flow
//! 1. `Selecting`: pick an existing membership, list becomes non-empty
//! 2. `Editing`: review, remove, request an addition or commit
//! 3. `Adding`: pick another membership, choose an existing person, or
//!    report that nobody matches
//! 4. `CreatingPerson` → `CreatingMembership` → `Editing`, each step waiting
//!    for the store to save before advancing

mod attendees;
mod commit;
pub mod status;
pub mod views;

pub use attendees::AttendeeList;
pub use commit::CommitOutcome;
pub use status::{CardEvent, CardStatus, StatusFlags};

use crate::collaborators::{Editor, HintsRegistry, NewMembership, NewPerson};
use crate::config::PluginConfig;
use crate::error::{PluginError, PluginResult};
use crate::search::{CandidateSearch, SearchOutcome};
use crate::session::Session;
use attendee_model::{
    Context, HrId, Location, Membership, MembershipId, Organization, OrganizationId, Person,
    PersonId, Role, RoleId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Descriptive data a card carries about the region it edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub hr_id: HrId,
    /// Source identity the card's hints are registered under
    pub label: String,
    /// Region at scan time
    pub location: Location,
    /// Text of the region at scan time
    pub plain_value: String,
    /// Annotation type the region must still carry at commit time
    pub type_uri: String,
    pub resource: String,
    pub context: Context,
}

/// Interactive attendee list card
pub struct Card {
    info: CardInfo,
    registry: Arc<dyn HintsRegistry>,
    editor: Arc<dyn Editor>,
    session: Arc<Session>,
    search: CandidateSearch,
    status: CardStatus,
    attendees: AttendeeList,
    selected_person: Option<Person>,
    selected_role: Option<Role>,
    selected_organization: Option<Organization>,
    selected_membership: Option<Membership>,
    new_firstname: String,
    new_lastname: String,
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("info", &self.info)
            .field("status", &self.status)
            .field("attendees", &self.attendees)
            .field("selected_person", &self.selected_person)
            .field("selected_role", &self.selected_role)
            .field("selected_organization", &self.selected_organization)
            .field("new_firstname", &self.new_firstname)
            .field("new_lastname", &self.new_lastname)
            .finish_non_exhaustive()
    }
}

impl Card {
    /// Create new card in the configured initial status with no attendees
    #[must_use]
    pub fn new(
        info: CardInfo,
        registry: Arc<dyn HintsRegistry>,
        editor: Arc<dyn Editor>,
        session: Arc<Session>,
        config: &PluginConfig,
    ) -> Self {
        let search = CandidateSearch::new(
            Arc::clone(session.store()),
            session.member_include(),
            config.search_debounce(),
        );
        Self {
            info,
            registry,
            editor,
            session,
            search,
            status: config.initial_status,
            attendees: AttendeeList::new(),
            selected_person: None,
            selected_role: None,
            selected_organization: None,
            selected_membership: None,
            new_firstname: String::new(),
            new_lastname: String::new(),
        }
    }

    // -- accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn info(&self) -> &CardInfo {
        &self.info
    }

    #[inline]
    #[must_use]
    pub fn hr_id(&self) -> &HrId {
        &self.info.hr_id
    }

    /// Region at scan time, not remapped
    #[inline]
    #[must_use]
    pub fn location(&self) -> Location {
        self.info.location
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> CardStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> StatusFlags {
        StatusFlags::from(self.status)
    }

    /// Attendees in the order they were added
    #[inline]
    #[must_use]
    pub fn attendees(&self) -> &[Membership] {
        self.attendees.as_slice()
    }

    #[inline]
    #[must_use]
    pub fn selected_person(&self) -> Option<&Person> {
        self.selected_person.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn selected_role(&self) -> Option<&Role> {
        self.selected_role.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn selected_organization(&self) -> Option<&Organization> {
        self.selected_organization.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn selected_membership(&self) -> Option<&Membership> {
        self.selected_membership.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn new_firstname(&self) -> &str {
        &self.new_firstname
    }

    #[inline]
    #[must_use]
    pub fn new_lastname(&self) -> &str {
        &self.new_lastname
    }

    /// Session the card draws its catalogs from
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Search handle, clonable for concurrent input events
    #[inline]
    #[must_use]
    pub fn candidate_search(&self) -> &CandidateSearch {
        &self.search
    }

    // -- derived views -----------------------------------------------------

    #[must_use]
    pub fn candidates(&self) -> Vec<Membership> {
        self.search.candidates()
    }

    #[must_use]
    pub fn available_memberships(&self) -> Vec<Membership> {
        views::available_memberships(&self.session.memberships(), &self.attendees)
    }

    #[must_use]
    pub fn non_member_people(&self) -> Vec<Person> {
        views::non_member_people(&self.session.people(), &self.session.memberships())
    }

    #[must_use]
    pub fn sorted_attendees(&self) -> Vec<Membership> {
        views::sorted_attendees(&self.attendees)
    }

    #[must_use]
    pub fn ready_to_create_membership(&self) -> bool {
        views::ready_to_create_membership(
            self.selected_person.as_ref(),
            self.selected_role.as_ref(),
        )
    }

    #[must_use]
    pub fn ready_to_create_person(&self) -> bool {
        views::ready_to_create_person(
            &self.new_firstname,
            &self.new_lastname,
            self.selected_organization.as_ref(),
        )
    }

    /// Markup the next commit would write
    #[must_use]
    pub fn inner_html(&self) -> String {
        views::inner_html(&self.attendees)
    }

    // -- status ------------------------------------------------------------

    /// Sole status mutator
    ///
    /// Candidates belong to the mode that searched for them, so any status
    /// change drops them.
    fn set_status(&mut self, target: CardStatus) {
        if self.status != target {
            self.search.reset();
            tracing::debug!(
                hr_id = %self.info.hr_id,
                from = ?self.status,
                to = ?target,
                "card status changed"
            );
        }
        self.status = target;
    }

    fn transition(&mut self, event: CardEvent) -> PluginResult<()> {
        let target = status::validate_transition(self.status, event)?;
        self.set_status(target);
        Ok(())
    }

    fn ensure_accepts(&self, event: CardEvent) -> PluginResult<()> {
        status::validate_transition(self.status, event).map(|_| ())
    }

    fn clear_selection(&mut self) {
        self.selected_person = None;
        self.selected_role = None;
        self.selected_organization = None;
        self.new_firstname.clear();
        self.new_lastname.clear();
    }

    // -- actions -----------------------------------------------------------

    /// Pick an existing membership and return to the list
    ///
    /// # Errors
    /// - `PluginError::IllegalTransition` outside Selecting/Adding
    pub fn pick_membership(&mut self, membership: Membership) -> PluginResult<()> {
        self.ensure_accepts(CardEvent::PickMembership)?;
        self.selected_membership = Some(membership.clone());
        self.attendees.append(membership);
        self.clear_selection();
        self.transition(CardEvent::PickMembership)
    }

    /// [`Card::pick_membership`] by id, resolved against the session
    ///
    /// # Errors
    /// - `PluginError::UnknownEntity` if the session has no such membership
    /// - `PluginError::IllegalTransition` outside Selecting/Adding
    pub fn pick_membership_by_id(&mut self, id: &MembershipId) -> PluginResult<()> {
        let membership = self
            .session
            .membership(id)
            .or_else(|| self.search.candidates().into_iter().find(|m| &m.id == id))
            .ok_or_else(|| PluginError::UnknownEntity {
                kind: "membership",
                id: id.to_string(),
            })?;
        self.pick_membership(membership)
    }

    /// Start looking for a new attendee
    ///
    /// # Errors
    /// - `PluginError::IllegalTransition` outside Editing
    pub fn request_add(&mut self) -> PluginResult<()> {
        self.transition(CardEvent::RequestAdd)
    }

    /// Choose an existing person to become a member, optionally with a role
    ///
    /// # Errors
    /// - `PluginError::IllegalTransition` outside Adding
    pub fn choose_existing_person(&mut self, person: Person, role: Option<Role>) -> PluginResult<()> {
        self.ensure_accepts(CardEvent::ChoosePerson)?;
        self.selected_organization = person.organization.clone();
        self.selected_person = Some(person);
        self.selected_role = role;
        self.transition(CardEvent::ChoosePerson)
    }

    /// Nobody matches; switch to entering a new person
    ///
    /// # Errors
    /// - `PluginError::IllegalTransition` outside Adding
    pub fn no_matching_person(&mut self) -> PluginResult<()> {
        self.transition(CardEvent::NoMatchingPerson)
    }

    pub fn set_new_firstname(&mut self, firstname: impl Into<String>) {
        self.new_firstname = firstname.into();
    }

    pub fn set_new_lastname(&mut self, lastname: impl Into<String>) {
        self.new_lastname = lastname.into();
    }

    /// Select the person with `id`
    ///
    /// # Errors
    /// - `PluginError::UnknownEntity` if the session has no such person
    pub fn select_person(&mut self, id: &PersonId) -> PluginResult<()> {
        let person = self.session.person(id).ok_or_else(|| PluginError::UnknownEntity {
            kind: "person",
            id: id.to_string(),
        })?;
        self.selected_person = Some(person);
        Ok(())
    }

    /// Select the role with `id`
    ///
    /// # Errors
    /// - `PluginError::UnknownEntity` if the session has no such role
    pub fn select_role(&mut self, id: &RoleId) -> PluginResult<()> {
        let role = self.session.role(id).ok_or_else(|| PluginError::UnknownEntity {
            kind: "role",
            id: id.to_string(),
        })?;
        self.selected_role = Some(role);
        Ok(())
    }

    /// Select the organization with `id`
    ///
    /// # Errors
    /// - `PluginError::UnknownEntity` if the session has no such organization
    pub fn select_organization(&mut self, id: &OrganizationId) -> PluginResult<()> {
        let organization =
            self.session
                .organization(id)
                .ok_or_else(|| PluginError::UnknownEntity {
                    kind: "organization",
                    id: id.to_string(),
                })?;
        self.selected_organization = Some(organization);
        Ok(())
    }

    /// Save the new person and continue to choosing a role
    ///
    /// The card keeps its status and inputs if the save fails.
    ///
    /// # Errors
    /// - `PluginError::IllegalTransition` outside CreatingPerson
    /// - `PluginError::NotReady` if name or organization is missing
    /// - `PluginError::Persistence` if the store rejects the save
    pub async fn create_person(&mut self) -> PluginResult<Person> {
        self.ensure_accepts(CardEvent::PersonPersisted)?;
        let organization = match (&self.selected_organization, self.ready_to_create_person()) {
            (Some(org), true) => org.clone(),
            _ => return Err(PluginError::NotReady("first name, last name and organization")),
        };

        let person = self
            .session
            .store()
            .create_person(NewPerson {
                firstname: self.new_firstname.trim().to_string(),
                lastname: self.new_lastname.trim().to_string(),
                organization,
            })
            .await
            .map_err(PluginError::Persistence)?;

        tracing::info!(hr_id = %self.info.hr_id, person = %person.id, "person created");
        self.session.record_person(person.clone());
        self.new_firstname.clear();
        self.new_lastname.clear();
        self.selected_person = Some(person.clone());
        self.transition(CardEvent::PersonPersisted)?;
        Ok(person)
    }

    /// Save the membership for the selected person and role and add it
    ///
    /// The card keeps its status and selection if the save fails.
    ///
    /// # Errors
    /// - `PluginError::IllegalTransition` outside CreatingMembership
    /// - `PluginError::NotReady` if person or role is missing
    /// - `PluginError::Persistence` if the store rejects the save
    pub async fn create_membership(&mut self) -> PluginResult<Membership> {
        self.ensure_accepts(CardEvent::MembershipPersisted)?;
        let (member, role) = match (&self.selected_person, &self.selected_role) {
            (Some(person), Some(role)) => (person.clone(), role.clone()),
            _ => return Err(PluginError::NotReady("person and role")),
        };

        let membership = self
            .session
            .store()
            .create_membership(NewMembership { member, role })
            .await
            .map_err(PluginError::Persistence)?;

        tracing::info!(
            hr_id = %self.info.hr_id,
            membership = %membership.id,
            "membership created"
        );
        self.session.record_membership(membership.clone());
        self.selected_membership = Some(membership.clone());
        self.attendees.append(membership.clone());
        self.clear_selection();
        self.transition(CardEvent::MembershipPersisted)?;
        Ok(membership)
    }

    /// Remove an attendee; allowed in every status
    pub fn remove_attendee(&mut self, id: &MembershipId) -> Option<Membership> {
        let removed = self.attendees.remove(id);
        if removed.is_some() && self.selected_membership.as_ref().is_some_and(|m| &m.id == id) {
            self.selected_membership = None;
        }
        removed
    }

    /// Leave a creation sub-flow or Adding
    ///
    /// Returns to Editing when the card has attendees and to Selecting
    /// otherwise. No-op in Selecting and Editing.
    pub fn cancel(&mut self) {
        if matches!(self.status, CardStatus::Selecting | CardStatus::Editing) {
            return;
        }
        self.clear_selection();
        let target = if self.attendees.is_empty() {
            CardStatus::Selecting
        } else {
            CardStatus::Editing
        };
        self.set_status(target);
    }

    /// Search candidates for the raw input of a Selecting/Adding card
    ///
    /// Ignored in every other status.
    pub async fn search_candidates(&self, input: &str) -> SearchOutcome {
        if !self.status.takes_candidates() {
            return SearchOutcome::Ignored;
        }
        self.search.search(input).await
    }
}
