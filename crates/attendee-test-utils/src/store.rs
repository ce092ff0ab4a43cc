//! In-memory attendee store

use crate::fixtures;
use async_trait::async_trait;
use attendee_model::{Membership, MembershipId, Organization, Person, PersonId, Role};
use attendee_plugin::{
    AttendeeStore, CollaboratorError, CollaboratorKind, MembershipQuery, NewMembership, NewPerson,
    PersonQuery,
};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::oneshot;
use ulid::Ulid;

/// Store over plain vectors with ulid ids for created entities
///
/// Membership queries match member first names by case-insensitive prefix.
/// Writes referencing an organization or person the store does not hold
/// fail with `NotFound`.
/// A query can be held back with [`InMemoryStore::gate_query`] to control
/// the order in which concurrent responses arrive.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    organizations: RwLock<Vec<Organization>>,
    roles: RwLock<Vec<Role>>,
    people: RwLock<Vec<Person>>,
    memberships: RwLock<Vec<Membership>>,
    gates: DashMap<String, oneshot::Receiver<()>>,
    membership_queries: Mutex<Vec<MembershipQuery>>,
    fail_writes: AtomicBool,
    fail_queries: AtomicBool,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the standard fixtures
    ///
    /// Alice, Bob and Albert are members; Carol is not.
    #[must_use]
    pub fn seeded() -> Self {
        let store = Self::new();
        *store.organizations.write() = vec![fixtures::org_y(), fixtures::org_x()];
        *store.roles.write() = vec![fixtures::secretary(), fixtures::chair()];
        *store.people.write() = vec![
            fixtures::alice(),
            fixtures::bob(),
            fixtures::albert(),
            fixtures::carol(),
        ];
        *store.memberships.write() = vec![
            fixtures::alice_membership(),
            fixtures::bob_membership(),
            fixtures::albert_membership(),
        ];
        store
    }

    /// Hold membership queries for `key` until the returned sender fires
    pub fn gate_query(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.insert(key.to_string(), rx);
        tx
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn membership_queries(&self) -> Vec<MembershipQuery> {
        self.membership_queries.lock().clone()
    }

    #[must_use]
    pub fn people(&self) -> Vec<Person> {
        self.people.read().clone()
    }

    #[must_use]
    pub fn memberships(&self) -> Vec<Membership> {
        self.memberships.read().clone()
    }

    fn check_query(&self, operation: &str) -> Result<(), CollaboratorError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(CollaboratorError::unavailable(
                CollaboratorKind::Store,
                format!("{operation}: store offline"),
            ));
        }
        Ok(())
    }

    fn check_write(&self, operation: &str) -> Result<(), CollaboratorError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CollaboratorError::failed(
                CollaboratorKind::Store,
                operation,
                "save rejected",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendeeStore for InMemoryStore {
    async fn find_all_organizations(&self) -> Result<Vec<Organization>, CollaboratorError> {
        self.check_query("find organizations")?;
        Ok(self.organizations.read().clone())
    }

    async fn find_all_roles(&self) -> Result<Vec<Role>, CollaboratorError> {
        self.check_query("find roles")?;
        Ok(self.roles.read().clone())
    }

    async fn query_people(&self, _query: &PersonQuery) -> Result<Vec<Person>, CollaboratorError> {
        self.check_query("query people")?;
        Ok(self.people.read().clone())
    }

    async fn query_memberships(
        &self,
        query: &MembershipQuery,
    ) -> Result<Vec<Membership>, CollaboratorError> {
        self.membership_queries.lock().push(query.clone());

        let key = query.member_firstname.clone().unwrap_or_default();
        let gate = self.gates.remove(&key).map(|(_, rx)| rx);
        if let Some(rx) = gate {
            // A dropped sender releases the query too
            let _ = rx.await;
        }

        self.check_query("query memberships")?;
        let prefix = key.to_lowercase();
        Ok(self
            .memberships
            .read()
            .iter()
            .filter(|m| m.member.firstname.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, CollaboratorError> {
        self.check_write("create person")?;
        let org_id = &person.organization.id;
        if !self.organizations.read().iter().any(|o| &o.id == org_id) {
            return Err(CollaboratorError::not_found(
                CollaboratorKind::Store,
                "organization",
                org_id.to_string(),
            ));
        }
        let created = Person::new(
            PersonId::new(Ulid::new().to_string()),
            person.firstname,
            person.lastname,
        )
        .with_organization(person.organization);
        self.people.write().push(created.clone());
        Ok(created)
    }

    async fn create_membership(
        &self,
        membership: NewMembership,
    ) -> Result<Membership, CollaboratorError> {
        self.check_write("create membership")?;
        let member_id = &membership.member.id;
        if !self.people.read().iter().any(|p| &p.id == member_id) {
            return Err(CollaboratorError::not_found(
                CollaboratorKind::Store,
                "person",
                member_id.to_string(),
            ));
        }
        let created = Membership::new(
            MembershipId::new(Ulid::new().to_string()),
            membership.member,
            membership.role,
        );
        self.memberships.write().push(created.clone());
        Ok(created)
    }
}
