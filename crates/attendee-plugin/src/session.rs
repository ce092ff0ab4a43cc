//! Per-editor-session catalog of attendee entities
//!
//! Built once when the editor session starts and shared by every card the
//! session produces. Entities persisted by one card become visible to all.

use crate::collaborators::{AttendeeStore, MembershipQuery, PersonQuery};
use crate::config::PluginConfig;
use crate::error::{PluginError, PluginResult};
use attendee_model::{
    Membership, MembershipId, Organization, OrganizationId, Person, PersonId, Role, RoleId,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Catalog {
    memberships: IndexMap<MembershipId, Membership>,
    people: IndexMap<PersonId, Person>,
    organizations: IndexMap<OrganizationId, Organization>,
    roles: IndexMap<RoleId, Role>,
}

/// Session context: store handle plus cached catalogs
pub struct Session {
    store: Arc<dyn AttendeeStore>,
    member_include: String,
    catalog: RwLock<Catalog>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let catalog = self.catalog.read();
        f.debug_struct("Session")
            .field("member_include", &self.member_include)
            .field("memberships", &catalog.memberships.len())
            .field("people", &catalog.people.len())
            .field("organizations", &catalog.organizations.len())
            .field("roles", &catalog.roles.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with empty catalogs
    #[must_use]
    pub fn new(store: Arc<dyn AttendeeStore>, config: &PluginConfig) -> Self {
        Self {
            store,
            member_include: config.member_include.clone(),
            catalog: RwLock::new(Catalog::default()),
        }
    }

    /// Create a session and load its catalogs
    ///
    /// # Errors
    /// - `PluginError::Persistence` if any catalog query fails
    pub async fn load(store: Arc<dyn AttendeeStore>, config: &PluginConfig) -> PluginResult<Self> {
        let session = Self::new(store, config);
        session.refresh().await?;
        Ok(session)
    }

    /// Reload every catalog from the store
    ///
    /// The previous catalogs stay in place if any query fails.
    ///
    /// # Errors
    /// - `PluginError::Persistence` if any catalog query fails
    pub async fn refresh(&self) -> PluginResult<()> {
        let memberships = self
            .store
            .query_memberships(&MembershipQuery::all(self.member_include.clone()))
            .await
            .map_err(PluginError::Persistence)?;
        let mut organizations = self
            .store
            .find_all_organizations()
            .await
            .map_err(PluginError::Persistence)?;
        let people = self
            .store
            .query_people(&PersonQuery {
                include: Some("organization".to_string()),
            })
            .await
            .map_err(PluginError::Persistence)?;
        let mut roles = self
            .store
            .find_all_roles()
            .await
            .map_err(PluginError::Persistence)?;

        organizations.sort_by(|a, b| a.title.cmp(&b.title));
        roles.sort_by(|a, b| a.label.cmp(&b.label));

        let mut catalog = self.catalog.write();
        catalog.memberships = memberships.into_iter().map(|m| (m.id.clone(), m)).collect();
        catalog.people = people.into_iter().map(|p| (p.id.clone(), p)).collect();
        catalog.organizations = organizations
            .into_iter()
            .map(|o| (o.id.clone(), o))
            .collect();
        catalog.roles = roles.into_iter().map(|r| (r.id.clone(), r)).collect();

        tracing::debug!(
            memberships = catalog.memberships.len(),
            people = catalog.people.len(),
            organizations = catalog.organizations.len(),
            roles = catalog.roles.len(),
            "session catalogs loaded"
        );
        Ok(())
    }

    /// Store backing this session
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn AttendeeStore> {
        &self.store
    }

    /// Include path used for membership queries
    #[inline]
    #[must_use]
    pub fn member_include(&self) -> &str {
        &self.member_include
    }

    /// All memberships in load order
    #[must_use]
    pub fn memberships(&self) -> Vec<Membership> {
        self.catalog.read().memberships.values().cloned().collect()
    }

    /// All people in load order
    #[must_use]
    pub fn people(&self) -> Vec<Person> {
        self.catalog.read().people.values().cloned().collect()
    }

    /// All people ordered by first name
    #[must_use]
    pub fn people_sorted(&self) -> Vec<Person> {
        let mut people = self.people();
        people.sort_by(|a, b| a.firstname.cmp(&b.firstname));
        people
    }

    /// Organizations ordered by title
    #[must_use]
    pub fn organizations(&self) -> Vec<Organization> {
        self.catalog.read().organizations.values().cloned().collect()
    }

    /// Roles ordered by label
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        self.catalog.read().roles.values().cloned().collect()
    }

    #[must_use]
    pub fn membership(&self, id: &MembershipId) -> Option<Membership> {
        self.catalog.read().memberships.get(id).cloned()
    }

    #[must_use]
    pub fn person(&self, id: &PersonId) -> Option<Person> {
        self.catalog.read().people.get(id).cloned()
    }

    #[must_use]
    pub fn organization(&self, id: &OrganizationId) -> Option<Organization> {
        self.catalog.read().organizations.get(id).cloned()
    }

    #[must_use]
    pub fn role(&self, id: &RoleId) -> Option<Role> {
        self.catalog.read().roles.get(id).cloned()
    }

    /// Add a freshly persisted person
    pub fn record_person(&self, person: Person) {
        self.catalog.write().people.insert(person.id.clone(), person);
    }

    /// Add a freshly persisted membership
    ///
    /// The member is recorded too, so it stops counting as a non-member.
    pub fn record_membership(&self, membership: Membership) {
        let mut catalog = self.catalog.write();
        catalog
            .people
            .entry(membership.member.id.clone())
            .or_insert_with(|| membership.member.clone());
        catalog
            .memberships
            .insert(membership.id.clone(), membership);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::MockAttendeeStore;
    use crate::error::{CollaboratorError, CollaboratorKind};

    fn seeded_store() -> MockAttendeeStore {
        let org_b = Organization::new("o2", "Beta");
        let org_a = Organization::new("o1", "Alpha");
        let alice = Person::new("p1", "Alice", "Smith").with_organization(org_a.clone());
        let zoe = Person::new("p2", "Zoe", "Young").with_organization(org_b.clone());
        let chair = Role::new("r2", "Chair");

        let mut store = MockAttendeeStore::new();
        store
            .expect_query_memberships()
            .returning(move |_| Ok(vec![Membership::new("m1", alice.clone(), chair.clone())]));
        store
            .expect_find_all_organizations()
            .returning(move || Ok(vec![org_b.clone(), org_a.clone()]));
        store.expect_query_people().returning(move |_| {
            Ok(vec![
                zoe.clone(),
                Person::new("p1", "Alice", "Smith"),
            ])
        });
        store.expect_find_all_roles().returning(|| {
            Ok(vec![Role::new("r2", "Secretary"), Role::new("r1", "Chair")])
        });
        store
    }

    #[tokio::test]
    async fn load_sorts_organizations_and_roles() {
        let session = Session::load(Arc::new(seeded_store()), &PluginConfig::default())
            .await
            .unwrap();

        let titles: Vec<_> = session.organizations().into_iter().map(|o| o.title).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);

        let labels: Vec<_> = session.roles().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Chair", "Secretary"]);

        let first: Vec<_> = session.people_sorted().into_iter().map(|p| p.firstname).collect();
        assert_eq!(first, vec!["Alice", "Zoe"]);
    }

    #[tokio::test]
    async fn load_fails_on_store_error() {
        let mut store = MockAttendeeStore::new();
        store
            .expect_query_memberships()
            .returning(|_| {
                Err(CollaboratorError::unavailable(
                    CollaboratorKind::Store,
                    "offline",
                ))
            });

        let err = Session::load(Arc::new(store), &PluginConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::Persistence(_)));
    }

    #[tokio::test]
    async fn recorded_membership_registers_member() {
        let session = Session::new(Arc::new(MockAttendeeStore::new()), &PluginConfig::default());
        let bob = Person::new("p9", "Bob", "Jones");
        session.record_membership(Membership::new("m9", bob.clone(), Role::new("r1", "Chair")));

        assert_eq!(session.person(&bob.id), Some(bob));
        assert!(session.membership(&MembershipId::from("m9")).is_some());
    }
}
