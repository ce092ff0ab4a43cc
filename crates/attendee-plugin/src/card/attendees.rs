use attendee_model::{Membership, MembershipId};

/// Ordered attendee sequence without duplicate memberships
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendeeList {
    items: Vec<Membership>,
}

impl AttendeeList {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `membership` unless one with the same id is present
    ///
    /// Returns `true` if the list changed.
    pub fn append(&mut self, membership: Membership) -> bool {
        if self.contains(&membership.id) {
            return false;
        }
        self.items.push(membership);
        true
    }

    /// Remove the membership with `id`
    pub fn remove(&mut self, id: &MembershipId) -> Option<Membership> {
        let idx = self.items.iter().position(|m| &m.id == id)?;
        Some(self.items.remove(idx))
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &MembershipId) -> bool {
        self.items.iter().any(|m| &m.id == id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Membership] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Membership> {
        self.items.iter()
    }
}
