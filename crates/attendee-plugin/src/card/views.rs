//! Derived card views
//!
//! Plain functions of their inputs, recomputed on every read.

use crate::card::attendees::AttendeeList;
use attendee_model::{render_attendee_list, Membership, Organization, Person, Role};
use std::collections::HashSet;

/// Memberships not on the list, ordered by member first name
#[must_use]
pub fn available_memberships(memberships: &[Membership], attendees: &AttendeeList) -> Vec<Membership> {
    let mut available: Vec<_> = memberships
        .iter()
        .filter(|m| !attendees.contains(&m.id))
        .cloned()
        .collect();
    sort_by_firstname(&mut available);
    available
}

/// People without any membership, ordered by first name
#[must_use]
pub fn non_member_people(people: &[Person], memberships: &[Membership]) -> Vec<Person> {
    let members: HashSet<_> = memberships.iter().map(|m| &m.member.id).collect();
    let mut loose: Vec<_> = people
        .iter()
        .filter(|p| !members.contains(&p.id))
        .cloned()
        .collect();
    loose.sort_by(|a, b| a.firstname.cmp(&b.firstname));
    loose
}

/// Attendees ordered by member first name
#[must_use]
pub fn sorted_attendees(attendees: &AttendeeList) -> Vec<Membership> {
    let mut sorted = attendees.as_slice().to_vec();
    sort_by_firstname(&mut sorted);
    sorted
}

/// Stable sort by member first name
pub fn sort_by_firstname(memberships: &mut [Membership]) {
    memberships.sort_by(|a, b| a.member.firstname.cmp(&b.member.firstname));
}

#[inline]
#[must_use]
pub fn ready_to_create_membership(person: Option<&Person>, role: Option<&Role>) -> bool {
    person.is_some() && role.is_some()
}

#[inline]
#[must_use]
pub fn ready_to_create_person(
    firstname: &str,
    lastname: &str,
    organization: Option<&Organization>,
) -> bool {
    !firstname.trim().is_empty() && !lastname.trim().is_empty() && organization.is_some()
}

/// Markup committed for the list, in first-name order
#[must_use]
pub fn inner_html(attendees: &AttendeeList) -> String {
    render_attendee_list(&sorted_attendees(attendees))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, first: &str) -> Person {
        Person::new(id, first, "X")
    }

    fn membership(id: &str, member: Person) -> Membership {
        Membership::new(id, member, Role::new("r", "Member"))
    }

    #[test]
    fn available_excludes_attendees_and_sorts() {
        let zoe = membership("m1", person("p1", "Zoe"));
        let al = membership("m2", person("p2", "Al"));
        let bo = membership("m3", person("p3", "Bo"));
        let mut attendees = AttendeeList::new();
        attendees.append(bo.clone());

        let available = available_memberships(&[zoe, al, bo], &attendees);
        let names: Vec<_> = available.iter().map(|m| m.member.firstname.as_str()).collect();
        assert_eq!(names, vec!["Al", "Zoe"]);
    }

    #[test]
    fn non_members_are_people_without_membership() {
        let people = vec![person("p1", "Zoe"), person("p2", "Al"), person("p3", "Bo")];
        let memberships = vec![membership("m1", person("p1", "Zoe"))];

        let loose = non_member_people(&people, &memberships);
        let names: Vec<_> = loose.iter().map(|p| p.firstname.as_str()).collect();
        assert_eq!(names, vec!["Al", "Bo"]);
    }

    #[test]
    fn person_readiness_reads_new_person_fields() {
        let org = Organization::new("o1", "OrgX");
        assert!(ready_to_create_person("Ann", "Lee", Some(&org)));
        assert!(!ready_to_create_person("Ann", " ", Some(&org)));
        assert!(!ready_to_create_person("", "Lee", Some(&org)));
        assert!(!ready_to_create_person("Ann", "Lee", None));
    }

    #[test]
    fn membership_readiness_needs_person_and_role() {
        let p = person("p1", "Ann");
        let r = Role::new("r1", "Chair");
        assert!(ready_to_create_membership(Some(&p), Some(&r)));
        assert!(!ready_to_create_membership(Some(&p), None));
        assert!(!ready_to_create_membership(None, Some(&r)));
    }

    #[test]
    fn inner_html_follows_first_name_order() {
        let mut attendees = AttendeeList::new();
        attendees.append(membership("m1", person("p1", "Zoe")));
        attendees.append(membership("m2", person("p2", "Al")));

        let html = inner_html(&attendees);
        let al = html.find(">Al<").unwrap();
        let zoe = html.find(">Zoe<").unwrap();
        assert!(al < zoe);
    }
}
