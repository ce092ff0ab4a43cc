//! Standard people, organizations and contexts

use attendee_model::{
    Context, Location, Membership, Organization, Person, Role, Triple, ATTENDEE_LIST_TYPE,
};

pub fn org_x() -> Organization {
    Organization::new("o-x", "OrgX")
}

pub fn org_y() -> Organization {
    Organization::new("o-y", "OrgY")
}

pub fn chair() -> Role {
    Role::new("r-chair", "Chair")
}

pub fn secretary() -> Role {
    Role::new("r-secretary", "Secretary")
}

pub fn alice() -> Person {
    Person::new("p-alice", "Alice", "Smith").with_organization(org_x())
}

pub fn bob() -> Person {
    Person::new("p-bob", "Bob", "Jones").with_organization(org_y())
}

pub fn albert() -> Person {
    Person::new("p-albert", "Albert", "King").with_organization(org_y())
}

/// Person without any membership
pub fn carol() -> Person {
    Person::new("p-carol", "Carol", "White").with_organization(org_x())
}

pub fn alice_membership() -> Membership {
    Membership::new("m-alice", alice(), chair())
}

pub fn bob_membership() -> Membership {
    Membership::new("m-bob", bob(), secretary())
}

pub fn albert_membership() -> Membership {
    Membership::new("m-albert", albert(), secretary())
}

/// Context whose last triple types `[start, end)` as an attendee list
pub fn attendee_list_context(start: usize, end: usize) -> Context {
    Context::new(
        Location::new(start, end),
        Some(String::new()),
        vec![Triple::rdf_type(
            format!("http://data.notable.redpencil.io/attendee-lists/{start}"),
            ATTENDEE_LIST_TYPE,
        )],
    )
}

/// Context annotated with something other than an attendee list
pub fn title_context(start: usize, end: usize) -> Context {
    Context::new(
        Location::new(start, end),
        Some("Agenda".to_string()),
        vec![Triple::new(
            "http://data.notable.redpencil.io/meetings/1",
            "dct:title",
            "Agenda",
        )],
    )
}
