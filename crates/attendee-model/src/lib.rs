//! Attendee List Model
//!
//! Plain data shared by the attendee list plugin and its hosts.
//!
//! # Core Concepts
//!
//! - [`Context`]: a document span plus the ordered [`Triple`]s attached to it
//! - [`Hint`]: a relevant span and the resource a card will edit there
//! - [`Location`]: a `[start, end)` character range in document coordinates
//! - [`Membership`]: the attendee unit, linking a [`Person`] to a [`Role`]
//! - [`render_attendee_list`]: the fixed RDFa fragment written back on commit
//!
//! # Example
//!
//! ```rust,ignore
//! use attendee_model::{render_attendee_list, Membership};
//!
//! let markup = render_attendee_list(&attendees);
//! assert!(markup.starts_with("<ul>"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod entity;
mod hint;
mod location;
mod markup;
mod rdfa;

// Re-exports
pub use entity::{
    Membership, MembershipId, Organization, OrganizationId, Person, PersonId, Role, RoleId,
};
pub use hint::Hint;
pub use location::{normalize_location, HrId, Location};
pub use markup::{render_attendee_item, render_attendee_list};
pub use rdfa::{Context, Triple, ATTENDEE_LIST_TYPE, RDF_TYPE_PREDICATE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
