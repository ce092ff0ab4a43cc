//! Attendee List Plugin
//!
//! Editor plugin that finds attendee list annotations in a document and
//! offers an interactive card to edit each one:
//! - Scans contexts for the attendee list type
//! - Registers one card per list with the host's hints registry
//! - Drives the card through picking, adding and creating attendees
//! - Writes the finished list back into the document as RDFa markup
//!
//! # Example
//!
//! ```rust,ignore
//! use attendee_plugin::prelude::*;
//!
//! # async fn example(store: Arc<dyn AttendeeStore>, registry: Arc<dyn HintsRegistry>, editor: Arc<dyn Editor>) -> PluginResult<()> {
//! let config = PluginConfig::new();
//! let session = Arc::new(Session::load(store, &config).await?);
//! let plugin = AttendeeListPlugin::new(config, session)?;
//!
//! let report = plugin.execute(&hr_id, &contexts, registry, editor).await?;
//! println!("registered {} cards", report.cards_registered);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod card;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod plugin;
pub mod scanner;
pub mod search;
pub mod session;

pub use attendee_model as model;

// Re-exports for convenience
pub use card::status::{allowed_events, next_status, validate_transition};
pub use card::{AttendeeList, Card, CardEvent, CardInfo, CardStatus, CommitOutcome, StatusFlags};
pub use collaborators::{
    AttendeeStore, ContextMatcher, Editor, HintsRegistry, MembershipQuery, NewMembership,
    NewPerson, NodeUpdate, PersonQuery, Selection,
};
pub use config::{PluginConfig, DEFAULT_MEMBER_INCLUDE, DEFAULT_SOURCE};
pub use error::{CollaboratorError, CollaboratorKind, PluginError, PluginResult};
pub use plugin::{AttendeeListPlugin, ExecuteReport};
pub use search::{search_key, CandidateSearch, SearchOutcome};
pub use session::Session;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the attendee list plugin
    pub use crate::{
        AttendeeListPlugin, AttendeeStore, Card, CardStatus, CommitOutcome, Editor,
        ExecuteReport, HintsRegistry, PluginConfig, PluginError, PluginResult, Session,
    };
    pub use attendee_model::{Context, HrId, Location, Membership};
    pub use std::sync::Arc;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
