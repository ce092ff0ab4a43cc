//! Error types for the attendee list plugin
//!
//! Provides error handling for:
//! - Collaborator failures (hints registry, editor, persistence store)
//! - Card actions attempted in the wrong state
//! - Card actions attempted before their inputs are complete
//! - Configuration loading and validation

use crate::card::{CardEvent, CardStatus};
use attendee_model::Location;

/// Collaborator a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollaboratorKind {
    Registry,
    Editor,
    Store,
}

impl std::fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Registry => "hints registry",
            Self::Editor => "editor",
            Self::Store => "store",
        })
    }
}

/// Failure reported by an external collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The call reached the collaborator and failed
    #[error("{kind} {operation} failed: {message}")]
    Failed {
        kind: CollaboratorKind,
        operation: String,
        message: String,
    },

    /// A referenced entity does not exist
    #[error("{kind}: {entity} {id} not found")]
    NotFound {
        kind: CollaboratorKind,
        entity: &'static str,
        id: String,
    },

    /// No document node matched at the requested location
    #[error("editor: no matching node at {0}")]
    NoMatchingNode(Location),

    /// Collaborator could not be reached
    #[error("{kind} unavailable: {message}")]
    Unavailable {
        kind: CollaboratorKind,
        message: String,
    },
}

impl CollaboratorError {
    /// Create a failure of `operation` on `kind`
    #[inline]
    pub fn failed(
        kind: CollaboratorKind,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Failed {
            kind,
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a lookup miss for `entity` with `id`
    #[inline]
    pub fn not_found(kind: CollaboratorKind, entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            entity,
            id: id.into(),
        }
    }

    #[inline]
    pub fn unavailable(kind: CollaboratorKind, message: impl Into<String>) -> Self {
        Self::Unavailable {
            kind,
            message: message.into(),
        }
    }

    /// Collaborator that reported the failure
    #[must_use]
    pub fn kind(&self) -> CollaboratorKind {
        match self {
            Self::Failed { kind, .. }
            | Self::NotFound { kind, .. }
            | Self::Unavailable { kind, .. } => *kind,
            Self::NoMatchingNode(_) => CollaboratorKind::Editor,
        }
    }
}

/// Main plugin error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Hints registry call failed
    #[error("hints registry error: {0}")]
    Registry(#[source] CollaboratorError),

    /// Editor call failed
    #[error("editor error: {0}")]
    Editor(#[source] CollaboratorError),

    /// Persistence call failed
    #[error("persistence error: {0}")]
    Persistence(#[source] CollaboratorError),

    /// Card action not allowed in the current status
    #[error("illegal transition: {event:?} from {from:?}")]
    IllegalTransition { from: CardStatus, event: CardEvent },

    /// Card action attempted before its inputs are complete
    #[error("card not ready: {0}")]
    NotReady(&'static str),

    /// Selection referenced an id the session does not know
    #[error("unknown {kind} id: {id}")]
    UnknownEntity { kind: &'static str, id: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PluginError {
    /// Check if the user can retry the failed action as is
    ///
    /// Collaborator failures are transient from the card's point of view;
    /// the card never advances on them.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Registry(_) | Self::Editor(_) | Self::Persistence(_)
        )
    }

    /// Check if the error came from an external collaborator
    #[inline]
    #[must_use]
    pub fn is_collaborator_error(&self) -> bool {
        self.collaborator_error().is_some()
    }

    /// Underlying collaborator failure, if any
    #[must_use]
    pub fn collaborator_error(&self) -> Option<&CollaboratorError> {
        match self {
            Self::Registry(e) | Self::Editor(e) | Self::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

/// Result alias for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;
