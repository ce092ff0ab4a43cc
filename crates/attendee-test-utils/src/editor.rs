//! Editor that records what it was asked to do

use async_trait::async_trait;
use attendee_model::Location;
use attendee_plugin::{
    CollaboratorError, CollaboratorKind, ContextMatcher, Editor, NodeUpdate, Selection,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct RecordingEditor {
    selections: Mutex<Vec<(Location, ContextMatcher)>>,
    updates: Mutex<Vec<(Selection, NodeUpdate)>>,
    fail_select: AtomicBool,
    fail_update: AtomicBool,
}

impl RecordingEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `select_context` report that no node matches
    pub fn fail_select(&self, fail: bool) {
        self.fail_select.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    /// Locations and matchers passed to `select_context`
    #[must_use]
    pub fn selections(&self) -> Vec<(Location, ContextMatcher)> {
        self.selections.lock().clone()
    }

    #[must_use]
    pub fn updates(&self) -> Vec<(Selection, NodeUpdate)> {
        self.updates.lock().clone()
    }

    /// Content written by the most recent update
    #[must_use]
    pub fn last_inner_html(&self) -> Option<String> {
        self.updates.lock().last().map(|(_, update)| match update {
            NodeUpdate::SetInnerHtml(html) => html.clone(),
        })
    }
}

#[async_trait]
impl Editor for RecordingEditor {
    async fn select_context(
        &self,
        location: Location,
        matcher: &ContextMatcher,
    ) -> Result<Selection, CollaboratorError> {
        self.selections.lock().push((location, matcher.clone()));
        if self.fail_select.load(Ordering::SeqCst) {
            return Err(CollaboratorError::NoMatchingNode(location));
        }
        Ok(Selection {
            location,
            nodes: vec![format!("node@{location}")],
        })
    }

    async fn update(&self, selection: Selection, update: NodeUpdate) -> Result<(), CollaboratorError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(CollaboratorError::failed(
                CollaboratorKind::Editor,
                "update",
                "injected failure",
            ));
        }
        self.updates.lock().push((selection, update));
        Ok(())
    }
}
