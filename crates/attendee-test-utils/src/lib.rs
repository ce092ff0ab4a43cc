//! Testing utilities for the attendee list workspace
//!
//! In-memory collaborators and fixtures shared by the plugin's integration
//! tests.

#![allow(missing_docs)]

pub mod editor;
pub mod fixtures;
pub mod registry;
pub mod store;

pub use editor::RecordingEditor;
pub use registry::{InMemoryRegistry, RegistryCall};
pub use store::InMemoryStore;

use attendee_plugin::{AttendeeListPlugin, PluginConfig, Session};
use std::sync::Arc;

/// Configuration with debounce disabled so searches run immediately
#[must_use]
pub fn test_config() -> PluginConfig {
    PluginConfig::new().with_search_debounce(std::time::Duration::ZERO)
}

/// Session loaded from `store` with [`test_config`]
pub async fn loaded_session(store: Arc<InMemoryStore>) -> Arc<Session> {
    Arc::new(
        Session::load(store, &test_config())
            .await
            .expect("in-memory store loads"),
    )
}

/// Plugin over a session seeded with the standard fixtures
pub async fn setup_plugin() -> (AttendeeListPlugin, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::seeded());
    let session = loaded_session(Arc::clone(&store)).await;
    let plugin = AttendeeListPlugin::new(test_config(), session).expect("test config is valid");
    (plugin, store)
}
