//! Plugin configuration
//!
//! Loaded once per editor session, either from defaults or from a TOML file.

use crate::card::CardStatus;
use crate::error::{PluginError, PluginResult};
use attendee_model::ATTENDEE_LIST_TYPE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Source identity the plugin registers its hints under
pub const DEFAULT_SOURCE: &str = "editor-plugins/attendee-list-card";

/// Relationships loaded alongside memberships
pub const DEFAULT_MEMBER_INCLUDE: &str = "member,member.organization";

/// Attendee list plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Source identity scoping every registry call
    pub source: String,
    /// Type URI a context must carry to be relevant
    pub attendee_list_type: String,
    /// Status new cards start in
    pub initial_status: CardStatus,
    /// Quiet period before a candidate search is issued, 0 disables
    pub search_debounce_ms: u64,
    /// Include path used for membership queries
    pub member_include: String,
    /// Default tracing filter for hosts that install a subscriber
    pub log_filter: String,
}

impl PluginConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With initial card status
    #[inline]
    #[must_use]
    pub fn with_initial_status(mut self, status: CardStatus) -> Self {
        self.initial_status = status;
        self
    }

    /// With search debounce
    #[inline]
    #[must_use]
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With source identity
    #[inline]
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Search debounce as a duration
    #[inline]
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// - `PluginError::Config` if the document does not parse or fails validation
    pub fn from_toml_str(raw: &str) -> PluginResult<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| PluginError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// - `PluginError::Config` if the file cannot be read or is invalid
    pub fn load(path: impl AsRef<Path>) -> PluginResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PluginError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Serialize as TOML
    ///
    /// # Errors
    /// - `PluginError::Config` if serialization fails
    pub fn to_toml_string(&self) -> PluginResult<String> {
        toml::to_string_pretty(self).map_err(|e| PluginError::Config(e.to_string()))
    }

    /// Check invariants the rest of the plugin relies on
    ///
    /// # Errors
    /// - `PluginError::Config` on empty source or type URI
    /// - `PluginError::Config` if cards would start outside Selecting/Editing
    pub fn validate(&self) -> PluginResult<()> {
        if self.source.trim().is_empty() {
            return Err(PluginError::Config("source must not be empty".into()));
        }
        if self.attendee_list_type.trim().is_empty() {
            return Err(PluginError::Config(
                "attendee_list_type must not be empty".into(),
            ));
        }
        if !matches!(
            self.initial_status,
            CardStatus::Selecting | CardStatus::Editing
        ) {
            return Err(PluginError::Config(format!(
                "initial_status must be Selecting or Editing, got {:?}",
                self.initial_status
            )));
        }
        Ok(())
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            attendee_list_type: ATTENDEE_LIST_TYPE.to_string(),
            initial_status: CardStatus::Selecting,
            search_debounce_ms: 150,
            member_include: DEFAULT_MEMBER_INCLUDE.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = PluginConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.initial_status, CardStatus::Selecting);
        assert_eq!(config.search_debounce(), Duration::from_millis(150));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PluginConfig::from_toml_str(
            r#"
            initial_status = "Editing"
            search_debounce_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.initial_status, CardStatus::Editing);
        assert_eq!(config.search_debounce(), Duration::ZERO);
        assert_eq!(config.attendee_list_type, ATTENDEE_LIST_TYPE);
    }

    #[test]
    fn rejects_creation_status_as_initial() {
        let err = PluginConfig::from_toml_str(r#"initial_status = "CreatingPerson""#).unwrap_err();
        assert!(matches!(err, PluginError::Config(_)));
    }

    #[test]
    fn rejects_empty_source() {
        let err = PluginConfig::new().with_source("  ").validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn load_from_file_round_trips() {
        let config = PluginConfig::new().with_search_debounce(Duration::from_millis(40));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let loaded = PluginConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = PluginConfig::load("/nonexistent/attendee-list.toml").unwrap_err();
        assert!(matches!(err, PluginError::Config(_)));
    }
}
