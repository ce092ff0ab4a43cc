//! Plugin entry point
//!
//! The host calls [`AttendeeListPlugin::execute`] after every document
//! change. A pass clears the hints a previous pass left in each relevant
//! region, builds one card per relevant context and registers the batch in
//! a single call, so repeated passes over an unchanged document leave the
//! registry unchanged.

use crate::card::{Card, CardInfo};
use crate::collaborators::{Editor, HintsRegistry};
use crate::config::PluginConfig;
use crate::error::{PluginError, PluginResult};
use crate::scanner;
use crate::session::Session;
use attendee_model::{Context, Hint, HrId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Summary of one execute pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteReport {
    /// Contexts that carried the attendee list annotation
    pub relevant_contexts: usize,
    /// Cards handed to the registry
    pub cards_registered: usize,
}

/// Attendee list plugin bound to one editor session
#[derive(Debug, Clone)]
pub struct AttendeeListPlugin {
    config: PluginConfig,
    session: Arc<Session>,
}

impl AttendeeListPlugin {
    /// Create plugin for `session`
    ///
    /// # Errors
    /// - `PluginError::Config` if `config` does not validate
    pub fn new(config: PluginConfig, session: Arc<Session>) -> PluginResult<Self> {
        config.validate()?;
        Ok(Self { config, session })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Source identity every registry call is scoped to
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.config.source
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Check if `context` is an attendee list annotation
    #[must_use]
    pub fn detect_relevant_context(&self, context: &Context) -> bool {
        scanner::is_relevant(context, &self.config.attendee_list_type)
    }

    /// Hints for the relevant `contexts`
    #[must_use]
    pub fn generate_hints(&self, contexts: &[Context]) -> Vec<Hint> {
        scanner::generate_hints(contexts, &self.config.attendee_list_type)
    }

    /// Build the card for `hint`
    #[must_use]
    pub fn generate_card(
        &self,
        hr_id: &HrId,
        hint: Hint,
        registry: Arc<dyn HintsRegistry>,
        editor: Arc<dyn Editor>,
    ) -> Card {
        let info = CardInfo {
            hr_id: hr_id.clone(),
            label: self.config.source.clone(),
            location: hint.location,
            plain_value: hint.text,
            type_uri: self.config.attendee_list_type.clone(),
            resource: hint.resource,
            context: hint.context,
        };
        Card::new(info, registry, editor, Arc::clone(&self.session), &self.config)
    }

    /// Scan `contexts` and register one card per attendee list
    ///
    /// Any registry failure aborts the pass. Cards are only registered by the
    /// final batch call, so an aborted pass registers nothing.
    ///
    /// # Errors
    /// - `PluginError::Registry` if clearing or registering hints fails
    pub async fn execute(
        &self,
        hr_id: &HrId,
        contexts: &[Context],
        registry: Arc<dyn HintsRegistry>,
        editor: Arc<dyn Editor>,
    ) -> PluginResult<ExecuteReport> {
        let source = self.source();
        let relevant: Vec<&Context> = contexts
            .iter()
            .filter(|context| self.detect_relevant_context(context))
            .collect();

        for context in &relevant {
            registry
                .remove_hints_in_region(context.region, hr_id, source)
                .await
                .map_err(PluginError::Registry)?;
        }

        let cards: Vec<Card> = relevant
            .iter()
            .filter_map(|context| scanner::generate_hint(context))
            .map(|hint| self.generate_card(hr_id, hint, Arc::clone(&registry), Arc::clone(&editor)))
            .collect();

        let report = ExecuteReport {
            relevant_contexts: relevant.len(),
            cards_registered: cards.len(),
        };

        if !cards.is_empty() {
            registry
                .add_hints(hr_id, source, cards)
                .await
                .map_err(PluginError::Registry)?;
        }

        tracing::debug!(
            hr_id = %hr_id,
            contexts = contexts.len(),
            relevant = report.relevant_contexts,
            registered = report.cards_registered,
            "execute pass finished"
        );
        Ok(report)
    }
}
