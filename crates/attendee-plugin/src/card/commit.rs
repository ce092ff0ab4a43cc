use super::{Card, CardEvent, CardStatus};
use crate::collaborators::{ContextMatcher, NodeUpdate};
use crate::error::{PluginError, PluginResult};
use attendee_model::Location;

/// Result of [`Card::commit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The list markup was written at `mapped_location`
    Committed {
        mapped_location: Location,
        markup: String,
    },
    /// The card was not in Editing; nothing was touched
    Skipped { status: CardStatus },
}

impl CommitOutcome {
    #[inline]
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

impl Card {
    /// Write the attendee list into the document
    ///
    /// Only an Editing card commits. The scan-time location is remapped to
    /// the current document first; hints at the remapped location are
    /// removed, the node there carrying the card's type is selected and its
    /// content replaced, then the hint at the original location is removed.
    /// A failing step stops the sequence and the card stays in Editing.
    ///
    /// # Errors
    /// - `PluginError::Registry` if a registry call fails
    /// - `PluginError::Editor` if selecting or updating the node fails
    pub async fn commit(&self) -> PluginResult<CommitOutcome> {
        if super::status::next_status(self.status, CardEvent::Commit).is_none() {
            tracing::debug!(hr_id = %self.info.hr_id, status = ?self.status, "commit skipped");
            return Ok(CommitOutcome::Skipped {
                status: self.status,
            });
        }

        let markup = self.inner_html();
        let hr_id = &self.info.hr_id;
        let source = self.info.label.as_str();
        let original = self.info.location;

        let mapped = self
            .registry
            .update_location_to_current_index(hr_id, original)
            .await
            .map_err(PluginError::Registry)?;
        self.registry
            .remove_hints_at_location(mapped, hr_id, source)
            .await
            .map_err(PluginError::Registry)?;

        let selection = self
            .editor
            .select_context(mapped, &ContextMatcher::typed(self.info.type_uri.clone()))
            .await
            .map_err(PluginError::Editor)?;
        self.editor
            .update(selection, NodeUpdate::SetInnerHtml(markup.clone()))
            .await
            .map_err(PluginError::Editor)?;

        self.registry
            .remove_hints_at_location(original, hr_id, source)
            .await
            .map_err(PluginError::Registry)?;

        self.search.supersede();
        tracing::info!(
            hr_id = %hr_id,
            original = %original,
            mapped = %mapped,
            attendees = self.attendees.len(),
            "attendee list committed"
        );
        Ok(CommitOutcome::Committed {
            mapped_location: mapped,
            markup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::CardInfo;
    use super::*;
    use crate::collaborators::{MockAttendeeStore, MockEditor, MockHintsRegistry, Selection};
    use crate::config::PluginConfig;
    use crate::error::CollaboratorError;
    use crate::session::Session;
    use attendee_model::{
        Context, HrId, Membership, Organization, Person, Role, Triple, ATTENDEE_LIST_TYPE,
    };
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::sync::Arc;

    fn info() -> CardInfo {
        let context = Context::new(
            Location::new(10, 20),
            None,
            vec![Triple::rdf_type("http://data/attendees/1", ATTENDEE_LIST_TYPE)],
        );
        CardInfo {
            hr_id: HrId::from("hr-1"),
            label: "editor-plugins/attendee-list-card".to_string(),
            location: context.region,
            plain_value: String::new(),
            type_uri: ATTENDEE_LIST_TYPE.to_string(),
            resource: "http://data/attendees/1".to_string(),
            context,
        }
    }

    fn membership(id: &str, first: &str, last: &str, org: &str) -> Membership {
        Membership::new(
            id,
            Person::new(format!("p-{id}"), first, last)
                .with_organization(Organization::new(format!("o-{org}"), org)),
            Role::new("r1", "Member"),
        )
    }

    fn card(registry: MockHintsRegistry, editor: MockEditor) -> Card {
        let config = PluginConfig::default();
        let session = Arc::new(Session::new(Arc::new(MockAttendeeStore::new()), &config));
        Card::new(info(), Arc::new(registry), Arc::new(editor), session, &config)
    }

    #[tokio::test]
    async fn commit_outside_editing_touches_nothing() {
        let card = card(MockHintsRegistry::new(), MockEditor::new());

        let outcome = card.commit().await.unwrap();
        assert_eq!(
            outcome,
            CommitOutcome::Skipped {
                status: CardStatus::Selecting
            }
        );
    }

    #[tokio::test]
    async fn commit_writes_markup_at_remapped_location() {
        let mapped = Location::new(15, 25);
        let mut seq = Sequence::new();
        let mut registry = MockHintsRegistry::new();
        let mut editor = MockEditor::new();

        registry
            .expect_update_location_to_current_index()
            .with(eq(HrId::from("hr-1")), eq(Location::new(10, 20)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(mapped));
        registry
            .expect_remove_hints_at_location()
            .withf(move |loc, _, source| *loc == mapped && source == "editor-plugins/attendee-list-card")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        editor
            .expect_select_context()
            .withf(move |loc, matcher| {
                *loc == mapped && matcher.type_uri.as_deref() == Some(ATTENDEE_LIST_TYPE)
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|location, _| {
                Ok(Selection {
                    location,
                    nodes: vec!["ul#1".to_string()],
                })
            });
        editor
            .expect_update()
            .withf(|_, update| {
                let NodeUpdate::SetInnerHtml(html) = update;
                html.starts_with("<ul>") && html.find(">Alice<") < html.find(">Bob<")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        registry
            .expect_remove_hints_at_location()
            .withf(|loc, _, _| *loc == Location::new(10, 20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut card = card(registry, editor);
        card.pick_membership(membership("m2", "Bob", "Jones", "OrgY")).unwrap();
        card.request_add().unwrap();
        card.pick_membership(membership("m1", "Alice", "Smith", "OrgX")).unwrap();

        let outcome = card.commit().await.unwrap();
        match outcome {
            CommitOutcome::Committed {
                mapped_location,
                markup,
            } => {
                assert_eq!(mapped_location, mapped);
                assert_eq!(markup, card.inner_html());
            }
            CommitOutcome::Skipped { .. } => panic!("expected commit"),
        }
        assert_eq!(card.status(), CardStatus::Editing);
    }

    #[tokio::test]
    async fn editor_failure_stops_before_original_hint_removal() {
        let mut registry = MockHintsRegistry::new();
        let mut editor = MockEditor::new();

        registry
            .expect_update_location_to_current_index()
            .returning(|_, loc| Ok(loc));
        registry
            .expect_remove_hints_at_location()
            .times(1)
            .returning(|_, _, _| Ok(()));
        editor
            .expect_select_context()
            .returning(|_, _| Err(CollaboratorError::NoMatchingNode(Location::new(10, 20))));

        let mut card = card(registry, editor);
        card.pick_membership(membership("m1", "Alice", "Smith", "OrgX")).unwrap();

        let err = card.commit().await.unwrap_err();
        assert!(matches!(err, PluginError::Editor(CollaboratorError::NoMatchingNode(_))));
        assert_eq!(card.status(), CardStatus::Editing);
    }
}
