use attendee_model::{HrId, MembershipId, OrganizationId, Person, PersonId, RoleId};
use attendee_plugin::{
    Card, CardStatus, CollaboratorError, CollaboratorKind, PluginError, DEFAULT_SOURCE,
};
use attendee_test_utils::fixtures::{
    alice_membership, attendee_list_context, bob_membership, org_x,
};
use attendee_test_utils::{setup_plugin, InMemoryRegistry, InMemoryStore, RecordingEditor};
use proptest::prelude::*;
use std::sync::Arc;

async fn card_and_store() -> (Card, Arc<InMemoryStore>) {
    let (plugin, store) = setup_plugin().await;
    let registry = Arc::new(InMemoryRegistry::new());
    plugin
        .execute(
            &HrId::from("hr-1"),
            &[attendee_list_context(10, 20)],
            registry.clone(),
            Arc::new(RecordingEditor::new()),
        )
        .await
        .unwrap();
    let card = registry.take_cards(DEFAULT_SOURCE).remove(0);
    (card, store)
}

fn firstnames(card: &Card) -> Vec<String> {
    card.sorted_attendees()
        .into_iter()
        .map(|m| m.member.firstname)
        .collect()
}

#[tokio::test]
async fn test_session_views_reflect_catalog() {
    let (card, _store) = card_and_store().await;

    let available: Vec<_> = card
        .available_memberships()
        .into_iter()
        .map(|m| m.member.firstname)
        .collect();
    assert_eq!(available, vec!["Albert", "Alice", "Bob"]);

    let loose: Vec<_> = card
        .non_member_people()
        .into_iter()
        .map(|p| p.firstname)
        .collect();
    assert_eq!(loose, vec!["Carol"]);

    let titles: Vec<_> = card
        .session()
        .organizations()
        .into_iter()
        .map(|o| o.title)
        .collect();
    assert_eq!(titles, vec!["OrgX", "OrgY"]);
}

#[tokio::test]
async fn test_existing_person_becomes_member() {
    let (mut card, store) = card_and_store().await;
    card.pick_membership(alice_membership()).unwrap();
    card.request_add().unwrap();

    let carol = card.session().person(&PersonId::from("p-carol")).unwrap();
    card.choose_existing_person(carol, None).unwrap();
    assert_eq!(card.status(), CardStatus::CreatingMembership);
    assert!(!card.ready_to_create_membership());

    card.select_role(&RoleId::from("r-chair")).unwrap();
    assert!(card.ready_to_create_membership());
    let membership = card.create_membership().await.unwrap();

    assert_eq!(card.status(), CardStatus::Editing);
    assert_eq!(firstnames(&card), vec!["Alice", "Carol"]);
    assert!(store.memberships().iter().any(|m| m.id == membership.id));
    assert!(card.non_member_people().is_empty());
}

#[tokio::test]
async fn test_new_person_flow_lands_in_editing() {
    let (mut card, store) = card_and_store().await;
    card.pick_membership(bob_membership()).unwrap();
    card.request_add().unwrap();
    card.no_matching_person().unwrap();
    assert_eq!(card.status(), CardStatus::CreatingPerson);

    card.set_new_firstname("Dana");
    card.set_new_lastname("Reyes");
    assert!(!card.ready_to_create_person());
    card.select_organization(&OrganizationId::from("o-y")).unwrap();
    assert!(card.ready_to_create_person());

    let person = card.create_person().await.unwrap();
    assert_eq!(card.status(), CardStatus::CreatingMembership);
    assert_eq!(card.selected_person(), Some(&person));
    assert_eq!(person.organization_title(), "OrgY");
    assert!(store.people().iter().any(|p| p.id == person.id));

    card.select_role(&RoleId::from("r-secretary")).unwrap();
    card.create_membership().await.unwrap();

    assert_eq!(card.status(), CardStatus::Editing);
    assert_eq!(firstnames(&card), vec!["Bob", "Dana"]);
    assert!(card.inner_html().contains(">Dana<"));
}

#[tokio::test]
async fn test_failed_save_leaves_card_for_retry() {
    let (mut card, store) = card_and_store().await;
    card.pick_membership(bob_membership()).unwrap();
    card.request_add().unwrap();
    card.no_matching_person().unwrap();
    card.set_new_firstname("Dana");
    card.set_new_lastname("Reyes");
    card.select_organization(&OrganizationId::from("o-x")).unwrap();
    store.fail_writes(true);

    let err = card.create_person().await.unwrap_err();
    assert!(matches!(err, PluginError::Persistence(_)));
    assert_eq!(card.status(), CardStatus::CreatingPerson);
    assert_eq!(card.new_firstname(), "Dana");

    store.fail_writes(false);
    card.create_person().await.unwrap();
    assert_eq!(card.status(), CardStatus::CreatingMembership);
}

#[tokio::test]
async fn test_membership_for_person_missing_from_store() {
    let (mut card, store) = card_and_store().await;
    card.pick_membership(alice_membership()).unwrap();
    card.request_add().unwrap();

    let ghost = Person::new("p-ghost", "Gus", "Hale").with_organization(org_x());
    card.choose_existing_person(ghost, None).unwrap();
    card.select_role(&RoleId::from("r-chair")).unwrap();

    let err = card.create_membership().await.unwrap_err();
    match err {
        PluginError::Persistence(CollaboratorError::NotFound { kind, entity, id }) => {
            assert_eq!(kind, CollaboratorKind::Store);
            assert_eq!(entity, "person");
            assert_eq!(id, "p-ghost");
        }
        other => panic!("expected store not found, got {other:?}"),
    }
    assert_eq!(card.status(), CardStatus::CreatingMembership);
    assert!(card.selected_person().is_some());
    assert_eq!(store.memberships().len(), 3);
}

#[tokio::test]
async fn test_unknown_ids_leave_selection_unchanged() {
    let (mut card, _store) = card_and_store().await;
    card.select_organization(&OrganizationId::from("o-x")).unwrap();

    let err = card
        .select_organization(&OrganizationId::from("o-missing"))
        .unwrap_err();
    assert!(matches!(
        err,
        PluginError::UnknownEntity {
            kind: "organization",
            ..
        }
    ));
    assert_eq!(card.selected_organization().map(|o| o.title.as_str()), Some("OrgX"));
    assert!(card.select_person(&PersonId::from("p-missing")).is_err());
    assert!(card.select_role(&RoleId::from("r-missing")).is_err());
}

#[tokio::test]
async fn test_remove_and_cancel() {
    let (mut card, _store) = card_and_store().await;
    card.pick_membership(alice_membership()).unwrap();
    card.request_add().unwrap();
    card.pick_membership(bob_membership()).unwrap();

    assert!(card.remove_attendee(&MembershipId::from("m-alice")).is_some());
    assert_eq!(firstnames(&card), vec!["Bob"]);

    card.request_add().unwrap();
    card.cancel();
    assert_eq!(card.status(), CardStatus::Editing);

    card.remove_attendee(&MembershipId::from("m-bob"));
    card.request_add().unwrap();
    card.cancel();
    assert_eq!(card.status(), CardStatus::Selecting);
}

#[derive(Debug, Clone)]
enum Action {
    Pick(usize),
    RequestAdd,
    ChoosePerson,
    NoMatch,
    Remove(usize),
    Cancel,
    CreatePerson,
    CreateMembership,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..2).prop_map(Action::Pick),
        Just(Action::RequestAdd),
        Just(Action::ChoosePerson),
        Just(Action::NoMatch),
        (0usize..2).prop_map(Action::Remove),
        Just(Action::Cancel),
        Just(Action::CreatePerson),
        Just(Action::CreateMembership),
    ]
}

async fn apply(card: &mut Card, action: Action) {
    let memberships = [alice_membership(), bob_membership()];
    let _ = match action {
        Action::Pick(i) => card.pick_membership(memberships[i].clone()),
        Action::RequestAdd => card.request_add(),
        Action::ChoosePerson => {
            let carol = card.session().person(&PersonId::from("p-carol"));
            match carol {
                Some(person) => card.choose_existing_person(person, None),
                None => Ok(()),
            }
        }
        Action::NoMatch => card.no_matching_person(),
        Action::Remove(i) => {
            card.remove_attendee(&memberships[i].id);
            Ok(())
        }
        Action::Cancel => {
            card.cancel();
            Ok(())
        }
        Action::CreatePerson => {
            card.set_new_firstname("Eve");
            card.set_new_lastname("Stone");
            let _ = card.select_organization(&OrganizationId::from("o-x"));
            card.create_person().await.map(|_| ())
        }
        Action::CreateMembership => {
            let _ = card.select_role(&RoleId::from("r-chair"));
            card.create_membership().await.map(|_| ())
        }
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exactly_one_status_flag(actions in prop::collection::vec(arb_action(), 0..30)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let (mut card, _store) = card_and_store().await;
            prop_assert_eq!(card.flags().true_count(), 1);
            for action in actions {
                apply(&mut card, action).await;
                prop_assert_eq!(card.flags().true_count(), 1);

                let attendees = card.attendees();
                let mut ids: Vec<_> = attendees.iter().map(|m| m.id.clone()).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), attendees.len());
            }
            Ok(())
        })?;
    }
}
