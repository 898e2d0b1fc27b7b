// ABOUTME: Behavioral tests for the wizard step controller and submission lifecycle

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use portal_builder::api::{build_payload, PersistenceApi};
use portal_builder::catalog::{SectionCatalog, StaticCatalog};
use portal_builder::draft::DraftConfiguration;
use portal_builder::models::ClientId;
use portal_builder::wizard::{StepOutcome, SubmissionOutcome, WizardController, WizardStep};
use portal_builder::BuilderError;

use super::fixtures::{sample_basic_info, InMemoryApi};

fn catalog() -> Arc<dyn SectionCatalog> {
    Arc::new(StaticCatalog::new())
}

fn filled_wizard() -> WizardController {
    let mut wizard = WizardController::new(catalog());
    wizard.toggle_section("services", true).unwrap();
    wizard.next();
    wizard.set_basic_info(sample_basic_info());
    wizard.next();
    wizard
        .set_section_data(
            "services",
            Some(json!({ "title": "Servicios", "items": ["Corte de llaves", "Pintura"] })),
        )
        .unwrap();
    wizard.next();
    wizard
}

#[test]
fn test_step_one_with_nothing_enabled_stays_put() {
    let empty = StaticCatalog::from_sections(Vec::new());
    let mut wizard = WizardController::new(Arc::new(empty));

    let outcome = wizard.next();

    assert!(matches!(outcome, StepOutcome::Blocked(_)));
    assert_eq!(wizard.current_step(), WizardStep::Sections);
}

#[test]
fn test_build_payload_without_basic_info_is_incomplete() {
    let draft = DraftConfiguration {
        client_id: Some(ClientId::parse("ferreteria-el-clavo").unwrap()),
        ..Default::default()
    };
    assert!(matches!(
        build_payload(&draft, &StaticCatalog::new()),
        Err(BuilderError::IncompleteDraft { .. })
    ));
}

#[test]
fn test_step_two_blocks_until_basic_info_is_set() {
    let mut wizard = WizardController::new(catalog());
    wizard.next();

    let StepOutcome::Blocked(issues) = wizard.next() else {
        panic!("step 2 should block without basic info");
    };
    let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["clientId", "basicInfo"]);

    wizard.set_basic_info(sample_basic_info());
    assert_eq!(wizard.next(), StepOutcome::Advanced(WizardStep::ContentConfig));
    assert_eq!(
        wizard.draft().client_id.as_ref().map(ClientId::as_str),
        Some("ferreteria-el-clavo")
    );
}

#[tokio::test]
async fn test_publish_then_edit_round_trip() {
    let api = InMemoryApi::default();
    let mut wizard = filled_wizard();
    assert_eq!(wizard.current_step(), WizardStep::Preview);
    assert_eq!(wizard.next(), StepOutcome::ReadyToSubmit);

    let SubmissionOutcome::Published(created) = wizard.submit(&api).await.unwrap() else {
        panic!("submission should publish");
    };
    assert_eq!(created.sections.len(), 2);
    assert_eq!(wizard.draft().current_step, WizardStep::Sections);
    assert!(wizard.draft().basic_info.is_none());

    let fetched = api.fetch(&created.client_id).await.unwrap();
    let mut editor = WizardController::edit(fetched, catalog());
    editor.move_section("services", portal_builder::ordering::Direction::Up);
    editor.go_to(WizardStep::Preview).unwrap();

    let SubmissionOutcome::Published(updated) = editor.submit(&api).await.unwrap() else {
        panic!("update should publish");
    };
    assert_eq!(updated.sections[0].section_id, "services");
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_response_for_abandoned_draft_is_discarded() {
    let api = InMemoryApi::default();
    let mut wizard = filled_wizard();

    let pending = wizard.begin_submission().unwrap();
    wizard.reset();
    let result = pending.send(&api).await;
    let outcome = wizard.complete_submission(pending.ticket, result).unwrap();

    assert_eq!(outcome, SubmissionOutcome::Discarded);
    assert_eq!(wizard.current_step(), WizardStep::Sections);
    assert!(!wizard.draft().loading);
    assert!(wizard.draft().basic_info.is_none());
}

#[tokio::test]
async fn test_update_of_missing_site_surfaces_not_found() {
    let api = InMemoryApi::default();
    let payload = build_payload(filled_wizard().draft(), catalog().as_ref()).unwrap();
    let config = super::fixtures::materialize(&payload);

    let mut editor = WizardController::edit(config, catalog());
    editor.go_to(WizardStep::Preview).unwrap();
    let err = editor.submit(&api).await.unwrap_err();

    assert!(matches!(err, BuilderError::NotFound { .. }));
    assert!(editor.draft().error.is_some());
    assert!(!editor.draft().loading);
}
