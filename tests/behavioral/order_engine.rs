// ABOUTME: Behavioral tests for section ordering through the public API
// Verifies the contiguity invariant and the documented reorder scenarios

use pretty_assertions::assert_eq;
use std::sync::Arc;

use portal_builder::catalog::{RemoteCatalog, SectionCatalog, StaticCatalog};
use portal_builder::models::SectionConfiguration;
use portal_builder::ordering::{self, Direction};
use portal_builder::wizard::WizardController;
use portal_builder::BuilderError;

use super::fixtures::InMemoryApi;

fn three_sections() -> Vec<SectionConfiguration> {
    vec![
        SectionConfiguration::new("hero", true, 1),
        SectionConfiguration::new("about", true, 2),
        SectionConfiguration::new("products", true, 3),
    ]
}

fn enabled_ids(configurations: &[SectionConfiguration]) -> Vec<(String, u32)> {
    ordering::enabled_in_order(configurations)
        .into_iter()
        .map(|c| (c.section_id.clone(), c.order))
        .collect()
}

#[test]
fn test_products_move_up_past_about() {
    let moved = ordering::move_section(&three_sections(), "products", Direction::Up);
    assert_eq!(
        enabled_ids(&moved),
        vec![
            ("hero".to_string(), 1),
            ("products".to_string(), 2),
            ("about".to_string(), 3)
        ]
    );
}

#[test]
fn test_disabling_about_keeps_stale_order() {
    let catalog = StaticCatalog::new();
    let result = ordering::set_enabled(&three_sections(), "about", false, &catalog).unwrap();

    assert_eq!(
        enabled_ids(&result),
        vec![("hero".to_string(), 1), ("products".to_string(), 2)]
    );
    let about = result.iter().find(|c| c.section_id == "about").unwrap();
    assert!(!about.enabled);
    assert_eq!(about.order, 2);
}

#[test]
fn test_required_section_cannot_be_disabled() {
    let catalog = StaticCatalog::new();
    let input = three_sections();
    let err = ordering::set_enabled(&input, "hero", false, &catalog).unwrap_err();
    assert!(matches!(err, BuilderError::InvalidOperation(_)));
    assert_eq!(input, three_sections());
}

#[test]
fn test_whole_catalog_stays_contiguous_through_controller() {
    let catalog = Arc::new(StaticCatalog::new());
    let ids: Vec<String> = catalog.list_sections().iter().map(|s| s.id.clone()).collect();
    let mut wizard = WizardController::new(catalog);

    for id in &ids {
        wizard.toggle_section(id, true).unwrap();
        assert!(ordering::is_normalized(&wizard.draft().sections));
    }
    for id in ids.iter().rev() {
        wizard.move_section(id, Direction::Up);
        wizard.move_section(id, Direction::Up);
        assert!(ordering::is_normalized(&wizard.draft().sections));
    }
    for id in ids.iter().step_by(2).filter(|id| id.as_str() != "hero") {
        wizard.toggle_section(id, false).unwrap();
        assert!(ordering::is_normalized(&wizard.draft().sections));
    }

    let enabled = wizard.draft().enabled_sections();
    assert_eq!(enabled.len(), ids.len() - 4);
    assert_eq!(enabled.last().map(|c| c.order), Some(6));
}

#[tokio::test]
async fn test_remote_catalog_drives_ordering() {
    let api = InMemoryApi::default();
    let catalog = RemoteCatalog::fetch(&api).await.unwrap();
    assert_eq!(api.call_count(), 1);

    let result = ordering::set_enabled(&three_sections(), "faq", true, &catalog).unwrap();
    assert_eq!(enabled_ids(&result).last(), Some(&("faq".to_string(), 4)));

    let err = ordering::set_enabled(&result, "hero", false, &catalog).unwrap_err();
    assert!(matches!(err, BuilderError::InvalidOperation(_)));
}
