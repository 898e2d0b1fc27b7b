// ABOUTME: Behavioral tests for TOML draft files feeding the wizard

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use portal_builder::catalog::StaticCatalog;
use portal_builder::cli::draft::check_draft;
use portal_builder::draft::{DraftFile, DraftOrigin};
use portal_builder::wizard::{StepOutcome, WizardController};

const COMPLETE_DRAFT: &str = r##"
client_id = "cafe-luna"

[basic_info]
style = "moderno"

[basic_info.company]
name = "Café Luna"
tagline = "Café de especialidad"
description = "Tostadores desde 2010"

[basic_info.theme]
primaryColor = "#0f172a"
secondaryColor = "#3b82f6"
backgroundColor = "#f8fafc"
foregroundColor = "#0f172a"
accentColor = "#06b6d4"
headingFont = "Inter"
bodyFont = "Inter"

[basic_info.domain]
type = "propio"
customDomain = "cafeluna.mx"

[[sections]]
id = "hero"
data = { title = "Café Luna", ctaLink = "#menu" }

[[sections]]
id = "contact"
data = { email = "hola@cafeluna.mx", phone = "+52 55 1234 5678" }

[[sections]]
id = "products"
enabled = false
"##;

fn write_draft(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("cafe-luna.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_complete_draft_passes_every_step() {
    let dir = TempDir::new().unwrap();
    let path = write_draft(&dir, COMPLETE_DRAFT);
    let catalog = StaticCatalog::new();

    let reports = check_draft(&path, &catalog).unwrap();
    for report in &reports {
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }
}

#[test]
fn test_complete_draft_walks_to_ready() {
    let dir = TempDir::new().unwrap();
    let path = write_draft(&dir, COMPLETE_DRAFT);
    let catalog = Arc::new(StaticCatalog::new());

    let store = DraftFile::load(&path).unwrap().into_store(catalog.as_ref()).unwrap();
    assert_eq!(store.origin(), &DraftOrigin::New);
    let mut wizard = WizardController::with_store(store, catalog);

    let mut outcome = wizard.next();
    while let StepOutcome::Advanced(_) = outcome {
        outcome = wizard.next();
    }
    assert_eq!(outcome, StepOutcome::ReadyToSubmit);
}

#[test]
fn test_target_existing_requires_client_id() {
    let dir = TempDir::new().unwrap();
    let without_id = COMPLETE_DRAFT.replace("client_id = \"cafe-luna\"", "");
    let path = write_draft(&dir, &without_id);
    let catalog = StaticCatalog::new();

    let mut store = DraftFile::load(&path).unwrap().into_store(&catalog).unwrap();
    assert!(store.target_existing().is_err());

    let path = write_draft(&dir, COMPLETE_DRAFT);
    let mut store = DraftFile::load(&path).unwrap().into_store(&catalog).unwrap();
    store.target_existing().unwrap();
    assert!(matches!(store.origin(), DraftOrigin::Existing(id) if id.as_str() == "cafe-luna"));
}

#[test]
fn test_invalid_client_id_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_draft(&dir, &COMPLETE_DRAFT.replace("cafe-luna", "Café Luna!"));
    let catalog = StaticCatalog::new();

    assert!(DraftFile::load(&path).unwrap().into_store(&catalog).is_err());
}

#[test]
fn test_draft_from_wizard_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = write_draft(&dir, COMPLETE_DRAFT);
    let catalog = StaticCatalog::new();
    let store = DraftFile::load(&path).unwrap().into_store(&catalog).unwrap();

    let copy = dir.path().join("copy.toml");
    DraftFile::from_draft(store.draft()).save(&copy).unwrap();
    let reloaded = DraftFile::load(&copy).unwrap().into_store(&catalog).unwrap();

    assert_eq!(reloaded.draft().sections, store.draft().sections);
    assert_eq!(reloaded.draft().basic_info, store.draft().basic_info);
}
