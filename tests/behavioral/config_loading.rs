// ABOUTME: Behavioral tests for configuration loading
// Verifies defaults, layered files and catalog source selection

use std::fs;
use tempfile::TempDir;

use portal_builder::catalog::{load_catalog, CatalogSource, SectionCatalog};
use portal_builder::config::AppConfig;

use super::fixtures::InMemoryApi;

/// Default config should work against a local service out of the box
#[test]
fn test_default_config_has_sensible_values() {
    let config = AppConfig::default();

    assert_eq!(config.api.base_url, "http://localhost:3000");
    assert_eq!(config.api.sections_path, "/api/sections");
    assert_eq!(config.api.render_path, "/api/render");
    assert!(config.api.token.is_none(), "No token should be configured by default");
    assert_eq!(config.catalog.source, CatalogSource::Static);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [api]
        token = "t0k3n"

        [cache]
        user_ttl_secs = 60
        "#,
    )
    .unwrap();

    let config = AppConfig::load_from_paths(&[path]).unwrap();

    assert_eq!(config.api.token.as_deref(), Some("t0k3n"));
    assert_eq!(config.api.clients_path, "/api/client-configs");
    assert_eq!(config.cache.user_ttl_secs, 60);
    assert_eq!(config.cache.status_ttl_secs, 30);
}

#[tokio::test]
async fn test_catalog_source_selects_implementation() {
    let api = InMemoryApi::default();

    let local = load_catalog(CatalogSource::Static, &api).await.unwrap();
    assert_eq!(api.call_count(), 0, "static catalog must not call the service");

    let remote = load_catalog(CatalogSource::Remote, &api).await.unwrap();
    assert_eq!(api.call_count(), 1);

    let ids = |catalog: &dyn SectionCatalog| -> Vec<String> {
        catalog.list_sections().iter().map(|s| s.id.clone()).collect()
    };
    assert_eq!(ids(local.as_ref()), ids(remote.as_ref()));
}
