// ABOUTME: Shared CLI utilities for building the API client, catalog and output

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

use crate::api::HttpPersistenceClient;
use crate::cache::CurrentUserCache;
use crate::catalog::{load_catalog, CatalogSource, SectionCatalog};
use crate::config::AppConfig;
use crate::models::ClientId;
use crate::wizard::UserContext;

pub fn build_client(config: &AppConfig) -> Result<HttpPersistenceClient> {
    HttpPersistenceClient::new(config.api.clone()).context("Failed to set up persistence API client")
}

/// Catalog chosen by configuration, or the remote one when forced
pub async fn catalog_for(
    config: &AppConfig,
    client: &HttpPersistenceClient,
    force_remote: bool,
) -> Result<Arc<dyn SectionCatalog>> {
    let source = if force_remote {
        CatalogSource::Remote
    } else {
        config.catalog.source
    };
    load_catalog(source, client)
        .await
        .context("Failed to load section catalog")
}

pub fn parse_client_id(value: &str) -> Result<ClientId> {
    ClientId::parse(value).with_context(|| format!("Invalid client id '{value}'"))
}

/// Current user for wizard gating; a failed lookup stops the command instead of skipping role checks
pub async fn resolve_user(config: &AppConfig, client: &HttpPersistenceClient) -> Result<UserContext> {
    let mut cache = CurrentUserCache::new(config.cache.user_ttl());
    cache
        .resolve(client)
        .await
        .context("Failed to look up the current user")
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Clip `value` to `width` characters, marking the cut with an ellipsis, and pad it to that width
pub fn fit_column(value: &str, width: usize) -> String {
    let clipped: String = if value.chars().count() > width && width > 0 {
        value
            .chars()
            .take(width - 1)
            .chain(std::iter::once('…'))
            .collect()
    } else {
        value.chars().take(width).collect()
    };
    format!("{clipped:<width$}")
}
