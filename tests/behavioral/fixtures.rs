// ABOUTME: Shared test fixtures for behavioral tests
//
// Provides:
// - sample_basic_info(): a complete step-2 payload
// - InMemoryApi: PersistenceApi backed by a map, counting calls

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use portal_builder::api::PersistenceApi;
use portal_builder::catalog::builtin_sections;
use portal_builder::models::{
    BasicInfo, ClientConfiguration, ClientId, CompanyInfo, CreateClientRequest, DomainConfig,
    PreviewSnapshot, RenderedSite, Section, SiteStyle, ThemeConfig,
};
use portal_builder::{BuilderError, BuilderResult};

pub fn sample_basic_info() -> BasicInfo {
    BasicInfo {
        style: SiteStyle::Clasico,
        company: CompanyInfo {
            name: "Ferretería El Clavo".to_string(),
            tagline: "Todo para tu obra".to_string(),
            description: "Ferretería de barrio desde 1985".to_string(),
            logo: Some("https://cdn.example.com/clavo.png".to_string()),
            favicon: Some("/favicon.ico".to_string()),
        },
        theme: ThemeConfig::for_style(SiteStyle::Clasico),
        domain: DomainConfig::subdomain("ferreteria-el-clavo"),
    }
}

pub fn materialize(request: &CreateClientRequest) -> ClientConfiguration {
    let now = Utc::now();
    ClientConfiguration {
        client_id: request.client_id.clone(),
        name: request.name.clone(),
        description: request.description.clone(),
        style: request.style,
        sections: request.sections.clone(),
        company: request.company.clone(),
        theme: request.theme.clone(),
        domain: request.domain.clone(),
        created_at: now,
        updated_at: now,
    }
}

/// Persistence API double keeping configurations in memory
#[derive(Default)]
pub struct InMemoryApi {
    pub configs: Mutex<HashMap<ClientId, ClientConfiguration>>,
    pub calls: AtomicUsize,
}

impl InMemoryApi {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn stored(&self, client_id: &ClientId) -> BuilderResult<ClientConfiguration> {
        self.configs
            .lock()
            .unwrap()
            .get(client_id)
            .cloned()
            .ok_or_else(|| BuilderError::client_not_found(client_id.as_str()))
    }
}

#[async_trait]
impl PersistenceApi for InMemoryApi {
    async fn create(&self, payload: &CreateClientRequest) -> BuilderResult<ClientConfiguration> {
        self.record();
        let config = materialize(payload);
        self.configs
            .lock()
            .unwrap()
            .insert(config.client_id.clone(), config.clone());
        Ok(config)
    }

    async fn fetch(&self, client_id: &ClientId) -> BuilderResult<ClientConfiguration> {
        self.record();
        self.stored(client_id)
    }

    async fn update(
        &self,
        client_id: &ClientId,
        payload: &CreateClientRequest,
    ) -> BuilderResult<ClientConfiguration> {
        self.record();
        let existing = self.stored(client_id)?;
        let mut config = materialize(payload);
        config.created_at = existing.created_at;
        self.configs
            .lock()
            .unwrap()
            .insert(client_id.clone(), config.clone());
        Ok(config)
    }

    async fn remove(&self, client_id: &ClientId) -> BuilderResult<()> {
        self.record();
        self.configs
            .lock()
            .unwrap()
            .remove(client_id)
            .map(|_| ())
            .ok_or_else(|| BuilderError::client_not_found(client_id.as_str()))
    }

    async fn preview(&self, client_id: &ClientId) -> BuilderResult<PreviewSnapshot> {
        self.record();
        let config = self.stored(client_id)?;
        Ok(PreviewSnapshot {
            client_id: config.client_id,
            preview_url: None,
            html: None,
            sections: config.sections,
            generated_at: None,
        })
    }

    async fn render(&self, client_id: &ClientId) -> BuilderResult<RenderedSite> {
        self.record();
        let config = self.stored(client_id)?;
        Ok(RenderedSite {
            client_id: config.client_id,
            html: format!("<h1>{}</h1>", config.name),
        })
    }

    async fn available_sections(&self) -> BuilderResult<Vec<Section>> {
        self.record();
        Ok(builtin_sections())
    }
}
