// ABOUTME: Persistence API capability and the payload assembler that feeds it
// Remote calls are single request/response exchanges; retries belong to the caller

pub mod assembler;
pub mod client;

use async_trait::async_trait;

use crate::error::BuilderResult;
use crate::models::{
    ClientConfiguration, ClientId, CreateClientRequest, PreviewSnapshot, RenderedSite, Section,
};

pub use assembler::build_payload;
pub use client::{HttpPersistenceClient, ServiceHealth};

/// Remote store for published client configurations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceApi: Send + Sync {
    async fn create(&self, payload: &CreateClientRequest) -> BuilderResult<ClientConfiguration>;

    /// Fails with `NotFound` when no configuration exists for the id
    async fn fetch(&self, client_id: &ClientId) -> BuilderResult<ClientConfiguration>;

    async fn update(
        &self,
        client_id: &ClientId,
        payload: &CreateClientRequest,
    ) -> BuilderResult<ClientConfiguration>;

    async fn remove(&self, client_id: &ClientId) -> BuilderResult<()>;

    async fn preview(&self, client_id: &ClientId) -> BuilderResult<PreviewSnapshot>;

    async fn render(&self, client_id: &ClientId) -> BuilderResult<RenderedSite>;

    /// Section catalog as served remotely
    async fn available_sections(&self) -> BuilderResult<Vec<Section>>;
}
