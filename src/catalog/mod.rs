// ABOUTME: Section catalog capability with static and remote-backed implementations
// The order engine, wizard and assembler only see the `SectionCatalog` trait

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::PersistenceApi;
use crate::error::{BuilderError, BuilderResult};
use crate::models::Section;

pub mod builtin;

pub use builtin::builtin_sections;

/// Read-only registry of available section definitions
pub trait SectionCatalog: Send + Sync {
    /// All sections in catalog definition order
    fn list_sections(&self) -> &[Section];

    fn get_section(&self, id: &str) -> BuilderResult<&Section> {
        self.list_sections()
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| BuilderError::section_not_found(id))
    }

    fn is_required(&self, id: &str) -> bool {
        self.get_section(id).map(|s| s.required).unwrap_or(false)
    }

    fn required_sections(&self) -> Vec<&Section> {
        self.list_sections().iter().filter(|s| s.required).collect()
    }
}

/// Sections compiled into the binary
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    sections: Vec<Section>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            sections: builtin_sections(),
        }
    }

    /// Catalog over an explicit list, mainly for tests and embedding
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionCatalog for StaticCatalog {
    fn list_sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Snapshot of the catalog served by the persistence API
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    sections: Vec<Section>,
}

impl RemoteCatalog {
    pub async fn fetch<A>(api: &A) -> BuilderResult<Self>
    where
        A: PersistenceApi + ?Sized,
    {
        let mut sections = api.available_sections().await?;
        // Remote order is by default_order, not response order
        sections.sort_by_key(|s| s.default_order);
        debug!("Fetched {} sections from remote catalog", sections.len());
        Ok(Self { sections })
    }
}

impl SectionCatalog for RemoteCatalog {
    fn list_sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Where the catalog comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    #[default]
    Static,
    Remote,
}

impl std::str::FromStr for CatalogSource {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" | "local" => Ok(Self::Static),
            "remote" => Ok(Self::Remote),
            other => Err(BuilderError::Config(format!(
                "unknown catalog source '{other}' (expected 'static' or 'remote')"
            ))),
        }
    }
}

/// Build the catalog selected by configuration
pub async fn load_catalog<A>(source: CatalogSource, api: &A) -> BuilderResult<Arc<dyn SectionCatalog>>
where
    A: PersistenceApi + ?Sized,
{
    info!("Loading section catalog from {:?} source", source);
    match source {
        CatalogSource::Static => Ok(Arc::new(StaticCatalog::new())),
        CatalogSource::Remote => Ok(Arc::new(RemoteCatalog::fetch(api).await?)),
    }
}

/// Id-level comparison between two catalogs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub shared: Vec<String>,
    pub local_only: Vec<String>,
    pub remote_only: Vec<String>,
}

/// Match local and remote sections by id equality only
pub fn reconcile(local: &dyn SectionCatalog, remote: &[Section]) -> Reconciliation {
    let remote_ids: HashSet<&str> = remote.iter().map(|s| s.id.as_str()).collect();
    let local_ids: HashSet<&str> = local.list_sections().iter().map(|s| s.id.as_str()).collect();

    let mut result = Reconciliation::default();
    for section in local.list_sections() {
        if remote_ids.contains(section.id.as_str()) {
            result.shared.push(section.id.clone());
        } else {
            result.local_only.push(section.id.clone());
        }
    }
    result.remote_only = remote
        .iter()
        .filter(|s| !local_ids.contains(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect();
    result
}
