// ABOUTME: TOML draft files so a wizard session can be prepared and published from the CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::{DraftConfiguration, DraftStore};
use crate::catalog::SectionCatalog;
use crate::error::BuilderResult;
use crate::models::{
    BasicInfo, ClientId, CompanyInfo, DomainConfig, SectionConfiguration, SiteStyle, ThemeConfig,
};
use crate::ordering;

/// One section entry; file order is display order among enabled entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSectionEntry {
    pub id: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

fn default_true() -> bool {
    true
}

/// Draft document as stored on disk
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfo>,
    #[serde(default)]
    pub sections: Vec<DraftSectionEntry>,
}

impl DraftFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft from {}", path.display()))?;
        let draft: DraftFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse draft from {}", path.display()))?;
        Ok(draft)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create draft directory: {}", parent.display())
                })?;
            }
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize draft")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write draft to {}", path.display()))?;
        Ok(())
    }

    /// Starter draft: required sections plus about and contact, with catalog defaults
    pub fn template(catalog: &dyn SectionCatalog, client_id: Option<&ClientId>) -> Self {
        let mut sections: Vec<DraftSectionEntry> = catalog
            .list_sections()
            .iter()
            .filter(|s| s.required || s.id == "about" || s.id == "contact")
            .map(|s| DraftSectionEntry {
                id: s.id.clone(),
                enabled: true,
                data: s.default_data.clone(),
            })
            .collect();
        sections.sort_by_key(|entry| {
            catalog
                .get_section(&entry.id)
                .map(|s| s.default_order)
                .unwrap_or(u32::MAX)
        });

        let style = SiteStyle::default();
        Self {
            client_id: client_id.map(ToString::to_string),
            basic_info: Some(BasicInfo {
                company: CompanyInfo::default(),
                style,
                theme: ThemeConfig::for_style(style),
                domain: DomainConfig::subdomain(
                    client_id.map(ToString::to_string).unwrap_or_default(),
                ),
            }),
            sections,
        }
    }

    /// Snapshot of a draft, enabled sections first in display order
    pub fn from_draft(draft: &DraftConfiguration) -> Self {
        let sections = ordering::normalize(&draft.sections)
            .into_iter()
            .map(|c| DraftSectionEntry {
                id: c.section_id,
                enabled: c.enabled,
                data: c.data,
            })
            .collect();
        Self {
            client_id: draft.client_id.as_ref().map(ToString::to_string),
            basic_info: draft.basic_info.clone(),
            sections,
        }
    }

    /// Build a store from this file; unknown section ids and bad client ids are rejected
    pub fn into_store(self, catalog: &dyn SectionCatalog) -> BuilderResult<DraftStore> {
        let client_id = self.client_id.as_deref().map(ClientId::parse).transpose()?;

        let mut configurations = Vec::with_capacity(self.sections.len());
        let mut next_order = 1u32;
        for entry in self.sections {
            let section = catalog.get_section(&entry.id)?;
            let order = if entry.enabled {
                next_order += 1;
                next_order - 1
            } else {
                section.default_order
            };
            configurations.push(SectionConfiguration {
                section_id: section.id.clone(),
                enabled: entry.enabled,
                order,
                data: entry.data,
            });
        }

        let mut store = DraftStore::new();
        store.set_client_id(client_id);
        store.set_basic_info(self.basic_info);
        store.set_selected_sections(ordering::normalize(&configurations));
        Ok(store)
    }
}
