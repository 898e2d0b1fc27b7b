// ABOUTME: Client identifiers and the persisted client configuration entity
// Wire shapes exchanged with the persistence API (camelCase JSON)

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::section::SectionConfiguration;
use super::site::{CompanyInfo, DomainConfig, SiteStyle, ThemeConfig};
use crate::error::{BuilderError, ValidationIssue};

lazy_static! {
    static ref CLIENT_ID_PATTERN: Regex = Regex::new(r"^[a-z0-9-]+$").expect("valid client id regex");
}

const MAX_CLIENT_ID_LEN: usize = 63;

/// Identifier keying every persistence endpoint, matching `^[a-z0-9-]+$`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    pub fn parse(value: &str) -> Result<Self, BuilderError> {
        if value.is_empty() {
            return Err(invalid_id("client id is required"));
        }
        if value.len() > MAX_CLIENT_ID_LEN {
            return Err(invalid_id(format!(
                "client id must be at most {MAX_CLIENT_ID_LEN} characters"
            )));
        }
        if !CLIENT_ID_PATTERN.is_match(value) {
            return Err(invalid_id(
                "client id may only contain lowercase letters, digits and '-'",
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Derive a client id from a company name ("Café Niño" -> "cafe-nino")
    pub fn suggest(company_name: &str) -> Option<Self> {
        let mut slug = String::with_capacity(company_name.len());
        for c in company_name.trim().chars().flat_map(char::to_lowercase) {
            let mapped = match c {
                'á' | 'à' | 'ä' | 'â' => 'a',
                'é' | 'è' | 'ë' | 'ê' => 'e',
                'í' | 'ì' | 'ï' | 'î' => 'i',
                'ó' | 'ò' | 'ö' | 'ô' => 'o',
                'ú' | 'ù' | 'ü' | 'û' => 'u',
                'ñ' => 'n',
                'ç' => 'c',
                c if c.is_ascii_lowercase() || c.is_ascii_digit() => c,
                _ => '-',
            };
            if mapped == '-' && (slug.is_empty() || slug.ends_with('-')) {
                continue;
            }
            slug.push(mapped);
        }

        let trimmed: String = slug.trim_end_matches('-').chars().take(MAX_CLIENT_ID_LEN).collect();
        Self::parse(trimmed.trim_end_matches('-')).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid_id(message: impl Into<String>) -> BuilderError {
    BuilderError::ValidationFailure(vec![ValidationIssue::new("clientId", message)])
}

impl TryFrom<String> for ClientId {
    type Error = BuilderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload sent to create or update a published configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub client_id: ClientId,
    pub name: String,
    pub description: String,
    pub style: SiteStyle,
    pub sections: Vec<SectionConfiguration>,
    pub company: CompanyInfo,
    pub theme: ThemeConfig,
    pub domain: DomainConfig,
}

/// Server-side materialization of a completed draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfiguration {
    pub client_id: ClientId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub style: SiteStyle,
    #[serde(default)]
    pub sections: Vec<SectionConfiguration>,
    pub company: CompanyInfo,
    pub theme: ThemeConfig,
    pub domain: DomainConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Renderable snapshot returned by the preview endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    pub client_id: ClientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Fully rendered site markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSite {
    pub client_id: ClientId,
    pub html: String,
}
