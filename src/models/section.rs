// ABOUTME: Section catalog entries and the per-draft section configuration

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionCategory {
    Content,
    Commerce,
    Social,
    Contact,
}

impl SectionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Commerce => "commerce",
            Self::Social => "social",
            Self::Contact => "contact",
        }
    }
}

/// Expected shape of a section data field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Url,
    Image,
    Email,
    Phone,
    Number,
    Boolean,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            required: true,
        }
    }

    pub const fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }
}

/// A content block type a published site may include
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    pub default_order: u32,
    pub template: String,
    pub category: SectionCategory,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub schema: BTreeMap<String, FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_data: Option<Value>,
}

impl Section {
    /// Field names the schema marks as required, in schema order
    pub fn required_fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.schema
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, spec)| (name.as_str(), spec))
    }
}

/// A section as selected in a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfiguration {
    pub section_id: String,
    pub enabled: bool,
    /// Meaningful only while `enabled`; stale otherwise
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl SectionConfiguration {
    pub fn new(section_id: impl Into<String>, enabled: bool, order: u32) -> Self {
        Self {
            section_id: section_id.into(),
            enabled,
            order,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Data to validate and publish, falling back to the catalog defaults
    pub fn effective_data<'a>(&'a self, section: &'a Section) -> Option<&'a Value> {
        self.data.as_ref().or(section.default_data.as_ref())
    }
}
