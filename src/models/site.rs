// ABOUTME: Basic site information collected at the second wizard step
// Company details, visual style, theme palette and domain settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStyle {
    #[default]
    Clasico,
    Moderno,
    Minimalista,
    Colorido,
}

impl SiteStyle {
    pub fn all() -> &'static [SiteStyle] {
        &[Self::Clasico, Self::Moderno, Self::Minimalista, Self::Colorido]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clasico => "clasico",
            Self::Moderno => "moderno",
            Self::Minimalista => "minimalista",
            Self::Colorido => "colorido",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub foreground_color: String,
    pub accent_color: String,
    pub heading_font: String,
    pub body_font: String,
}

impl ThemeConfig {
    /// Starting palette offered for each style
    pub fn for_style(style: SiteStyle) -> Self {
        let (primary, secondary, background, foreground, accent, heading, body) = match style {
            SiteStyle::Clasico => (
                "#1f3a5f", "#c9a227", "#ffffff", "#1a1a1a", "#8b0000", "Playfair Display", "Georgia",
            ),
            SiteStyle::Moderno => (
                "#0f172a", "#3b82f6", "#f8fafc", "#0f172a", "#06b6d4", "Inter", "Inter",
            ),
            SiteStyle::Minimalista => (
                "#111111", "#666666", "#ffffff", "#111111", "#e5e5e5", "Helvetica", "Helvetica",
            ),
            SiteStyle::Colorido => (
                "#ff006e", "#fb5607", "#fffbea", "#1d1d1d", "#3a86ff", "Poppins", "Nunito",
            ),
        };

        Self {
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
            background_color: background.to_string(),
            foreground_color: foreground.to_string(),
            accent_color: accent.to_string(),
            heading_font: heading.to_string(),
            body_font: body.to_string(),
        }
    }

    /// Color fields with their field names, for validation
    pub fn colors(&self) -> [(&'static str, &str); 5] {
        [
            ("primaryColor", &self.primary_color),
            ("secondaryColor", &self.secondary_color),
            ("backgroundColor", &self.background_color),
            ("foregroundColor", &self.foreground_color),
            ("accentColor", &self.accent_color),
        ]
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::for_style(SiteStyle::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    #[default]
    Subdominio,
    Propio,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    #[serde(rename = "type")]
    pub domain_type: DomainType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
}

impl DomainConfig {
    pub fn subdomain(name: impl Into<String>) -> Self {
        Self {
            domain_type: DomainType::Subdominio,
            subdomain: Some(name.into()),
            custom_domain: None,
        }
    }

    pub fn custom(domain: impl Into<String>) -> Self {
        Self {
            domain_type: DomainType::Propio,
            subdomain: None,
            custom_domain: Some(domain.into()),
        }
    }

    /// The host value matching the selected domain type
    pub fn active_value(&self) -> Option<&str> {
        match self.domain_type {
            DomainType::Subdominio => self.subdomain.as_deref(),
            DomainType::Propio => self.custom_domain.as_deref(),
        }
    }
}

/// Everything the second wizard step collects
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub style: SiteStyle,
    pub company: CompanyInfo,
    pub theme: ThemeConfig,
    pub domain: DomainConfig,
}
