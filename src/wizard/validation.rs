// ABOUTME: Per-step validation predicates for the wizard
// Each returns the unmet rules as field-level issues; an empty list means the step passes

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::WizardStep;
use crate::catalog::SectionCatalog;
use crate::draft::DraftConfiguration;
use crate::error::ValidationIssue;
use crate::models::{CurrentUser, DomainType, FieldKind, FieldSpec, Section};
use crate::ordering;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex");
    static ref SUBDOMAIN: Regex = Regex::new(r"^[a-z0-9-]+$").expect("valid subdomain regex");
    static ref HOSTNAME: Regex =
        Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").expect("valid hostname regex");
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex");
    static ref PHONE: Regex = Regex::new(r"^\+?[0-9 ()-]{6,20}$").expect("valid phone regex");
}

/// Validate one step. `Preview` has no rules of its own.
pub fn validate_step(
    step: WizardStep,
    draft: &DraftConfiguration,
    catalog: &dyn SectionCatalog,
    user: Option<&CurrentUser>,
) -> Vec<ValidationIssue> {
    match step {
        WizardStep::Sections => validate_sections(draft, catalog, user),
        WizardStep::BasicInfo => validate_basic_info(draft),
        WizardStep::ContentConfig => validate_content(draft, catalog),
        WizardStep::Preview => Vec::new(),
    }
}

/// Every step's rules, in step order
pub fn validate_all(
    draft: &DraftConfiguration,
    catalog: &dyn SectionCatalog,
    user: Option<&CurrentUser>,
) -> Vec<ValidationIssue> {
    WizardStep::all()
        .iter()
        .flat_map(|step| validate_step(*step, draft, catalog, user))
        .collect()
}

pub fn validate_sections(
    draft: &DraftConfiguration,
    catalog: &dyn SectionCatalog,
    user: Option<&CurrentUser>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !draft.sections.iter().any(|c| c.enabled) {
        issues.push(ValidationIssue::new("sections", "at least one section must be enabled"));
    }

    for section in catalog.required_sections() {
        let enabled = draft
            .sections
            .iter()
            .any(|c| c.section_id == section.id && c.enabled);
        if !enabled {
            issues.push(ValidationIssue::new(
                format!("sections.{}", section.id),
                format!("{} is required and must be enabled", section.name),
            ));
        }
    }

    let mut seen = HashSet::new();
    for config in &draft.sections {
        let field = format!("sections.{}", config.section_id);
        if !seen.insert(config.section_id.as_str()) {
            issues.push(ValidationIssue::new(field.clone(), "section is listed more than once"));
        }
        match catalog.get_section(&config.section_id) {
            Err(_) => issues.push(ValidationIssue::new(field, "unknown section")),
            Ok(section) => {
                if let Some(user) = user {
                    if config.enabled && !user.can_use_category(section.category) {
                        issues.push(ValidationIssue::new(
                            field,
                            format!(
                                "{} sections are not available for your account",
                                section.category.label()
                            ),
                        ));
                    }
                }
            }
        }
    }

    if !ordering::is_normalized(&draft.sections) {
        issues.push(ValidationIssue::new(
            "sections",
            "enabled sections must be numbered 1..N without gaps",
        ));
    }

    issues
}

fn require_text(issues: &mut Vec<ValidationIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "is required"));
    }
}

fn is_link(value: &str) -> bool {
    value.starts_with('/') || value.starts_with('#') || url::Url::parse(value).is_ok()
}

pub fn validate_basic_info(draft: &DraftConfiguration) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.client_id.is_none() {
        issues.push(ValidationIssue::new("clientId", "a client identifier must be assigned"));
    }

    let Some(info) = draft.basic_info.as_ref() else {
        issues.push(ValidationIssue::new("basicInfo", "basic information is required"));
        return issues;
    };

    require_text(&mut issues, "company.name", &info.company.name);
    require_text(&mut issues, "company.tagline", &info.company.tagline);
    require_text(&mut issues, "company.description", &info.company.description);
    for (field, value) in [("company.logo", &info.company.logo), ("company.favicon", &info.company.favicon)] {
        if let Some(value) = value {
            if !is_link(value) {
                issues.push(ValidationIssue::new(field, "must be a URL or an absolute path"));
            }
        }
    }

    for (name, color) in info.theme.colors() {
        if !HEX_COLOR.is_match(color) {
            issues.push(ValidationIssue::new(
                format!("theme.{name}"),
                "must be a hex color such as #1a2b3c",
            ));
        }
    }
    require_text(&mut issues, "theme.headingFont", &info.theme.heading_font);
    require_text(&mut issues, "theme.bodyFont", &info.theme.body_font);

    match info.domain.domain_type {
        DomainType::Subdominio => match info.domain.subdomain.as_deref().map(str::trim) {
            None | Some("") => issues.push(ValidationIssue::new("domain.subdomain", "is required")),
            Some(value) if !SUBDOMAIN.is_match(value) || value.len() > 63 => issues.push(
                ValidationIssue::new(
                    "domain.subdomain",
                    "may only contain lowercase letters, digits and '-'",
                ),
            ),
            Some(_) => {}
        },
        DomainType::Propio => match info.domain.custom_domain.as_deref().map(str::trim) {
            None | Some("") => {
                issues.push(ValidationIssue::new("domain.customDomain", "is required"));
            }
            Some(value) if !HOSTNAME.is_match(&value.to_ascii_lowercase()) => issues.push(
                ValidationIssue::new("domain.customDomain", "must be a valid domain name"),
            ),
            Some(_) => {}
        },
    }

    issues
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn shape_error(spec: &FieldSpec, value: &Value) -> Option<&'static str> {
    let ok = match spec.kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::Image => value.is_string(),
        FieldKind::Url => value.as_str().is_some_and(is_link),
        FieldKind::Email => value.as_str().is_some_and(|s| EMAIL.is_match(s)),
        FieldKind::Phone => value.as_str().is_some_and(|s| PHONE.is_match(s)),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
        FieldKind::List => value.is_array(),
    };
    if ok {
        return None;
    }
    Some(match spec.kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::Image => "must be text",
        FieldKind::Url => "must be a URL",
        FieldKind::Email => "must be an email address",
        FieldKind::Phone => "must be a phone number",
        FieldKind::Number => "must be a number",
        FieldKind::Boolean => "must be true or false",
        FieldKind::List => "must be a list",
    })
}

fn filled<'a>(object: Option<&'a Map<String, Value>>, name: &str) -> Option<&'a Value> {
    object
        .and_then(|map| map.get(name))
        .filter(|value| !is_blank(value))
}

fn validate_section_data(section: &Section, data: Option<&Value>, issues: &mut Vec<ValidationIssue>) {
    let object = match data {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            issues.push(ValidationIssue::new(
                format!("sections.{}", section.id),
                "section data must be a table of fields",
            ));
            return;
        }
    };

    for (name, _) in section.required_fields() {
        if filled(object, name).is_none() {
            issues.push(ValidationIssue::new(
                format!("sections.{}.{}", section.id, name),
                "is required",
            ));
        }
    }

    for (name, spec) in &section.schema {
        if let Some(message) = filled(object, name).and_then(|value| shape_error(spec, value)) {
            issues.push(ValidationIssue::new(
                format!("sections.{}.{}", section.id, name),
                message,
            ));
        }
    }
}

pub fn validate_content(draft: &DraftConfiguration, catalog: &dyn SectionCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for config in draft.enabled_sections() {
        // Unknown ids are reported by the sections step
        if let Ok(section) = catalog.get_section(&config.section_id) {
            validate_section_data(section, config.effective_data(section), &mut issues);
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::models::{
        BasicInfo, ClientId, CompanyInfo, DomainConfig, SectionConfiguration, SiteStyle, ThemeConfig,
        UserRole, UserStatus,
    };
    use chrono::Utc;
    use serde_json::json;

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    fn complete_basic_info() -> BasicInfo {
        BasicInfo {
            style: SiteStyle::Moderno,
            company: CompanyInfo {
                name: "Floreria Sol".to_string(),
                tagline: "Flores frescas".to_string(),
                description: "Arreglos florales a domicilio".to_string(),
                logo: Some("https://cdn.example.com/logo.png".to_string()),
                favicon: None,
            },
            theme: ThemeConfig::for_style(SiteStyle::Moderno),
            domain: DomainConfig::subdomain("floreria-sol"),
        }
    }

    #[test]
    fn test_no_enabled_sections_fails() {
        let catalog = StaticCatalog::new();
        let draft = DraftConfiguration::default();
        let issues = validate_sections(&draft, &catalog, None);
        assert_eq!(fields(&issues), vec!["sections", "sections.hero"]);
    }

    #[test]
    fn test_required_section_disabled_fails() {
        let catalog = StaticCatalog::new();
        let draft = DraftConfiguration {
            sections: vec![
                SectionConfiguration::new("hero", false, 1),
                SectionConfiguration::new("about", true, 1),
            ],
            ..Default::default()
        };
        let issues = validate_sections(&draft, &catalog, None);
        assert_eq!(fields(&issues), vec!["sections.hero"]);
    }

    #[test]
    fn test_unknown_duplicate_and_gaps() {
        let catalog = StaticCatalog::new();
        let draft = DraftConfiguration {
            sections: vec![
                SectionConfiguration::new("hero", true, 1),
                SectionConfiguration::new("pricing", true, 2),
                SectionConfiguration::new("about", true, 4),
                SectionConfiguration::new("about", false, 3),
            ],
            ..Default::default()
        };
        let issues = validate_sections(&draft, &catalog, None);
        assert_eq!(
            fields(&issues),
            vec!["sections.pricing", "sections.about", "sections"]
        );
    }

    #[test]
    fn test_viewer_cannot_enable_commerce() {
        let catalog = StaticCatalog::new();
        let viewer = CurrentUser {
            id: "7".to_string(),
            email: "v@example.com".to_string(),
            display_name: "Viewer".to_string(),
            role: UserRole::Viewer,
            status: UserStatus::Active,
            registration_date: Utc::now(),
        };
        let draft = DraftConfiguration {
            sections: vec![
                SectionConfiguration::new("hero", true, 1),
                SectionConfiguration::new("products", true, 2),
            ],
            ..Default::default()
        };
        assert_eq!(fields(&validate_sections(&draft, &catalog, Some(&viewer))), vec!["sections.products"]);
        assert!(validate_sections(&draft, &catalog, None).is_empty());
    }

    #[test]
    fn test_basic_info_missing() {
        let draft = DraftConfiguration::default();
        assert_eq!(fields(&validate_basic_info(&draft)), vec!["clientId", "basicInfo"]);
    }

    #[test]
    fn test_basic_info_complete_passes() {
        let draft = DraftConfiguration {
            client_id: Some(ClientId::parse("floreria-sol").unwrap()),
            basic_info: Some(complete_basic_info()),
            ..Default::default()
        };
        assert!(validate_basic_info(&draft).is_empty());
    }

    #[test]
    fn test_basic_info_field_rules() {
        let mut info = complete_basic_info();
        info.company.tagline = "   ".to_string();
        info.company.logo = Some("logo png".to_string());
        info.theme.accent_color = "blue".to_string();
        info.domain = DomainConfig::custom("not a domain");

        let draft = DraftConfiguration {
            client_id: Some(ClientId::parse("floreria-sol").unwrap()),
            basic_info: Some(info),
            ..Default::default()
        };
        assert_eq!(
            fields(&validate_basic_info(&draft)),
            vec![
                "company.tagline",
                "company.logo",
                "theme.accentColor",
                "domain.customDomain"
            ]
        );
    }

    #[test]
    fn test_custom_domain_accepted() {
        let mut info = complete_basic_info();
        info.domain = DomainConfig::custom("www.FloreriaSol.mx");
        let draft = DraftConfiguration {
            client_id: Some(ClientId::parse("floreria-sol").unwrap()),
            basic_info: Some(info),
            ..Default::default()
        };
        assert!(validate_basic_info(&draft).is_empty());
    }

    #[test]
    fn test_content_uses_defaults_and_checks_required() {
        let catalog = StaticCatalog::new();
        let draft = DraftConfiguration {
            sections: vec![
                // hero default data carries a title
                SectionConfiguration::new("hero", true, 1),
                // about default data lacks content
                SectionConfiguration::new("about", true, 2),
                // disabled sections are not checked
                SectionConfiguration::new("contact", false, 3),
            ],
            ..Default::default()
        };
        assert_eq!(
            fields(&validate_content(&draft, &catalog)),
            vec!["sections.about.content"]
        );
    }

    #[test]
    fn test_content_shape_checks() {
        let catalog = StaticCatalog::new();
        let draft = DraftConfiguration {
            sections: vec![
                SectionConfiguration::new("hero", true, 1)
                    .with_data(json!({ "title": "Hola", "ctaLink": "not a link" })),
                SectionConfiguration::new("contact", true, 2)
                    .with_data(json!({ "email": "nobody", "showForm": "yes" })),
                SectionConfiguration::new("services", true, 3)
                    .with_data(json!({ "title": "Servicios", "items": [] })),
                SectionConfiguration::new("products", true, 4).with_data(json!("oops")),
            ],
            ..Default::default()
        };
        assert_eq!(
            fields(&validate_content(&draft, &catalog)),
            vec![
                "sections.hero.ctaLink",
                "sections.contact.email",
                "sections.contact.showForm",
                "sections.services.items",
                "sections.products",
            ]
        );
    }
}
