// ABOUTME: Builds the create/update payload from a completed draft
// Last point that guarantees the wire section list is contiguous 1..N

use tracing::debug;

use crate::catalog::SectionCatalog;
use crate::draft::DraftConfiguration;
use crate::error::{BuilderError, BuilderResult};
use crate::models::{CreateClientRequest, SectionConfiguration};
use crate::ordering;

/// Assemble the wire payload; only enabled sections are sent, renumbered in display order.
///
/// Each section carries the data it was validated against, so catalog
/// defaults are written out for sections the user never filled in.
pub fn build_payload(
    draft: &DraftConfiguration,
    catalog: &dyn SectionCatalog,
) -> BuilderResult<CreateClientRequest> {
    let enabled: Vec<SectionConfiguration> = draft
        .sections
        .iter()
        .filter(|c| c.enabled)
        .map(|config| with_resolved_data(config, catalog))
        .collect();

    let mut missing = Vec::new();
    if draft.client_id.is_none() {
        missing.push("clientId");
    }
    if draft.basic_info.is_none() {
        missing.push("basicInfo");
    }
    if enabled.is_empty() {
        missing.push("sections");
    }

    let (Some(client_id), Some(info), false) =
        (draft.client_id.clone(), draft.basic_info.clone(), enabled.is_empty())
    else {
        return Err(BuilderError::IncompleteDraft { missing });
    };

    let sections = ordering::normalize(&enabled);
    debug!(
        "Assembled payload for '{}' with {} sections",
        client_id,
        sections.len()
    );

    Ok(CreateClientRequest {
        client_id,
        name: info.company.name.clone(),
        description: info.company.description.clone(),
        style: info.style,
        sections,
        company: info.company,
        theme: info.theme,
        domain: info.domain,
    })
}

fn with_resolved_data(
    config: &SectionConfiguration,
    catalog: &dyn SectionCatalog,
) -> SectionConfiguration {
    let mut resolved = config.clone();
    if let Ok(section) = catalog.get_section(&config.section_id) {
        resolved.data = config.effective_data(section).cloned();
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::models::{BasicInfo, ClientId, CompanyInfo, DomainConfig, SiteStyle, ThemeConfig};
    use pretty_assertions::assert_eq;

    fn complete_draft() -> DraftConfiguration {
        DraftConfiguration {
            client_id: Some(ClientId::parse("taller-ruiz").unwrap()),
            basic_info: Some(BasicInfo {
                style: SiteStyle::Minimalista,
                company: CompanyInfo {
                    name: "Taller Ruiz".to_string(),
                    tagline: "Reparaciones".to_string(),
                    description: "Taller mecánico familiar".to_string(),
                    logo: None,
                    favicon: None,
                },
                theme: ThemeConfig::for_style(SiteStyle::Minimalista),
                domain: DomainConfig::subdomain("taller-ruiz"),
            }),
            sections: vec![
                SectionConfiguration::new("hero", true, 1),
                SectionConfiguration::new("faq", false, 8),
                SectionConfiguration::new("contact", true, 3),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_basic_info_is_incomplete() {
        let mut draft = complete_draft();
        draft.basic_info = None;
        match build_payload(&draft, &StaticCatalog::new()) {
            Err(BuilderError::IncompleteDraft { missing }) => assert_eq!(missing, vec!["basicInfo"]),
            other => panic!("expected IncompleteDraft, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_draft_lists_everything_missing() {
        match build_payload(&DraftConfiguration::default(), &StaticCatalog::new()) {
            Err(BuilderError::IncompleteDraft { missing }) => {
                assert_eq!(missing, vec!["clientId", "basicInfo", "sections"]);
            }
            other => panic!("expected IncompleteDraft, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_sends_enabled_sections_contiguously() {
        let payload = build_payload(&complete_draft(), &StaticCatalog::from_sections(Vec::new())).unwrap();
        assert_eq!(
            payload.sections,
            vec![
                SectionConfiguration::new("hero", true, 1),
                SectionConfiguration::new("contact", true, 2),
            ]
        );
        assert_eq!(payload.name, "Taller Ruiz");
        assert_eq!(payload.description, "Taller mecánico familiar");
        assert_eq!(payload.style, SiteStyle::Minimalista);
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = build_payload(&complete_draft(), &StaticCatalog::from_sections(Vec::new())).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["clientId"], "taller-ruiz");
        assert_eq!(json["sections"][1]["sectionId"], "contact");
        assert_eq!(json["domain"]["type"], "subdominio");
    }

    #[test]
    fn test_payload_carries_validated_data() {
        let mut draft = complete_draft();
        draft.sections[2] = SectionConfiguration::new("contact", true, 3)
            .with_data(serde_json::json!({ "email": "hola@tallerruiz.mx" }));

        let payload = build_payload(&draft, &StaticCatalog::new()).unwrap();

        let hero = payload.sections[0].data.as_ref().expect("hero falls back to catalog data");
        assert_eq!(hero["title"], "Bienvenidos");
        assert_eq!(
            payload.sections[1].data,
            Some(serde_json::json!({ "email": "hola@tallerruiz.mx" }))
        );
    }
}
