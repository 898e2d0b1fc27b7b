// ABOUTME: Draft configuration store - the wizard's working document
// Whole-value setters expressed as a tagged union of update actions

use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::SectionCatalog;
use crate::error::{BuilderError, BuilderResult};
use crate::models::{BasicInfo, ClientConfiguration, ClientId, SectionConfiguration};
use crate::ordering::{self, Direction};
use crate::wizard::WizardStep;

pub mod file;

pub use file::{DraftFile, DraftSectionEntry};

/// In-progress wizard state
#[derive(Debug, Clone, PartialEq)]
pub struct DraftConfiguration {
    pub current_step: WizardStep,
    pub client_id: Option<ClientId>,
    pub basic_info: Option<BasicInfo>,
    pub sections: Vec<SectionConfiguration>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DraftConfiguration {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Sections,
            client_id: None,
            basic_info: None,
            sections: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl DraftConfiguration {
    pub fn enabled_sections(&self) -> Vec<&SectionConfiguration> {
        ordering::enabled_in_order(&self.sections)
    }
}

/// One whole-value replacement of a draft field
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    SetCurrentStep(WizardStep),
    SetClientId(Option<ClientId>),
    SetBasicInfo(Option<BasicInfo>),
    SetSelectedSections(Vec<SectionConfiguration>),
    SetLoading(bool),
    SetError(Option<String>),
    Reset,
}

/// Whether the draft creates a new site or edits a published one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOrigin {
    New,
    Existing(ClientId),
}

/// Identity of a draft session, attached to in-flight requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTicket(Uuid);

impl SessionTicket {
    pub fn id(&self) -> Uuid {
        self.0
    }
}

/// Sections a fresh draft starts with: every required catalog section, enabled
pub fn initial_sections(catalog: &dyn SectionCatalog) -> Vec<SectionConfiguration> {
    let configurations: Vec<SectionConfiguration> = catalog
        .required_sections()
        .into_iter()
        .map(|s| SectionConfiguration::new(s.id.clone(), true, s.default_order))
        .collect();
    ordering::normalize(&configurations)
}

/// Owner of the draft document for one wizard session
#[derive(Debug)]
pub struct DraftStore {
    draft: DraftConfiguration,
    session: Uuid,
    origin: DraftOrigin,
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            draft: DraftConfiguration::default(),
            session: Uuid::new_v4(),
            origin: DraftOrigin::New,
        }
    }

    /// Seed a draft from a published configuration for editing
    pub fn load_existing(config: ClientConfiguration) -> Self {
        let basic_info = BasicInfo {
            company: config.company,
            style: config.style,
            theme: config.theme,
            domain: config.domain,
        };
        let mut store = Self::new();
        store.origin = DraftOrigin::Existing(config.client_id.clone());
        store.draft.client_id = Some(config.client_id);
        store.draft.basic_info = Some(basic_info);
        store.draft.sections = ordering::normalize(&config.sections);
        info!(
            "Loaded existing configuration into draft session {}",
            store.session
        );
        store
    }

    pub fn draft(&self) -> &DraftConfiguration {
        &self.draft
    }

    pub fn origin(&self) -> &DraftOrigin {
        &self.origin
    }

    /// Mark the draft as editing the published site it names
    pub fn target_existing(&mut self) -> BuilderResult<()> {
        let client_id = self
            .draft
            .client_id
            .clone()
            .ok_or(BuilderError::IncompleteDraft {
                missing: vec!["clientId"],
            })?;
        self.origin = DraftOrigin::Existing(client_id);
        Ok(())
    }

    pub fn ticket(&self) -> SessionTicket {
        SessionTicket(self.session)
    }

    /// Whether a ticket was issued by the current session
    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        ticket.0 == self.session
    }

    pub fn apply(&mut self, action: DraftAction) {
        match action {
            DraftAction::SetCurrentStep(step) => self.draft.current_step = step,
            DraftAction::SetClientId(client_id) => self.draft.client_id = client_id,
            DraftAction::SetBasicInfo(basic_info) => self.draft.basic_info = basic_info,
            DraftAction::SetSelectedSections(sections) => self.draft.sections = sections,
            DraftAction::SetLoading(loading) => self.draft.loading = loading,
            DraftAction::SetError(error) => self.draft.error = error,
            DraftAction::Reset => {
                self.draft = DraftConfiguration::default();
                self.session = Uuid::new_v4();
                self.origin = DraftOrigin::New;
                info!("Draft reset, new session {}", self.session);
            }
        }
    }

    pub fn set_current_step(&mut self, step: WizardStep) {
        self.apply(DraftAction::SetCurrentStep(step));
    }

    pub fn set_client_id(&mut self, client_id: Option<ClientId>) {
        self.apply(DraftAction::SetClientId(client_id));
    }

    pub fn set_basic_info(&mut self, basic_info: Option<BasicInfo>) {
        self.apply(DraftAction::SetBasicInfo(basic_info));
    }

    pub fn set_selected_sections(&mut self, sections: Vec<SectionConfiguration>) {
        self.apply(DraftAction::SetSelectedSections(sections));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.apply(DraftAction::SetLoading(loading));
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.apply(DraftAction::SetError(error));
    }

    pub fn reset(&mut self) {
        self.apply(DraftAction::Reset);
    }

    pub fn move_section(&mut self, section_id: &str, direction: Direction) {
        let sections = ordering::move_section(&self.draft.sections, section_id, direction);
        self.set_selected_sections(sections);
    }

    pub fn set_section_enabled(
        &mut self,
        section_id: &str,
        enabled: bool,
        catalog: &dyn SectionCatalog,
    ) -> BuilderResult<()> {
        let sections = ordering::set_enabled(&self.draft.sections, section_id, enabled, catalog)?;
        self.set_selected_sections(sections);
        Ok(())
    }

    /// Replace the data payload of one section
    pub fn set_section_data(&mut self, section_id: &str, data: Option<Value>) -> BuilderResult<()> {
        let mut sections = self.draft.sections.clone();
        let config = sections
            .iter_mut()
            .find(|c| c.section_id == section_id)
            .ok_or_else(|| BuilderError::section_not_found(section_id))?;
        config.data = data;
        debug!("Updated data for section '{}'", section_id);
        self.set_selected_sections(sections);
        Ok(())
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
