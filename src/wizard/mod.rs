// ABOUTME: Wizard step controller - gates navigation on validation and drives submission
// Submissions are tagged with the draft session so late responses after a reset are dropped

pub mod step;
pub mod validation;

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{build_payload, PersistenceApi};
use crate::catalog::SectionCatalog;
use crate::draft::{initial_sections, DraftConfiguration, DraftOrigin, DraftStore, SessionTicket};
use crate::error::{BuilderError, BuilderResult, ValidationIssue};
use crate::models::{BasicInfo, ClientConfiguration, ClientId, CreateClientRequest, CurrentUser};
use crate::ordering::Direction;

pub use step::WizardStep;
pub use validation::{validate_all, validate_step};

/// Result of asking the wizard to move forward
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced(WizardStep),
    /// Current step's rules are unmet; the step did not change
    Blocked(Vec<ValidationIssue>),
    /// At the preview step with every rule satisfied
    ReadyToSubmit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Published(ClientConfiguration),
    /// The draft was reset while the request was in flight
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(ClientId),
}

/// Identity of whoever is driving the wizard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserContext {
    /// No identity lookup configured; the service enforces its own access rules
    #[default]
    Unchecked,
    Anonymous,
    User(CurrentUser),
}

impl UserContext {
    fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    /// Refuse publishing for signed-out, inactive and read-only users
    pub fn ensure_can_publish(&self) -> BuilderResult<()> {
        match self {
            Self::Unchecked => Ok(()),
            Self::Anonymous => Err(BuilderError::InvalidOperation(
                "sign in to publish this site".to_string(),
            )),
            Self::User(user) if !user.is_active() => Err(BuilderError::InvalidOperation(
                "this account is not active".to_string(),
            )),
            Self::User(user) if !user.can_publish() => Err(BuilderError::InvalidOperation(
                "this account can edit drafts but not publish them".to_string(),
            )),
            Self::User(_) => Ok(()),
        }
    }
}

/// A validated payload waiting to be sent
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SessionTicket,
    pub payload: CreateClientRequest,
    pub target: SubmitTarget,
}

impl PendingSubmission {
    pub async fn send<A>(&self, api: &A) -> BuilderResult<ClientConfiguration>
    where
        A: PersistenceApi + ?Sized,
    {
        match &self.target {
            SubmitTarget::Create => api.create(&self.payload).await,
            SubmitTarget::Update(client_id) => api.update(client_id, &self.payload).await,
        }
    }
}

/// State machine over the four wizard steps
pub struct WizardController {
    store: DraftStore,
    catalog: Arc<dyn SectionCatalog>,
    user: UserContext,
    furthest: WizardStep,
}

impl WizardController {
    /// Fresh wizard at step 1 with the required sections enabled
    pub fn new(catalog: Arc<dyn SectionCatalog>) -> Self {
        let mut store = DraftStore::new();
        store.set_selected_sections(initial_sections(catalog.as_ref()));
        Self {
            store,
            catalog,
            user: UserContext::Unchecked,
            furthest: WizardStep::Sections,
        }
    }

    /// Wizard over an already-populated store; published drafts may jump to any step
    pub fn with_store(store: DraftStore, catalog: Arc<dyn SectionCatalog>) -> Self {
        let furthest = match store.origin() {
            DraftOrigin::Existing(_) => WizardStep::Preview,
            DraftOrigin::New => store.draft().current_step,
        };
        Self {
            store,
            catalog,
            user: UserContext::Unchecked,
            furthest,
        }
    }

    /// Edit a published configuration
    pub fn edit(config: ClientConfiguration, catalog: Arc<dyn SectionCatalog>) -> Self {
        Self::with_store(DraftStore::load_existing(config), catalog)
    }

    pub fn set_user(&mut self, user: UserContext) {
        self.user = user;
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn draft(&self) -> &DraftConfiguration {
        self.store.draft()
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn catalog(&self) -> &dyn SectionCatalog {
        self.catalog.as_ref()
    }

    pub fn current_step(&self) -> WizardStep {
        self.store.draft().current_step
    }

    /// Highest step reached through validated forward moves
    pub fn furthest_step(&self) -> WizardStep {
        self.furthest
    }

    pub fn validate_current(&self) -> Vec<ValidationIssue> {
        validate_step(
            self.current_step(),
            self.store.draft(),
            self.catalog.as_ref(),
            self.user.user(),
        )
    }

    pub fn validate_all(&self) -> Vec<ValidationIssue> {
        validate_all(self.store.draft(), self.catalog.as_ref(), self.user.user())
    }

    fn block(&mut self, issues: Vec<ValidationIssue>) -> StepOutcome {
        let summary = BuilderError::ValidationFailure(issues.clone()).to_string();
        warn!(
            "Step {} blocked with {} issue(s)",
            self.current_step().number(),
            issues.len()
        );
        self.store.set_error(Some(summary));
        StepOutcome::Blocked(issues)
    }

    /// Advance one step if the current step validates
    pub fn next(&mut self) -> StepOutcome {
        let step = self.current_step();
        let issues = match step {
            WizardStep::Preview => self.validate_all(),
            _ => self.validate_current(),
        };
        if !issues.is_empty() {
            return self.block(issues);
        }
        self.store.set_error(None);

        let Some(next) = step.next() else {
            return StepOutcome::ReadyToSubmit;
        };
        self.store.set_current_step(next);
        self.furthest = self.furthest.max(next);
        info!("Wizard advanced to step {} ({})", next.number(), next.title());
        StepOutcome::Advanced(next)
    }

    /// Step back without validating; `None` at step 1
    pub fn previous(&mut self) -> Option<WizardStep> {
        let previous = self.current_step().previous()?;
        self.store.set_current_step(previous);
        Some(previous)
    }

    /// Jump to a step no further than the furthest validated one
    pub fn go_to(&mut self, step: WizardStep) -> BuilderResult<()> {
        if step > self.furthest {
            let err = BuilderError::InvalidOperation(format!(
                "step {} has not been reached yet",
                step.number()
            ));
            self.store.set_error(Some(err.to_string()));
            return Err(err);
        }
        self.store.set_current_step(step);
        self.store.set_error(None);
        Ok(())
    }

    fn record<T>(&mut self, result: BuilderResult<T>) -> BuilderResult<T> {
        match &result {
            Ok(_) => self.store.set_error(None),
            Err(err) => {
                warn!("Draft operation rejected: {}", err);
                self.store.set_error(Some(err.to_string()));
            }
        }
        result
    }

    pub fn toggle_section(&mut self, section_id: &str, enabled: bool) -> BuilderResult<()> {
        let result = self.check_category(section_id, enabled).and_then(|()| {
            self.store
                .set_section_enabled(section_id, enabled, self.catalog.as_ref())
        });
        self.record(result)
    }

    fn check_category(&self, section_id: &str, enabled: bool) -> BuilderResult<()> {
        let Some(user) = self.user.user() else {
            return Ok(());
        };
        if !enabled {
            return Ok(());
        }
        let section = self.catalog.get_section(section_id)?;
        if user.can_use_category(section.category) {
            Ok(())
        } else {
            Err(BuilderError::InvalidOperation(format!(
                "{} sections are not available for this account",
                section.category.label()
            )))
        }
    }

    pub fn move_section(&mut self, section_id: &str, direction: Direction) {
        self.store.move_section(section_id, direction);
        self.store.set_error(None);
    }

    /// Replace the basic info; a client id is suggested from the company name when none is set
    pub fn set_basic_info(&mut self, info: BasicInfo) {
        if self.store.draft().client_id.is_none() {
            if let Some(suggested) = ClientId::suggest(&info.company.name) {
                info!("Suggested client id '{}'", suggested);
                self.store.set_client_id(Some(suggested));
            }
        }
        self.store.set_basic_info(Some(info));
        self.store.set_error(None);
    }

    /// Assign the client id; published drafts keep the id they were loaded with
    pub fn set_client_id(&mut self, value: &str) -> BuilderResult<()> {
        let result = ClientId::parse(value).and_then(|client_id| match self.store.origin() {
            DraftOrigin::Existing(existing) if *existing != client_id => {
                Err(BuilderError::InvalidOperation(format!(
                    "published site '{existing}' cannot be renamed"
                )))
            }
            _ => Ok(client_id),
        });
        let result = self.record(result)?;
        self.store.set_client_id(Some(result));
        Ok(())
    }

    pub fn set_section_data(&mut self, section_id: &str, data: Option<Value>) -> BuilderResult<()> {
        let result = self.store.set_section_data(section_id, data);
        self.record(result)
    }

    /// Validate everything, build the payload and mark the draft as loading
    pub fn begin_submission(&mut self) -> BuilderResult<PendingSubmission> {
        let result = self.prepare_submission();
        let pending = self.record(result)?;
        self.store.set_loading(true);
        info!(
            "Submitting '{}' for session {}",
            pending.payload.client_id,
            pending.ticket.id()
        );
        Ok(pending)
    }

    fn prepare_submission(&self) -> BuilderResult<PendingSubmission> {
        if self.current_step() != WizardStep::Preview {
            return Err(BuilderError::InvalidOperation(
                "submission is only available from the preview step".to_string(),
            ));
        }
        if self.store.draft().loading {
            return Err(BuilderError::InvalidOperation(
                "a submission is already in flight".to_string(),
            ));
        }
        self.user.ensure_can_publish()?;

        let issues = self.validate_all();
        if !issues.is_empty() {
            return Err(BuilderError::ValidationFailure(issues));
        }

        let payload = build_payload(self.store.draft(), self.catalog.as_ref())?;
        let target = match self.store.origin() {
            DraftOrigin::New => SubmitTarget::Create,
            DraftOrigin::Existing(client_id) => SubmitTarget::Update(client_id.clone()),
        };
        Ok(PendingSubmission {
            ticket: self.store.ticket(),
            payload,
            target,
        })
    }

    /// Apply a remote result if its session is still current
    pub fn complete_submission(
        &mut self,
        ticket: SessionTicket,
        result: BuilderResult<ClientConfiguration>,
    ) -> BuilderResult<SubmissionOutcome> {
        if !self.store.is_current(ticket) {
            warn!(
                "Discarding submission response for stale session {}",
                ticket.id()
            );
            return Ok(SubmissionOutcome::Discarded);
        }

        self.store.set_loading(false);
        match result {
            Ok(config) => {
                info!("Published '{}'", config.client_id);
                self.reset();
                Ok(SubmissionOutcome::Published(config))
            }
            Err(err) => {
                warn!("Submission failed: {}", err);
                self.store.set_error(Some(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn submit<A>(&mut self, api: &A) -> BuilderResult<SubmissionOutcome>
    where
        A: PersistenceApi + ?Sized,
    {
        let pending = self.begin_submission()?;
        let result = pending.send(api).await;
        self.complete_submission(pending.ticket, result)
    }

    /// Abandon the draft and start over at step 1
    pub fn reset(&mut self) {
        self.store.reset();
        self.store
            .set_selected_sections(initial_sections(self.catalog.as_ref()));
        self.furthest = WizardStep::Sections;
    }
}
