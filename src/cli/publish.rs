// ABOUTME: CLI publish command - walk a draft file through the wizard and submit it
//
// Each step must validate before the next; submission uses create, or update with --update

use anyhow::{bail, Context, Result};
use tracing::info;

use super::util::{build_client, catalog_for, print_json, resolve_user};
use super::{OutputFormat, PublishArgs};
use crate::api::PersistenceApi;
use crate::config::AppConfig;
use crate::draft::DraftFile;
use crate::wizard::{StepOutcome, SubmissionOutcome, WizardController};

/// Execute the publish command
pub async fn execute(args: PublishArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client = build_client(config)?;
    let catalog = catalog_for(config, &client, false).await?;

    let mut store = DraftFile::load(&args.path)?.into_store(catalog.as_ref())?;
    if args.update {
        store.target_existing()?;
        if let Some(client_id) = store.draft().client_id.clone() {
            // Fail early with NotFound instead of after the wizard walk
            client
                .fetch(&client_id)
                .await
                .with_context(|| format!("Cannot update '{client_id}'"))?;
        }
    }

    let mut wizard = WizardController::with_store(store, catalog);
    wizard.set_user(resolve_user(config, &client).await?);

    loop {
        match wizard.next() {
            StepOutcome::Advanced(step) => {
                info!("Draft passed into step {}", step.number());
            }
            StepOutcome::ReadyToSubmit => break,
            StepOutcome::Blocked(issues) => {
                let step = wizard.current_step();
                eprintln!("Step {} ({}) is incomplete:", step.number(), step.title());
                for issue in &issues {
                    eprintln!("    {issue}");
                }
                bail!("{} validation issue(s) in {}", issues.len(), args.path.display());
            }
        }
    }

    let outcome = match wizard.submit(&client).await {
        Ok(outcome) => outcome,
        Err(err) => {
            if err.is_recoverable() {
                eprintln!(
                    "{} was not changed; fix the problem above and run publish again",
                    args.path.display()
                );
            }
            return Err(err).context("Submission failed");
        }
    };

    match outcome {
        SubmissionOutcome::Published(published) => match format {
            OutputFormat::Json => print_json(&published)?,
            OutputFormat::Text => {
                let verb = if args.update { "Updated" } else { "Published" };
                println!("{verb} '{}' ({})", published.client_id, published.name);
                if let Some(host) = published.domain.active_value() {
                    println!("Domain: {host}");
                }
                println!("Sections: {}", published.sections.len());
            }
        },
        SubmissionOutcome::Discarded => bail!("Submission was discarded"),
    }
    Ok(())
}
