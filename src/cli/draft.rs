// ABOUTME: CLI init and validate commands for TOML draft files

use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;

use super::util::{build_client, catalog_for, parse_client_id, print_json};
use super::{InitArgs, OutputFormat, ValidateArgs};
use crate::catalog::SectionCatalog;
use crate::config::AppConfig;
use crate::draft::DraftFile;
use crate::error::ValidationIssue;
use crate::wizard::{validate_step, WizardStep};

/// Execute the init command
pub async fn init(args: InitArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    let client_id = args.client_id.as_deref().map(parse_client_id).transpose()?;
    let client = build_client(config)?;
    let catalog = catalog_for(config, &client, false).await?;

    let template = DraftFile::template(catalog.as_ref(), client_id.as_ref());
    template.save(&args.path)?;

    match format {
        OutputFormat::Json => print_json(&template)?,
        OutputFormat::Text => {
            println!("Draft written to {}", args.path.display());
            println!("Fill in basic_info and section data, then run: portal validate {}", args.path.display());
        }
    }
    Ok(())
}

/// Issues for one wizard step
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: WizardStep,
    pub title: &'static str,
    pub issues: Vec<ValidationIssue>,
}

/// Validate a draft file step by step
pub fn check_draft(path: &Path, catalog: &dyn SectionCatalog) -> Result<Vec<StepReport>> {
    let store = DraftFile::load(path)?.into_store(catalog)?;
    Ok(WizardStep::all()
        .iter()
        .map(|step| StepReport {
            step: *step,
            title: step.title(),
            issues: validate_step(*step, store.draft(), catalog, None),
        })
        .collect())
}

/// Execute the validate command
pub async fn validate(args: ValidateArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client = build_client(config)?;
    let catalog = catalog_for(config, &client, false).await?;
    let reports = check_draft(&args.path, catalog.as_ref())?;
    let total: usize = reports.iter().map(|r| r.issues.len()).sum();

    match format {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            for report in &reports {
                let marker = if report.issues.is_empty() { "ok" } else { "FAIL" };
                println!(
                    "Step {}/{} {:<20} {}",
                    report.step.number(),
                    WizardStep::total(),
                    report.title,
                    marker
                );
                for issue in &report.issues {
                    println!("    {issue}");
                }
            }
        }
    }

    if total > 0 {
        bail!("{total} validation issue(s) in {}", args.path.display());
    }
    Ok(())
}
