// ABOUTME: CLI sections command - list the section catalog
//
// With --remote, lists the service's catalog and how it lines up with the built-in one

use anyhow::Result;
use serde::Serialize;

use super::util::{build_client, catalog_for, fit_column, print_json};
use super::{OutputFormat, SectionsArgs};
use crate::catalog::{reconcile, Reconciliation, SectionCatalog, StaticCatalog};
use crate::config::AppConfig;
use crate::models::Section;

#[derive(Serialize)]
struct SectionsReport<'a> {
    sections: &'a [Section],
    #[serde(skip_serializing_if = "Option::is_none")]
    reconciliation: Option<Reconciliation>,
}

/// Execute the sections command
pub async fn execute(args: SectionsArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client = build_client(config)?;
    let catalog = catalog_for(config, &client, args.remote).await?;

    let reconciliation = args
        .remote
        .then(|| reconcile(&StaticCatalog::new(), catalog.list_sections()));

    let report = SectionsReport {
        sections: catalog.list_sections(),
        reconciliation,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => output_text(&report),
    }
    Ok(())
}

fn output_text(report: &SectionsReport<'_>) {
    if report.sections.is_empty() {
        println!("No sections available.");
        return;
    }

    println!("{:<5} {:<14} {:<20} {:<10} REQUIRED", "ORDER", "ID", "NAME", "CATEGORY");
    println!("{}", "-".repeat(62));
    for section in report.sections {
        println!(
            "{:<5} {} {} {:<10} {}",
            section.default_order,
            fit_column(&section.id, 14),
            fit_column(&section.name, 20),
            section.category.label(),
            if section.required { "yes" } else { "" }
        );
    }

    if let Some(reconciliation) = &report.reconciliation {
        if !reconciliation.remote_only.is_empty() {
            println!();
            println!("Only on the service: {}", reconciliation.remote_only.join(", "));
        }
        if !reconciliation.local_only.is_empty() {
            println!("Missing from the service: {}", reconciliation.local_only.join(", "));
        }
    }
}
