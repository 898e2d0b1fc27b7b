// ABOUTME: CLI fetch, delete, preview and render commands against published sites

use anyhow::{bail, Context, Result};
use std::fs;

use super::util::{build_client, print_json, parse_client_id};
use super::{ClientArgs, DeleteArgs, FetchArgs, OutputFormat, RenderArgs};
use crate::api::PersistenceApi;
use crate::config::AppConfig;
use crate::draft::{DraftFile, DraftStore};
use crate::models::ClientConfiguration;

/// Execute the fetch command
pub async fn fetch(args: FetchArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client_id = parse_client_id(&args.client_id)?;
    let client = build_client(config)?;
    let published = client.fetch(&client_id).await?;

    if let Some(path) = &args.output {
        let store = DraftStore::load_existing(published.clone());
        DraftFile::from_draft(store.draft()).save(path)?;
        if format == OutputFormat::Text {
            println!("Draft saved to {}", path.display());
        }
    }

    match format {
        OutputFormat::Json => print_json(&published)?,
        OutputFormat::Text => output_text(&published),
    }
    Ok(())
}

fn output_text(config: &ClientConfiguration) {
    println!("Client:   {}", config.client_id);
    println!("Name:     {}", config.name);
    println!("Style:    {}", config.style.as_str());
    println!("Domain:   {}", config.domain.active_value().unwrap_or("-"));
    println!("Updated:  {}", config.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Sections:");
    let mut sections: Vec<_> = config.sections.iter().filter(|s| s.enabled).collect();
    sections.sort_by_key(|s| s.order);
    for section in sections {
        println!("  {:>2}. {}", section.order, section.section_id);
    }
}

/// Execute the delete command
pub async fn delete(args: DeleteArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client_id = parse_client_id(&args.client_id)?;
    if !args.yes {
        bail!("Refusing to delete '{client_id}' without --yes");
    }
    let client = build_client(config)?;
    client.remove(&client_id).await?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "deleted": client_id }))?,
        OutputFormat::Text => println!("Deleted '{client_id}'"),
    }
    Ok(())
}

/// Execute the preview command
pub async fn preview(args: ClientArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client_id = parse_client_id(&args.client_id)?;
    let client = build_client(config)?;
    let snapshot = client.preview(&client_id).await?;

    match format {
        OutputFormat::Json => print_json(&snapshot)?,
        OutputFormat::Text => {
            println!("Preview of '{}'", snapshot.client_id);
            if let Some(url) = &snapshot.preview_url {
                println!("URL: {url}");
            }
            if let Some(html) = &snapshot.html {
                println!("HTML: {} bytes", html.len());
            }
            println!("Sections: {}", snapshot.sections.len());
        }
    }
    Ok(())
}

/// Execute the render command
pub async fn render(args: RenderArgs, config: &AppConfig) -> Result<()> {
    let client_id = parse_client_id(&args.client_id)?;
    let client = build_client(config)?;
    let site = client.render(&client_id).await?;

    match &args.output {
        Some(path) => {
            fs::write(path, &site.html)
                .with_context(|| format!("Failed to write HTML to {}", path.display()))?;
            println!("Rendered '{}' to {}", site.client_id, path.display());
        }
        None => println!("{}", site.html),
    }
    Ok(())
}
