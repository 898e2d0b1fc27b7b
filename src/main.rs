// ABOUTME: Main entry point for the portal site-builder CLI
//
// Binary: portal
// Usage: portal <COMMAND>
// - sections: list the section catalog
// - init / validate: prepare and check a draft file
// - publish: walk a draft through the wizard and submit it
// - fetch / delete / preview / render: manage published sites
// - status: probe the persistence service
// - config: show or save the merged configuration

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;

use portal_builder::cli::{self, Commands};
use portal_builder::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = AppConfig::load()?;
    setup_logging(&config.log_dir()?, args.verbose)?;
    setup_panic_handler();

    tracing::debug!("Loaded configuration for {}", config.api.base_url);

    match args.command {
        Commands::Sections(sections_args) => {
            cli::sections::execute(sections_args, &config, args.format).await
        }
        Commands::Init(init_args) => cli::draft::init(init_args, &config, args.format).await,
        Commands::Validate(validate_args) => {
            cli::draft::validate(validate_args, &config, args.format).await
        }
        Commands::Publish(publish_args) => {
            cli::publish::execute(publish_args, &config, args.format).await
        }
        Commands::Fetch(fetch_args) => cli::remote::fetch(fetch_args, &config, args.format).await,
        Commands::Delete(delete_args) => {
            cli::remote::delete(delete_args, &config, args.format).await
        }
        Commands::Preview(preview_args) => {
            cli::remote::preview(preview_args, &config, args.format).await
        }
        Commands::Render(render_args) => cli::remote::render(render_args, &config).await,
        Commands::Status => cli::status::execute(&config, args.format).await,
        Commands::Config(config_args) => {
            cli::config::execute(config_args, &config, args.format)
        }
    }
}

fn setup_logging(log_dir: &Path, verbose: bool) -> Result<()> {
    use tracing_subscriber::prelude::*;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "portal-builder-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file: {}", log_file.display()))?;

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json() // Output in JSON Lines format
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(stderr_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_builder=info".into()),
        )
        .init();

    Ok(())
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
