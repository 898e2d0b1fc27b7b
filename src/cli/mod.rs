// ABOUTME: CLI argument parsing and command routing for portal
//
// Provides command-line interface for:
// - Browsing the section catalog (sections)
// - Preparing and checking draft files (init, validate)
// - Publishing drafts through the wizard (publish)
// - Managing published sites (fetch, delete, preview, render)
// - Checking the persistence service (status)
// - Inspecting and saving the merged configuration (config)

pub mod config;
pub mod draft;
pub mod publish;
pub mod remote;
pub mod sections;
pub mod status;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Portal builder - configure and publish client sites
#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Also log to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the available sections
    Sections(SectionsArgs),

    /// Write a starter draft file
    Init(InitArgs),

    /// Check a draft file against every wizard step
    Validate(ValidateArgs),

    /// Walk a draft through the wizard and publish it
    Publish(PublishArgs),

    /// Show a published configuration
    Fetch(FetchArgs),

    /// Delete a published configuration
    Delete(DeleteArgs),

    /// Show the preview snapshot of a published site
    Preview(ClientArgs),

    /// Render a published site to HTML
    Render(RenderArgs),

    /// Check service availability and the current user
    Status,

    /// Show the merged configuration
    Config(ConfigArgs),
}

/// Arguments for the sections command
#[derive(clap::Args)]
pub struct SectionsArgs {
    /// Read the catalog from the persistence API instead of the built-in one
    #[arg(long)]
    pub remote: bool,
}

/// Arguments for the init command
#[derive(clap::Args)]
pub struct InitArgs {
    /// Where to write the draft
    pub path: PathBuf,

    /// Client identifier to pre-fill
    #[arg(long)]
    pub client_id: Option<String>,

    /// Overwrite an existing file
    #[arg(long, short)]
    pub force: bool,
}

/// Arguments for the validate command
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Draft file to check
    pub path: PathBuf,
}

/// Arguments for the publish command
#[derive(clap::Args)]
pub struct PublishArgs {
    /// Draft file to publish
    pub path: PathBuf,

    /// Update the existing site with this draft's client id instead of creating one
    #[arg(long)]
    pub update: bool,
}

/// Arguments for the fetch command
#[derive(clap::Args)]
pub struct FetchArgs {
    /// Client identifier
    pub client_id: String,

    /// Save the configuration as a draft file for editing
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for the delete command
#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Client identifier
    pub client_id: String,

    /// Required to actually delete
    #[arg(long, short)]
    pub yes: bool,
}

/// Arguments for commands taking only a client id
#[derive(clap::Args)]
pub struct ClientArgs {
    /// Client identifier
    pub client_id: String,
}

/// Arguments for the render command
#[derive(clap::Args)]
pub struct RenderArgs {
    /// Client identifier
    pub client_id: String,

    /// Write the HTML to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Write the merged configuration to the user config file
    #[arg(long)]
    pub save: bool,
}
