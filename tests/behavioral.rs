// ABOUTME: Behavioral test suite for the site configuration engine
//
// These tests drive the public library API the way the CLI does:
// - order_engine: section ordering invariants and scenarios
// - wizard_flow: step gating, submission and stale-response handling
// - draft_files: TOML drafts through the wizard
// - config_loading: layered configuration and env overrides

#[path = "behavioral/fixtures.rs"]
pub mod fixtures;

#[path = "behavioral/order_engine.rs"]
mod order_engine;

#[path = "behavioral/wizard_flow.rs"]
mod wizard_flow;

#[path = "behavioral/draft_files.rs"]
mod draft_files;

#[path = "behavioral/config_loading.rs"]
mod config_loading;
