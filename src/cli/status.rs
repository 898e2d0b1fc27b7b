// ABOUTME: CLI status command - probe the persistence service and show the current user

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use super::util::{build_client, print_json};
use super::OutputFormat;
use crate::cache::{BoundaryCaches, ServiceStatus};
use crate::config::AppConfig;
use crate::models::CurrentUser;
use crate::wizard::UserContext;

#[derive(Serialize)]
struct StatusReport {
    base_url: String,
    reachable: bool,
    status_code: Option<u16>,
    user: Option<CurrentUser>,
    can_publish: bool,
}

impl StatusReport {
    fn new(base_url: &str, status: &ServiceStatus, user: &UserContext) -> Self {
        let (user, can_publish) = match user {
            UserContext::User(user) => (Some(user.clone()), user.can_publish()),
            UserContext::Anonymous => (None, false),
            UserContext::Unchecked => (None, false),
        };
        Self {
            base_url: base_url.to_string(),
            reachable: status.reachable,
            status_code: status.status_code,
            user,
            can_publish,
        }
    }
}

/// Execute the status command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let client = build_client(config)?;
    let mut caches = BoundaryCaches::from_config(&config.cache);

    let status = caches.status.status(&client).await;
    let user = if status.reachable {
        match caches.user.resolve(&client).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Current user lookup failed: {}", e);
                UserContext::Unchecked
            }
        }
    } else {
        UserContext::Unchecked
    };
    let report = StatusReport::new(&config.api.base_url, &status, &user);

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            let state = if report.reachable { "reachable" } else { "unreachable" };
            match report.status_code {
                Some(code) => println!("Service:  {} ({state}, HTTP {code})", report.base_url),
                None => println!("Service:  {} ({state})", report.base_url),
            }
            match (&report.user, &user) {
                (Some(user), _) => println!(
                    "User:     {} <{}> role={:?} status={:?}",
                    user.display_name, user.email, user.role, user.status
                ),
                (None, UserContext::Anonymous) => println!("User:     not signed in"),
                (None, _) => println!("User:     unknown"),
            }
            println!("Publish:  {}", if report.can_publish { "allowed" } else { "not allowed" });
        }
    }
    Ok(())
}
