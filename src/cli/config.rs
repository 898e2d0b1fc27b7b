// ABOUTME: CLI config command - show the merged configuration and optionally persist it

use anyhow::Result;

use super::util::print_json;
use super::{ConfigArgs, OutputFormat};
use crate::config::AppConfig;

/// Copy of the config that is safe to print
fn redacted(config: &AppConfig) -> AppConfig {
    let mut shown = config.clone();
    if shown.api.token.is_some() {
        shown.api.token = Some("********".to_string());
    }
    shown
}

/// Execute the config command
pub fn execute(args: ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    if args.save {
        config.save()?;
        let path = AppConfig::user_config_path()?;
        if format == OutputFormat::Text {
            println!("Saved configuration to {}", path.display());
        }
    }

    let shown = redacted(config);
    match format {
        OutputFormat::Json => print_json(&shown)?,
        OutputFormat::Text => {
            println!("API:       {}", shown.api.base_url);
            println!("Token:     {}", shown.api.token.as_deref().unwrap_or("(none)"));
            println!("Timeout:   {}s", shown.api.timeout_secs);
            println!("Catalog:   {:?}", shown.catalog.source);
            println!(
                "Caches:    user {}s, status {}s",
                shown.cache.user_ttl_secs, shown.cache.status_ttl_secs
            );
            println!("Logs:      {}", config.log_dir()?.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_masked() {
        let mut config = AppConfig::default();
        assert_eq!(redacted(&config).api.token, None);

        config.api.token = Some("s3cret".to_string());
        let shown = redacted(&config);
        assert_eq!(shown.api.token.as_deref(), Some("********"));
        assert_eq!(shown.api.base_url, config.api.base_url);
    }
}
