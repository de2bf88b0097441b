//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config set`: Set a configuration value
//! - `config get`: Print one configuration value

use std::env;

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::auth::CredentialStore;
use crate::cli::OutputOptions;
use crate::config::{Config, DOMAIN_ENV};
use crate::error::Result;

pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;
    let env_domain = env::var(DOMAIN_ENV).ok().filter(|v| !v.is_empty());
    let logged_in = CredentialStore::open()?.load()?.is_present();

    let json_output = json!({
        "domain": config.domain,
        "domain_override": env_domain,
        "remote_timeout": config.remote_timeout,
        "layout": config.layout.to_string(),
        "logged_in": logged_in,
        "config_file": path.to_string_lossy(),
    });

    let mut text = format!("{}\n\n", "Configuration:".cyan().bold());
    let domain = match (&env_domain, &config.domain) {
        (Some(env_value), _) => format!("{env_value} {}", format!("(from {DOMAIN_ENV})").dimmed()),
        (None, Some(domain)) => domain.clone(),
        (None, None) => "not configured".dimmed().to_string(),
    };
    text.push_str(&format!("{}: {domain}\n", "domain".cyan()));
    text.push_str(&format!(
        "{}: {}s\n",
        "remote_timeout".cyan(),
        config.remote_timeout
    ));
    text.push_str(&format!("{}: {}\n", "layout".cyan(), config.layout));
    let auth = if logged_in {
        "logged in".green().to_string()
    } else {
        "not logged in".dimmed().to_string()
    };
    text.push_str(&format!("{}: {auth}\n\n", "auth".cyan()));
    text.push_str(&format!(
        "{}",
        format!("Config file: {}", path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text)
        .print(output)
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    tracing::info!(key, "config updated");
    println!("Set {} = {}", key.cyan(), config.get(key)?);
    Ok(())
}

pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}
