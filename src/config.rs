//! Application configuration.
//!
//! Stored as `config.yaml` in the platform config directory (or
//! `$WITHROOM_CONFIG_DIR` when set). Holds:
//! - `domain`: base URL of the WITH ROOM API
//! - `remote_timeout`: request timeout in seconds
//! - `layout`: dashboard layout, `wide` or `compact`

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WithRoomError};
use crate::render::LayoutMode;

pub const CONFIG_DIR_ENV: &str = "WITHROOM_CONFIG_DIR";
pub const DOMAIN_ENV: &str = "WITHROOM_DOMAIN";

/// Keys accepted by `withroom config set|get`.
pub const CONFIG_KEYS: [&str; 3] = ["domain", "remote_timeout", "layout"];

/// Directory holding `config.yaml` and `credentials.yaml`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("store", "withroom", "withroom")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            WithRoomError::Config(format!(
                "could not determine a config directory; set {CONFIG_DIR_ENV}"
            ))
        })
}

/// Write `content` to `path`, creating the parent directory and restricting
/// permissions to the owner on Unix.
pub(crate) fn write_private(path: &std::path::Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WithRoomError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {}", parent.display(), e),
            ))
        })?;
    }

    fs::write(path, content).map_err(|e| {
        WithRoomError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {}", path.display(), e),
        ))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the API, e.g. `https://api.withroom.store`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout: u64,

    #[serde(default)]
    pub layout: LayoutMode,
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: None,
            remote_timeout: default_remote_timeout(),
            layout: LayoutMode::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            WithRoomError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_yaml_ng::to_string(self)?;
        write_private(&Self::config_path()?, &content)
    }

    /// Validated base URL, from `WITHROOM_DOMAIN` first, then the config file.
    pub fn domain(&self) -> Result<Url> {
        let raw = match env::var(DOMAIN_ENV) {
            Ok(value) if !value.is_empty() => value,
            _ => self.domain.clone().ok_or_else(|| {
                WithRoomError::Config(format!(
                    "API domain not configured. Set {DOMAIN_ENV} or run: withroom config set domain <url>"
                ))
            })?,
        };
        parse_domain(&raw)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "domain" => {
                parse_domain(value)?;
                self.domain = Some(value.trim_end_matches('/').to_string());
            }
            "remote_timeout" => {
                let seconds: u64 = value.parse().map_err(|_| {
                    WithRoomError::Config(format!(
                        "remote_timeout must be a whole number of seconds, got '{value}'"
                    ))
                })?;
                if seconds == 0 {
                    return Err(WithRoomError::Config(
                        "remote_timeout must be at least 1 second".to_string(),
                    ));
                }
                self.remote_timeout = seconds;
            }
            "layout" => self.layout = value.parse()?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "domain" => Ok(self.domain.clone().unwrap_or_default()),
            "remote_timeout" => Ok(self.remote_timeout.to_string()),
            "layout" => Ok(self.layout.to_string()),
            other => Err(unknown_key(other)),
        }
    }
}

fn unknown_key(key: &str) -> WithRoomError {
    WithRoomError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_domain(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(WithRoomError::Config(format!(
            "domain must use http or https, got '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.domain.is_none());
        assert_eq!(config.remote_timeout, 30);
        assert_eq!(config.layout, LayoutMode::Wide);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_yaml_ng::from_str("domain: https://api.example.com\n").unwrap();
        assert_eq!(config.remote_timeout, 30);
        assert_eq!(config.layout, LayoutMode::Wide);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("layout", "compact").unwrap();
        config.set("remote_timeout", "10").unwrap();
        config.set("domain", "https://api.example.com/").unwrap();
        assert_eq!(config.get("layout").unwrap(), "compact");
        assert_eq!(config.get("remote_timeout").unwrap(), "10");
        assert_eq!(config.get("domain").unwrap(), "https://api.example.com");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("remote_timeout", "soon").is_err());
        assert!(config.set("remote_timeout", "0").is_err());
        assert!(config.set("domain", "ftp://example.com").is_err());
        assert!(config.set("layout", "tiny").is_err());
        assert!(config.set("colour", "red").is_err());
    }

    #[test]
    #[serial]
    fn test_env_domain_overrides_file() {
        let _guard = unsafe { EnvGuard::set(DOMAIN_ENV, "http://localhost:8080") };
        let config = Config {
            domain: Some("https://api.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(config.domain().unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    #[serial]
    fn test_missing_domain_is_config_error() {
        let _guard = unsafe { EnvGuard::remove(DOMAIN_ENV) };
        let err = Config::default().domain().unwrap_err();
        assert!(matches!(err, WithRoomError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_save_and_load_in_config_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let _guard = unsafe { EnvGuard::set(CONFIG_DIR_ENV, tmp.path()) };

        let mut config = Config::default();
        config.set("layout", "compact").unwrap();
        config.save().unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded, config);
        assert!(tmp.path().join("config.yaml").exists());
    }
}
