//! Access token handling.
//!
//! The token lives in `credentials.yaml` next to the config file under the
//! key `accessToken`. Everything else receives it as an [`AuthContext`]
//! value; only `login` and `logout` write the file.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::{config_dir, write_private};
use crate::error::{Result, WithRoomError};

/// Token presence for the current process.
#[derive(Clone, Default)]
pub struct AuthContext {
    token: Option<SecretString>,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        if token.trim().is_empty() {
            return Self::anonymous();
        }
        Self {
            token: Some(SecretString::from(token)),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn is_present(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, or `LoginRequired` when none is stored.
    pub fn token(&self) -> Result<&SecretString> {
        self.token.as_ref().ok_or(WithRoomError::LoginRequired)
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// On-disk token storage.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: config_dir()?.join("credentials.yaml"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<AuthContext> {
        if !self.path.exists() {
            return Ok(AuthContext::anonymous());
        }
        let content = fs::read_to_string(&self.path)?;
        let file: CredentialsFile = serde_yaml_ng::from_str(&content)?;
        Ok(file
            .access_token
            .map(AuthContext::new)
            .unwrap_or_else(AuthContext::anonymous))
    }

    pub fn save_token(&self, token: &SecretString) -> Result<AuthContext> {
        let token = token.expose_secret().trim().to_string();
        if token.is_empty() {
            return Err(WithRoomError::Validation(
                "access token must not be empty".to_string(),
            ));
        }
        let file = CredentialsFile {
            access_token: Some(token.clone()),
        };
        write_private(&self.path, &serde_yaml_ng::to_string(&file)?)?;
        tracing::debug!(path = %self.path.display(), "stored access token");
        Ok(AuthContext::new(token))
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!(path = %self.path.display(), "removed access token");
        }
        Ok(())
    }
}
