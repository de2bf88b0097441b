//! Conversion of HTTP failures into crate errors.

use std::fmt;

use crate::error::WithRoomError;

/// Maximum number of response body characters kept in an error message.
const BODY_PREVIEW_CHARS: usize = 200;

/// A failed call to the WITH ROOM API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if the server answered at all
    pub status: Option<reqwest::StatusCode>,
    pub message: String,
    /// Request path, e.g. `/study/join`
    pub path: String,
}

impl ApiError {
    pub fn with_status(
        path: impl Into<String>,
        status: reqwest::StatusCode,
        body: &str,
    ) -> Self {
        let preview: String = body.trim().chars().take(BODY_PREVIEW_CHARS).collect();
        let message = if preview.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            preview
        };
        Self {
            status: Some(status),
            message,
            path: path.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status.map(|s| s.as_u16()), Some(401) | Some(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} {}: {}", status.as_u16(), self.path, self.message),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

impl From<ApiError> for WithRoomError {
    fn from(err: ApiError) -> Self {
        match err.status {
            Some(status) => WithRoomError::Api {
                status: status.as_u16(),
                message: format!("{}: {}", err.path, err.message),
            },
            None => WithRoomError::Other(err.to_string()),
        }
    }
}
