use thiserror::Error;

#[derive(Error, Debug)]
pub enum WithRoomError {
    #[error("로그인이 필요합니다. run 'withroom login --token <token>' first")]
    LoginRequired,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },

    /// The server answered 2xx but its boolean payload was `false`
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

/// How an error should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Token missing or refused by the server; prompt for login
    Auth,
    /// Transport failure or non-2xx response; dismissible notification
    Network,
    /// Successful response carrying a `false` verdict
    Rejected,
    /// Blocked locally before any request was made
    Validation,
    /// Configuration or local I/O problem
    Local,
}

impl WithRoomError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WithRoomError::LoginRequired => ErrorCategory::Auth,
            WithRoomError::Api { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::Auth
            }
            WithRoomError::Http(_)
            | WithRoomError::Api { .. }
            | WithRoomError::MalformedResponse { .. } => ErrorCategory::Network,
            WithRoomError::Rejected(_) => ErrorCategory::Rejected,
            WithRoomError::Validation(_) => ErrorCategory::Validation,
            WithRoomError::Config(_)
            | WithRoomError::Io(_)
            | WithRoomError::YamlParse(_)
            | WithRoomError::Json(_)
            | WithRoomError::Url(_)
            | WithRoomError::Other(_) => ErrorCategory::Local,
        }
    }
}

pub type Result<T> = std::result::Result<T, WithRoomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status_is_auth_category() {
        let err = WithRoomError::Api {
            status: 401,
            message: "expired".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_server_error_is_network_category() {
        let err = WithRoomError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_rejection_and_validation_are_distinct() {
        assert_eq!(
            WithRoomError::Rejected("no".to_string()).category(),
            ErrorCategory::Rejected
        );
        assert_eq!(
            WithRoomError::Validation("missing".to_string()).category(),
            ErrorCategory::Validation
        );
    }
}
