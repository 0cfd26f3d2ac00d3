//! Error types for the Parley core library.
//!
//! Every fallible operation in the library returns [`ParleyResult`]. The
//! presentation layers catch these at the call site, log them with
//! [`ParleyError::log`] and substitute an empty list or a synthesized
//! message, so none of them is fatal once the client is running.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Backend | Transport, status and decoding errors from the chat backend |
//! | E2001-E2099 | Config | Environment, config file, and validation errors |
//! | E3001-E3099 | Assistant | Completion API credential, transport and response errors |
//! | E9001-E9099 | General | Internal errors such as HTTP client construction |

use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the Parley core library.
#[derive(Debug, Error)]
pub enum ParleyError {
    // ========================================================================
    // Backend Errors (E1001-E1099)
    // ========================================================================
    /// The request never produced a response (DNS, connect, reset).
    #[error("[E1001] Backend request failed: {0}")]
    BackendRequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("[E1002] Backend returned status {status} for {endpoint}")]
    BackendStatus { status: u16, endpoint: String },

    /// The backend body could not be decoded into the expected shape.
    #[error("[E1003] Failed to decode backend response: {0}")]
    BackendDecode(String),

    /// The request timed out.
    #[error("[E1004] Backend request timed out: {0}")]
    BackendTimeout(String),

    // ========================================================================
    // Configuration Errors (E2001-E2099)
    // ========================================================================
    /// Missing required configuration value
    #[error("[E2001] Missing required configuration: {0}")]
    ConfigMissing(String),

    /// Configuration value failed validation
    #[error("[E2002] Invalid configuration value for {key}: {message}")]
    ConfigInvalid { key: String, message: String },

    /// Configuration sources could not be read or merged
    #[error("[E2003] Configuration error: {0}")]
    ConfigSource(String),

    // ========================================================================
    // Assistant Errors (E3001-E3099)
    // ========================================================================
    /// No usable completion API credential is configured.
    #[error("[E3001] Assistant API key is not configured")]
    AssistantNotConfigured,

    /// The completion request never produced a response.
    #[error("[E3002] Assistant request failed: {0}")]
    AssistantRequestFailed(String),

    /// The completion API answered with a non-success status.
    #[error("[E3003] Assistant API returned status {status}: {body}")]
    AssistantStatus { status: u16, body: String },

    /// The completion body was not JSON.
    #[error("[E3004] Failed to decode assistant response: {0}")]
    AssistantDecode(String),

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    #[error("[E9001] Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Parley operations.
pub type ParleyResult<T> = Result<T, ParleyError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for ParleyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ParleyError::BackendTimeout(err.to_string())
        } else if err.is_status() {
            let status = err.status().map(|s| s.as_u16()).unwrap_or_default();
            let endpoint = err
                .url()
                .map(|u| u.path().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            ParleyError::BackendStatus { status, endpoint }
        } else if err.is_decode() {
            ParleyError::BackendDecode(err.to_string())
        } else {
            ParleyError::BackendRequestFailed(err.to_string())
        }
    }
}

impl From<config::ConfigError> for ParleyError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ParleyError::ConfigMissing(key),
            other => ParleyError::ConfigSource(other.to_string()),
        }
    }
}

// ============================================================================
// Error classification
// ============================================================================

impl ParleyError {
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            ParleyError::BackendRequestFailed(_)
                | ParleyError::BackendStatus { .. }
                | ParleyError::BackendDecode(_)
                | ParleyError::BackendTimeout(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ParleyError::ConfigMissing(_)
                | ParleyError::ConfigInvalid { .. }
                | ParleyError::ConfigSource(_)
        )
    }

    pub fn is_assistant_error(&self) -> bool {
        matches!(
            self,
            ParleyError::AssistantNotConfigured
                | ParleyError::AssistantRequestFailed(_)
                | ParleyError::AssistantStatus { .. }
                | ParleyError::AssistantDecode(_)
        )
    }

    /// Returns true if the same request might succeed if the user tries again.
    pub fn is_transient(&self) -> bool {
        match self {
            ParleyError::BackendRequestFailed(_)
            | ParleyError::BackendTimeout(_)
            | ParleyError::AssistantRequestFailed(_) => true,
            ParleyError::BackendStatus { status, .. }
            | ParleyError::AssistantStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ParleyError::BackendRequestFailed(_) => "E1001",
            ParleyError::BackendStatus { .. } => "E1002",
            ParleyError::BackendDecode(_) => "E1003",
            ParleyError::BackendTimeout(_) => "E1004",
            ParleyError::ConfigMissing(_) => "E2001",
            ParleyError::ConfigInvalid { .. } => "E2002",
            ParleyError::ConfigSource(_) => "E2003",
            ParleyError::AssistantNotConfigured => "E3001",
            ParleyError::AssistantRequestFailed(_) => "E3002",
            ParleyError::AssistantStatus { .. } => "E3003",
            ParleyError::AssistantDecode(_) => "E3004",
            ParleyError::Internal(_) => "E9001",
        }
    }

    /// Returns a user-facing hint for fixing the error, if there is one.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            ParleyError::BackendRequestFailed(_) | ParleyError::BackendTimeout(_) => {
                Some("Check that the backend is running and API_BASE_URL points at it.")
            }
            ParleyError::BackendStatus { status, .. } if *status == 404 => {
                Some("The requested user or conversation does not exist on the backend.")
            }
            ParleyError::BackendDecode(_) => {
                Some("The backend response did not match the expected format.")
            }
            ParleyError::ConfigMissing(_) | ParleyError::ConfigInvalid { .. } => {
                Some("Check parley.toml and the PARLEY__* environment variables.")
            }
            ParleyError::AssistantNotConfigured => {
                Some("Set OPENAI_API_KEY in your environment or .env file.")
            }
            ParleyError::AssistantStatus { status, .. } if *status == 401 => {
                Some("The OpenAI API key was rejected.")
            }
            _ => None,
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        let suggestion = self.user_suggestion();

        if self.is_transient() {
            warn!(
                error_code = %code,
                suggestion = suggestion,
                "Transient error occurred: {}",
                self
            );
        } else {
            error!(
                error_code = %code,
                suggestion = suggestion,
                "Error occurred: {}",
                self
            );
        }
    }
}

// ============================================================================
// User-friendly error formatting for CLI
// ============================================================================

/// Format an error for CLI display with its suggestion.
pub struct CliErrorDisplay<'a> {
    error: &'a ParleyError,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a ParleyError) -> Self {
        Self {
            error,
            show_suggestion: true,
        }
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl fmt::Display for CliErrorDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                writeln!(f)?;
                write!(f, "  Suggestion: {}", suggestion)?;
            }
        }

        if self.error.is_transient() {
            writeln!(f)?;
            write!(f, "  This error may be temporary. Try again.")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_code() {
        let err = ParleyError::BackendStatus {
            status: 404,
            endpoint: "/user/9".to_string(),
        };
        assert!(err.to_string().contains("E1002"));
        assert!(err.to_string().contains("/user/9"));

        let err = ParleyError::ConfigMissing("backend.base_url".to_string());
        assert!(err.to_string().contains("E2001"));
    }

    #[test]
    fn test_error_codes_match_display() {
        let errors = vec![
            ParleyError::BackendRequestFailed("reset".to_string()),
            ParleyError::BackendDecode("eof".to_string()),
            ParleyError::AssistantNotConfigured,
            ParleyError::AssistantStatus {
                status: 500,
                body: String::new(),
            },
            ParleyError::Internal("x".to_string()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with(&format!("[{}]", err.error_code())));
        }
    }

    #[test]
    fn test_classification() {
        assert!(ParleyError::BackendTimeout("t".to_string()).is_backend_error());
        assert!(ParleyError::AssistantNotConfigured.is_assistant_error());
        assert!(ParleyError::ConfigSource("bad".to_string()).is_config_error());
        assert!(!ParleyError::AssistantNotConfigured.is_backend_error());
    }

    #[test]
    fn test_transient() {
        assert!(ParleyError::BackendRequestFailed("reset".to_string()).is_transient());
        assert!(ParleyError::BackendStatus {
            status: 503,
            endpoint: "/users/list".to_string()
        }
        .is_transient());
        assert!(!ParleyError::BackendStatus {
            status: 404,
            endpoint: "/user/1".to_string()
        }
        .is_transient());
        assert!(!ParleyError::AssistantNotConfigured.is_transient());
    }

    #[test]
    fn test_cli_display_includes_suggestion() {
        let err = ParleyError::AssistantNotConfigured;
        let shown = CliErrorDisplay::new(&err).to_string();
        assert!(shown.contains("E3001"));
        assert!(shown.contains("OPENAI_API_KEY"));

        let bare = CliErrorDisplay::new(&err).without_suggestion().to_string();
        assert!(!bare.contains("Suggestion"));
    }
}
