//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use boardwatch_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to device at {url}")]
    #[diagnostic(
        code(boardwatch::connection_failed),
        help(
            "Check that the device is powered on and reachable.\n\
             URL: {url}\n\
             Try: boardwatch submodels --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS certificate verification failed for {url}")]
    #[diagnostic(
        code(boardwatch::tls_error),
        help(
            "The device is using a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { url: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Submodel '{name}' not found")]
    #[diagnostic(
        code(boardwatch::not_found),
        help("Run: boardwatch submodels to see what the device exposes")
    )]
    SubmodelNotFound { name: String },

    // ── Save ─────────────────────────────────────────────────────────

    #[error("Device rejected the configuration save: {message}")]
    #[diagnostic(
        code(boardwatch::save_rejected),
        help("Your edits were not applied. Fix the values and retry.")
    )]
    SaveRejected { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Device API error: {message}")]
    #[diagnostic(code(boardwatch::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(boardwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(boardwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: boardwatch config init --device <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(boardwatch::no_device),
        help(
            "Pass --device <URL>, set BOARDWATCH_DEVICE, or create a profile:\n\
             boardwatch config init --device <URL>\n\
             Config expected at: {path}"
        )
    )]
    NoDevice { path: String },

    #[error(transparent)]
    #[diagnostic(code(boardwatch::config))]
    Config(Box<figment::Error>),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Device request timed out")]
    #[diagnostic(
        code(boardwatch::timeout),
        help("Increase the timeout with --timeout or check device responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(boardwatch::toml))]
    Toml(#[from] toml::ser::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(boardwatch::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::SubmodelNotFound { .. } => exit_code::NOT_FOUND,
            Self::SaveRejected { .. } => exit_code::REJECTED,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::SubmodelNotFound { name } => CliError::SubmodelNotFound { name },

            CoreError::SaveRejected { message } => CliError::SaveRejected { message },

            CoreError::InvalidTransition { action, mode } => CliError::Validation {
                field: "session".into(),
                reason: format!("cannot {action} while {mode}"),
            },

            CoreError::UnknownField { interface, field } => CliError::Validation {
                field: format!("{interface}.{field}"),
                reason: "no such field on the device".into(),
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<boardwatch_api::Error> for CliError {
    fn from(err: boardwatch_api::Error) -> Self {
        CliError::from(CoreError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_carries_no_duration() {
        let err = CliError::from(CoreError::Timeout);
        assert_eq!(err.to_string(), "Device request timed out");
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn save_rejection_keeps_its_exit_code() {
        let err = CliError::from(CoreError::SaveRejected {
            message: "device busy".into(),
        });
        assert_eq!(err.exit_code(), exit_code::REJECTED);
    }
}
