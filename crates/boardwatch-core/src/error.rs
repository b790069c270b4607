// ── Core error types ──
//
// User-facing errors from boardwatch-core. These are NOT API-specific --
// consumers never see raw HTTP status codes or JSON parse failures.
// The `From<boardwatch_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

use crate::session::SessionMode;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Device request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Submodel not found: {name}")]
    SubmodelNotFound { name: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Save rejected by device: {message}")]
    SaveRejected { message: String },

    #[error("Cannot {action} while session is {mode}")]
    InvalidTransition {
        action: &'static str,
        mode: SessionMode,
    },

    #[error("No field {field} in interface {interface}")]
    UnknownField { interface: String, field: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Device API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<boardwatch_api::Error> for CoreError {
    fn from(err: boardwatch_api::Error) -> Self {
        match err {
            boardwatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), |u| u.to_string()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            boardwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            boardwatch_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            boardwatch_api::Error::Api { status: 404, message } => {
                CoreError::SubmodelNotFound { name: message }
            }
            boardwatch_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            boardwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
