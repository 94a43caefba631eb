// ── Core error types ──
//
// Domain-level errors from fabpath-core. Transport failures from
// `fabpath_api` are folded into connection/auth/API variants; identifier
// grammar and numeric field failures are schema violations that abort
// the run.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Schema violations ────────────────────────────────────────────
    #[error("{class} identifier does not match the expected grammar: {dn}")]
    IdentifierGrammar { class: &'static str, dn: String },

    #[error("{class} object {dn} has no '{attribute}' attribute")]
    MissingAttribute {
        class: &'static str,
        dn: String,
        attribute: &'static str,
    },

    #[error("Invalid {field} '{value}' on {dn}: {reason}")]
    InvalidField {
        dn: String,
        field: &'static str,
        value: String,
        reason: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Controller error code from the `imdata` error object.
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Offline dumps ────────────────────────────────────────────────
    #[error("Cannot read dump file {}: {reason}", path.display())]
    Dump { path: PathBuf, reason: String },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for errors caused by records that don't match the
    /// controller schema this tool was written against.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Self::IdentifierGrammar { .. } | Self::MissingAttribute { .. } | Self::InvalidField { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fabpath_api::Error> for CoreError {
    fn from(err: fabpath_api::Error) -> Self {
        match err {
            fabpath_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            fabpath_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            fabpath_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fabpath_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fabpath_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            fabpath_api::Error::Api { code, text, status } => CoreError::Api {
                message: text,
                code: Some(code),
                status: Some(status),
            },
            fabpath_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
                code: None,
                status: None,
            },
        }
    }
}
