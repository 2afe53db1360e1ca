//! Error types for the Atlassian MCP gateway.
//!
//! Follows the same shape as most Rust MCP servers: one `thiserror` enum
//! per concern, aggregated into a top-level [`GatewayError`] via `#[from]`,
//! plus a `code()` method for machine-readable identifiers.

use thiserror::Error;

/// Construction-time configuration error. Observed only at startup —
/// see [`crate::config::loader::ConfigLoader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("unknown auth mode '{0}', expected 'apiToken' or 'pat'")]
    UnknownAuthMode(String),

    #[error("email is required when authMode is apiToken")]
    MissingEmail,

    #[error("token is required")]
    MissingToken,
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::UnknownAuthMode(_) => "UNKNOWN_AUTH_MODE",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::MissingToken => "MISSING_TOKEN",
        }
    }
}

/// Errors raised while calling out to Jira/Confluence/Bitbucket.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{method} {url} -> {status}: {truncated_body}")]
    Remote {
        status: u16,
        method: String,
        url: String,
        truncated_body: String,
    },

    #[error("request to {0} failed: {1}")]
    Io(String, String),

    #[error("request to {0} timed out")]
    Timeout(String),
}

impl TransportError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Remote { .. } => "REMOTE_ERROR",
            Self::Io(..) => "IO_ERROR",
            Self::Timeout(_) => "TIMEOUT",
        }
    }
}

/// Errors surfaced by a product handler while validating arguments or
/// synthesizing a request body — always rendered as a `ToolResponse`
/// error, never a JSON-RPC protocol error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Missing required argument: '{0}'")]
    MissingArgument(String),

    #[error("Argument '{name}' expected {expected}, got '{actual}'")]
    InvalidArgument {
        name: String,
        expected: &'static str,
        actual: String,
    },

    #[error("{0}")]
    Message(String),
}

/// Top-level gateway error.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("not configured: {0}")]
    Unconfigured(String),
}

impl GatewayError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Transport(e) => e.code(),
            Self::Handler(_) => "HANDLER_ERROR",
            Self::Unconfigured(_) => "UNCONFIGURED",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
