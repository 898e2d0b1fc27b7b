// ABOUTME: Error taxonomy for the site-builder engine
// Validation, invalid operations, lookups and remote failures share one enum

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single unmet rule, surfaced as field-level feedback in the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field (e.g. `company.name`, `sections.hero.title`)
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// What failed when talking to the persistence service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Connection refused, DNS failure, TLS failure
    Transport,
    /// Request exceeded the configured timeout
    Timeout,
    /// Service answered 401/403
    Unauthorized,
    /// Any other non-success status
    Status(u16),
    /// Response body could not be decoded
    Decode,
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Timeout => write!(f, "timeout"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// Network or service failure from a persistence call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors raised by the configuration engine
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Step gating or payload rules not met
    #[error("Validation failed: {}", format_issues(.0))]
    ValidationFailure(Vec<ValidationIssue>),

    /// Operation rejected, state left unchanged
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Catalog or remote lookup miss
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Draft lacks the fields needed to build a payload
    #[error("Draft is incomplete, missing: {}", .missing.join(", "))]
    IncompleteDraft { missing: Vec<&'static str> },

    /// Persistence service failure
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BuilderError {
    pub fn section_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "section",
            id: id.to_string(),
        }
    }

    pub fn client_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "client configuration",
            id: id.to_string(),
        }
    }

    /// Whether a retry or user re-submission may succeed
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for engine operations
pub type BuilderResult<T> = Result<T, BuilderError>;
