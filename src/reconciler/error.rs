//! Error types for the reconciler core.

use thiserror::Error;

use crate::client::ControlPlaneError;

/// Error variants are named after the failure kinds the host distinguishes.
/// Local recovery is limited to 404-as-success (handled inline, never an
/// error) and retryable remote codes; everything else propagates with
/// enough context to diagnose.
#[derive(Error, Debug)]
pub enum Error {
    /// Cross-field or enum violation caught before any remote call.
    #[error("{0}")]
    Validation(String),

    /// A user-supplied external identifier did not match the documented
    /// composite form.
    #[error("{0}")]
    Import(String),

    /// A wire payload failed to encode or decode.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Non-2xx remote response, surfaced verbatim with operation context.
    #[error("Error {op}: {source}")]
    Remote {
        op: String,
        #[source]
        source: ControlPlaneError,
    },

    /// The provisioning waiter exhausted its budget.
    #[error("timed out waiting for database cluster to become {0}")]
    Timeout(String),

    /// The online-migration coordinator gave up restarting the migration.
    #[error("error starting online migration: {0}")]
    MigrationStart(String),
}

impl Error {
    /// Wrap a remote failure with the operation being attempted, e.g.
    /// `Error::remote("resizing database cluster", err)`.
    pub fn remote(op: impl Into<String>, source: ControlPlaneError) -> Self {
        Error::Remote {
            op: op.into(),
            source,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Whether retrying the failed operation may succeed without
    /// intervention. Validation and import failures never are; remote
    /// failures delegate to the status-code classification.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Remote { source, .. } => source.is_retryable(),
            Error::Validation(_) | Error::Import(_) | Error::Serialization(_) => false,
            Error::Timeout(_) | Error::MigrationStart(_) => false,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A non-fatal message surfaced to the host alongside a successful
/// operation. The engine-config destroy path is the main producer: the
/// remote configuration is deliberately left in place and the host is
/// told so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}
