//! Control-plane client seam.
//!
//! The reconciler core never speaks HTTP itself; it drives an abstract
//! [`ControlPlaneClient`] whose operations mirror the remote REST surface.
//! Every operation returns a [`ControlPlaneError`] carrying the HTTP-like
//! status code of the failed call, so callers can distinguish a 404
//! (absent, recoverable on read/delete) from a 412 (retryable during
//! replica creation) from everything else.

mod api;
mod types;

pub use api::ControlPlaneClient;
pub use types::{
    CaCertificate, ClusterConnection, ClusterCreateRequest, ClusterResizeRequest, ClusterState,
    ClusterStatus, DatabaseState, FirewallRule, FirewallRuleInput,
    LogSinkCreateRequest, LogSinkState, MetricsCredentials, MigrationState, OnlineMigrationRequest,
    PoolCreateRequest, PoolState, ReplicaCreateRequest, ReplicaState, SchemaSubjectCreateRequest,
    SchemaSubjectState, TopicCreateRequest, TopicState, TopicUpdateRequest, UserCreateRequest,
    UserState, UserUpdateRequest,
};

use thiserror::Error;

/// Error returned by a control-plane operation.
///
/// `status` is the HTTP-like code of the response envelope when the remote
/// answered at all; transport-level failures carry no status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ControlPlaneError {
    status: Option<u16>,
    message: String,
}

impl ControlPlaneError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// A failure below the response layer (connection reset, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(404, format!("{} not found", what.into()))
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::new(412, message)
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_precondition_failed(&self) -> bool {
        self.status == Some(412)
    }

    /// Whether retrying the same call may succeed without intervention.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            // 409 Conflict, 412 Precondition Failed and 429 Too Many Requests
            // resolve on their own; other 4xx codes do not.
            Some(code) if (400..500).contains(&code) => matches!(code, 409 | 412 | 429),
            // 5xx and transport failures are worth retrying.
            Some(_) | None => true,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ControlPlaneError>;
