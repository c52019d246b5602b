use std::fmt;

use serde::{Deserialize, Serialize};

/// Desired state of a connection pool. Every attribute is immutable; any
/// change forces a destroy-and-recreate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConnectionPoolSpec {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    /// Pool name (immutable).
    pub name: String,

    pub mode: PoolMode,

    /// Backend connection count, at least 1.
    pub size: u32,

    /// Target logical database.
    pub db_name: String,

    /// Pool user; absence declares an inbound-user pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Make create a no-op when the pool already exists, so a retry after
    /// a 5xx on a successful create converges instead of failing.
    #[serde(default)]
    pub skip_if_exists: bool,
}

/// PgBouncer-style pooling modes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PoolMode {
    Session,
    Transaction,
    Statement,
}

impl PoolMode {
    pub const ALL: [&'static str; 3] = ["session", "transaction", "statement"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoolMode::Session => "session",
            PoolMode::Transaction => "transaction",
            PoolMode::Statement => "statement",
        }
    }
}

impl fmt::Display for PoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted record of a connection pool.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConnectionPoolRecord {
    /// Composite local ID `cluster/<name>`.
    pub id: String,

    pub cluster_id: String,
    pub name: String,
    pub mode: PoolMode,
    pub size: u32,
    pub db_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}
