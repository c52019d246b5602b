use serde::{Deserialize, Serialize};

/// Desired state of a logical database. Identity only; there is nothing
/// else to configure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LogicalDatabaseSpec {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    /// Database name (immutable).
    pub name: String,
}

/// Persisted record of a logical database.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LogicalDatabaseRecord {
    /// Composite local ID `cluster/database/<name>`.
    pub id: String,

    pub cluster_id: String,
    pub name: String,
}
