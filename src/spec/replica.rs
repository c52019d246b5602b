use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::client::{ClusterConnection, ClusterStatus};

/// Desired state of a read-only replica.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReplicaSpec {
    /// Source cluster UUID (immutable).
    pub cluster_id: String,

    /// Replica name (immutable).
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Size slug. The remote does not report it back on reads, so it is
    /// excluded from import-drift checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_network_uuid: Option<String>,
}

/// Persisted record of a replica. The stable local ID stays the composite
/// `cluster/replicas/<name>` for backward compatibility; the remote UUID
/// is carried as a separate attribute.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReplicaRecord {
    /// Composite local ID `cluster/replicas/<name>`.
    pub id: String,

    /// Remote-assigned replica UUID.
    pub uuid: String,

    pub cluster_id: String,
    pub name: String,
    pub region: String,
    /// Declared size, carried through as-is (not observable on read).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_network_uuid: Option<String>,

    pub status: ClusterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ClusterConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_connection: Option<ClusterConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_uri: Option<String>,
}
