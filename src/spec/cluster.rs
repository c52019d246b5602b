use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::client::{ClusterConnection, ClusterStatus};
use crate::policy::engine::Engine;

/// Desired state of a database cluster.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClusterSpec {
    /// Cluster name (immutable).
    pub name: String,

    /// Database engine (immutable).
    pub engine: Engine,

    /// Engine version. Required on every declaration; treated as an opaque
    /// string except for the Redis forced-upgrade comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Droplet size slug for each node.
    pub size: String,

    /// Region slug. Stored lowercase regardless of the declared spelling.
    pub region: String,

    /// Number of nodes in the cluster.
    pub node_count: u32,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// VPC to attach the cluster to (immutable after create).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_network_uuid: Option<String>,

    /// Project to associate the cluster with (immutable after create).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Attached storage in MiB, as a decimal string (may exceed i64).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_size_mib: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window: Option<MaintenanceWindow>,

    /// Key eviction policy. Redis and Valkey only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eviction_policy: Option<EvictionPolicy>,

    /// Comma-separated SQL modes. MySQL only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_mode: Option<String>,

    /// One-shot fork source, forwarded on create and never diffed after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_restore: Option<BackupRestore>,
}

impl ClusterSpec {
    /// Region slugs are case-insensitive at the remote; the canonical
    /// stored form is lowercase.
    pub fn canonical_region(&self) -> String {
        self.region.to_lowercase()
    }
}

/// Weekly maintenance window.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MaintenanceWindow {
    /// Day of week, e.g. "tuesday".
    pub day: String,

    /// Start hour, accepted as "HH", "HH:MM" or "HH:MM:SS".
    pub hour: String,
}

impl MaintenanceWindow {
    /// Canonical "HH:MM" form of the hour. The remote reports seconds on
    /// read while declarations usually omit them; comparing the normalized
    /// form keeps re-plans empty.
    pub fn normalized_hour(&self) -> String {
        let mut parts = self.hour.split(':');
        let hour = parts.next().unwrap_or("0");
        let minute = parts.next().unwrap_or("00");
        format!("{:0>2}:{:0>2}", hour, minute)
    }

    /// Equality as the diff engine sees it.
    pub fn plan_equal(&self, other: &MaintenanceWindow) -> bool {
        self.day.eq_ignore_ascii_case(&other.day)
            && self.normalized_hour() == other.normalized_hour()
    }
}

/// Redis/Valkey key eviction policies.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    Noeviction,
    AllkeysLru,
    AllkeysRandom,
    VolatileLru,
    VolatileRandom,
    VolatileTtl,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Noeviction => "noeviction",
            EvictionPolicy::AllkeysLru => "allkeys_lru",
            EvictionPolicy::AllkeysRandom => "allkeys_random",
            EvictionPolicy::VolatileLru => "volatile_lru",
            EvictionPolicy::VolatileRandom => "volatile_random",
            EvictionPolicy::VolatileTtl => "volatile_ttl",
        }
    }
}

/// Fork a new cluster from an existing database backup.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BackupRestore {
    /// Name of the source database.
    pub database_name: String,

    /// Timestamp of the backup to restore; latest when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_created_at: Option<String>,
}

/// Persisted record of a reconciled cluster: the declared attributes as
/// observed, plus every computed field.
///
/// `maintenance_window`, `eviction_policy` and `sql_mode` are only present
/// when the user declared them; the read path never copies a server default
/// into an unset field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClusterRecord {
    /// Remote-assigned cluster UUID; the resource's stable ID.
    pub id: String,

    pub name: String,
    pub engine: Engine,
    pub version: String,
    pub size: String,
    pub region: String,
    pub node_count: u32,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_network_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_size_mib: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window: Option<MaintenanceWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eviction_policy: Option<EvictionPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_mode: Option<String>,

    pub status: ClusterStatus,
    /// Public connection endpoint. Sensitive: carries the admin password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ClusterConnection>,
    /// VPC-side connection endpoint. Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_connection: Option<ClusterConnection>,
    /// Public URI with the password reinjected as userinfo. Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Private URI with the password reinjected as userinfo. Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_uri: Option<String>,
    pub urn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Uniform resource name for a cluster UUID.
pub fn cluster_urn(id: &str) -> String {
    format!("urn:dbaas:{}", id)
}
