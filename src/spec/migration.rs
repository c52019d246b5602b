use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Desired state of an online migration into a destination cluster.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OnlineMigrationSpec {
    /// Destination cluster UUID (immutable).
    pub cluster_id: String,

    #[serde(default)]
    pub disable_ssl: bool,

    /// Database names excluded from the copy.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub ignore_dbs: BTreeSet<String>,

    pub source: MigrationSource,
}

/// The external source database to copy from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MigrationSource {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Remote-reported migration status.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MigrationStatus {
    Running,
    Syncing,
    Done,
    Error,
    Canceled,
}

impl MigrationStatus {
    /// The coordinator counts these as a successfully started migration.
    pub fn is_started(&self) -> bool {
        matches!(self, MigrationStatus::Syncing | MigrationStatus::Done)
    }
}

impl fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MigrationStatus::Running => "running",
            MigrationStatus::Syncing => "syncing",
            MigrationStatus::Done => "done",
            MigrationStatus::Error => "error",
            MigrationStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// Persisted record of an online migration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OnlineMigrationRecord {
    /// Remote-assigned migration ID; the resource's stable ID.
    pub id: String,

    pub cluster_id: String,
    pub status: MigrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
