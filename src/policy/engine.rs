//! Static per-engine capability table.
//!
//! Engine-specific rules live here rather than being scattered through the
//! resource schemas: which optional cluster attributes an engine accepts,
//! how version changes compare, and which log-sink kinds the remote will
//! refuse for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported database engines.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Pg,
    Mysql,
    Mongodb,
    Redis,
    Valkey,
    Kafka,
    Opensearch,
}

impl Engine {
    pub const ALL: [Engine; 7] = [
        Engine::Pg,
        Engine::Mysql,
        Engine::Mongodb,
        Engine::Redis,
        Engine::Valkey,
        Engine::Kafka,
        Engine::Opensearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Pg => "pg",
            Engine::Mysql => "mysql",
            Engine::Mongodb => "mongodb",
            Engine::Redis => "redis",
            Engine::Valkey => "valkey",
            Engine::Kafka => "kafka",
            Engine::Opensearch => "opensearch",
        }
    }

    /// Whether `eviction_policy` is a meaningful cluster attribute.
    pub fn supports_eviction_policy(&self) -> bool {
        matches!(self, Engine::Redis | Engine::Valkey)
    }

    /// Whether `sql_mode` is a meaningful cluster attribute.
    pub fn supports_sql_mode(&self) -> bool {
        matches!(self, Engine::Mysql)
    }

    /// Whether the `mysql_auth_plugin` user attribute applies.
    pub fn supports_user_auth_plugin(&self) -> bool {
        matches!(self, Engine::Mysql)
    }

    /// Whether users carry Kafka access certificates and topic ACLs.
    pub fn supports_kafka_acls(&self) -> bool {
        matches!(self, Engine::Kafka)
    }

    /// The remote refuses rsyslog/opensearch log sinks for these engines.
    /// The reconciler does not pre-empt the call; the remote diagnostic is
    /// surfaced verbatim. Recorded here so callers can document it.
    pub fn rejects_log_sinks(&self) -> bool {
        matches!(self, Engine::Mongodb)
    }

    /// The service force-upgrades Redis; an observed version numerically
    /// greater than the declared one must not be treated as drift.
    pub fn tolerates_version_downgrade_diff(&self) -> bool {
        matches!(self, Engine::Redis)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pg" => Ok(Engine::Pg),
            "mysql" => Ok(Engine::Mysql),
            "mongodb" => Ok(Engine::Mongodb),
            "redis" => Ok(Engine::Redis),
            "valkey" => Ok(Engine::Valkey),
            "kafka" => Ok(Engine::Kafka),
            "opensearch" => Ok(Engine::Opensearch),
            other => Err(UnknownEngine(other.to_string())),
        }
    }
}

/// Parse failure for an engine slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown database engine {0:?}")]
pub struct UnknownEngine(pub String);

/// Compare a declared version against the observed one, applying the Redis
/// downgrade-tolerance rule: when the service has force-upgraded past the
/// declared version, the two are treated as equal.
///
/// Versions are opaque strings everywhere else; this is the single place a
/// numeric comparison happens, and it falls back to string equality when
/// either side does not parse.
pub fn version_is_current(engine: Engine, declared: &str, observed: &str) -> bool {
    if declared == observed {
        return true;
    }
    if !engine.tolerates_version_downgrade_diff() {
        return false;
    }
    match (parse_numeric_version(declared), parse_numeric_version(observed)) {
        (Some(want), Some(have)) => have > want,
        _ => false,
    }
}

fn parse_numeric_version(version: &str) -> Option<f64> {
    version.trim().parse::<f64>().ok()
}
