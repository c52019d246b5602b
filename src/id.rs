//! Identity and identifier codec.
//!
//! Child objects of a cluster are tracked under composite string
//! identifiers. The local forms are:
//!
//! | resource         | local ID                              |
//! |------------------|---------------------------------------|
//! | user             | `cluster/user/<name>`                 |
//! | logical database | `cluster/database/<name>`             |
//! | connection pool  | `cluster/<name>`                      |
//! | replica          | `cluster/replicas/<name>`             |
//! | kafka topic      | `cluster/topic/<name>`                |
//! | schema subject   | `cluster/schema-registry/<subject>`   |
//! | log sink (typed) | `cluster,sink_id`                     |
//! | log sink (legacy)| `cluster/logsink/<id>`                |
//! | engine config    | `cluster/<engine>-config`             |
//! | firewall         | `<cluster>-<unique suffix>`           |
//!
//! Import parses a user-supplied identifier and rejects anything that
//! does not match the documented form; there is no fuzzy matching.

use rand::Rng;

use crate::policy::engine::Engine;
use crate::reconciler::error::{Error, Result};

/// Separator between cluster ID and child name in comma-joined import
/// identifiers.
const IMPORT_SEPARATOR: char = ',';

fn split_composite<'a>(id: &'a str, middle: &str, form: &str) -> Result<(&'a str, &'a str)> {
    let mut parts = id.splitn(3, '/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(cluster), Some(seg), Some(name))
            if !cluster.is_empty() && seg == middle && !name.is_empty() =>
        {
            Ok((cluster, name))
        }
        _ => Err(Error::Import(format!(
            "invalid identifier {:?}: must use the format '{}'",
            id, form
        ))),
    }
}

pub fn format_user_id(cluster: &str, name: &str) -> String {
    format!("{}/user/{}", cluster, name)
}

pub fn parse_user_id(id: &str) -> Result<(String, String)> {
    split_composite(id, "user", "cluster_id/user/name")
        .map(|(c, n)| (c.to_string(), n.to_string()))
}

pub fn format_database_id(cluster: &str, name: &str) -> String {
    format!("{}/database/{}", cluster, name)
}

pub fn parse_database_id(id: &str) -> Result<(String, String)> {
    split_composite(id, "database", "cluster_id/database/name")
        .map(|(c, n)| (c.to_string(), n.to_string()))
}

pub fn format_replica_id(cluster: &str, name: &str) -> String {
    format!("{}/replicas/{}", cluster, name)
}

pub fn parse_replica_id(id: &str) -> Result<(String, String)> {
    split_composite(id, "replicas", "cluster_id/replicas/name")
        .map(|(c, n)| (c.to_string(), n.to_string()))
}

pub fn format_topic_id(cluster: &str, name: &str) -> String {
    format!("{}/topic/{}", cluster, name)
}

pub fn parse_topic_id(id: &str) -> Result<(String, String)> {
    split_composite(id, "topic", "cluster_id/topic/name")
        .map(|(c, n)| (c.to_string(), n.to_string()))
}

pub fn format_schema_subject_id(cluster: &str, subject: &str) -> String {
    format!("{}/schema-registry/{}", cluster, subject)
}

pub fn parse_schema_subject_id(id: &str) -> Result<(String, String)> {
    split_composite(id, "schema-registry", "cluster_id/schema-registry/subject")
        .map(|(c, n)| (c.to_string(), n.to_string()))
}

pub fn format_legacy_sink_id(cluster: &str, sink_id: &str) -> String {
    format!("{}/logsink/{}", cluster, sink_id)
}

pub fn parse_legacy_sink_id(id: &str) -> Result<(String, String)> {
    split_composite(id, "logsink", "cluster_id/logsink/sink_id")
        .map(|(c, n)| (c.to_string(), n.to_string()))
}

/// Connection pools have no kind segment; the pool name may not contain
/// a slash.
pub fn format_pool_id(cluster: &str, name: &str) -> String {
    format!("{}/{}", cluster, name)
}

pub fn parse_pool_id(id: &str) -> Result<(String, String)> {
    match id.split_once('/') {
        Some((cluster, name))
            if !cluster.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((cluster.to_string(), name.to_string()))
        }
        _ => Err(Error::Import(format!(
            "invalid identifier {:?}: must use the format 'cluster_id/pool_name'",
            id
        ))),
    }
}

/// Typed log sinks join cluster and sink ID with a comma; this is both
/// the local ID and the import form.
pub fn format_sink_id(cluster: &str, sink_id: &str) -> String {
    format!("{}{}{}", cluster, IMPORT_SEPARATOR, sink_id)
}

pub fn parse_sink_id(id: &str) -> Result<(String, String)> {
    match id.split_once(IMPORT_SEPARATOR) {
        Some((cluster, sink)) if !cluster.is_empty() && !sink.is_empty() => {
            Ok((cluster.to_string(), sink.to_string()))
        }
        _ => Err(Error::Import(format!(
            "invalid identifier {:?}: must use the format 'cluster_id,logsink_id' for import",
            id
        ))),
    }
}

/// Engine-configuration sentinel, e.g. `cluster/pg-config`.
pub fn format_engine_config_id(cluster: &str, engine: Engine) -> String {
    format!("{}/{}-config", cluster, engine)
}

pub fn parse_engine_config_id(id: &str) -> Result<(String, Engine)> {
    let invalid = || {
        Error::Import(format!(
            "invalid identifier {:?}: must use the format 'cluster_id/<engine>-config'",
            id
        ))
    };
    let (cluster, sentinel) = id.split_once('/').ok_or_else(invalid)?;
    let slug = sentinel.strip_suffix("-config").ok_or_else(invalid)?;
    if cluster.is_empty() {
        return Err(invalid());
    }
    let engine = slug.parse::<Engine>().map_err(|_| invalid())?;
    Ok((cluster.to_string(), engine))
}

/// The remote has no per-ruleset identity, so firewall records get a
/// synthetic `<cluster>-<suffix>` local ID.
pub fn firewall_id(cluster: &str) -> String {
    const SUFFIX_LEN: usize = 10;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .filter_map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET.get(idx).map(|&c| c as char)
        })
        .collect();
    format!("{}-{}", cluster, suffix)
}

/// Parse a comma-joined `cluster,child` import identifier. `form` names
/// the expected shape in the rejection message.
pub fn parse_import_pair(input: &str, form: &str) -> Result<(String, String)> {
    match input.split_once(IMPORT_SEPARATOR) {
        Some((cluster, child)) if !cluster.is_empty() && !child.is_empty() => {
            Ok((cluster.to_string(), child.to_string()))
        }
        _ => Err(Error::Import(format!(
            "invalid import identifier {:?}: must use the format '{}'",
            input, form
        ))),
    }
}
