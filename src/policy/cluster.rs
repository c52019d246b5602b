//! Cross-field validation for cluster declarations.

use crate::reconciler::error::{Error, Result};
use crate::spec::cluster::{ClusterSpec, MaintenanceWindow};

/// Validate a cluster declaration before any remote call is made.
pub fn validate_cluster(spec: &ClusterSpec) -> Result<()> {
    validate_version(spec)?;
    validate_engine_scoped_attributes(spec)?;
    validate_node_count(spec)?;
    validate_storage_size(spec)?;
    if let Some(window) = &spec.maintenance_window {
        validate_maintenance_window(window)?;
    }
    if spec.region.trim().is_empty() {
        return Err(Error::validation("the argument \"region\" must not be empty"));
    }
    Ok(())
}

/// `version` is required on every declaration. For Redis the remote would
/// also accept a create without one and fail later; surfacing the same
/// message up front keeps the two paths identical.
fn validate_version(spec: &ClusterSpec) -> Result<()> {
    match spec.version.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(Error::validation("The argument \"version\" is required")),
    }
}

fn validate_engine_scoped_attributes(spec: &ClusterSpec) -> Result<()> {
    if spec.eviction_policy.is_some() && !spec.engine.supports_eviction_policy() {
        return Err(Error::validation(format!(
            "eviction_policy is only supported for Redis and Valkey clusters, not {}",
            spec.engine
        )));
    }
    if spec.sql_mode.is_some() && !spec.engine.supports_sql_mode() {
        return Err(Error::validation(format!(
            "sql_mode is only supported for MySQL clusters, not {}",
            spec.engine
        )));
    }
    Ok(())
}

fn validate_node_count(spec: &ClusterSpec) -> Result<()> {
    if spec.node_count == 0 {
        return Err(Error::validation("node_count must be at least 1"));
    }
    Ok(())
}

/// `storage_size_mib` is a decimal string so values beyond i64 survive;
/// anything that is not an unsigned decimal is rejected here.
fn validate_storage_size(spec: &ClusterSpec) -> Result<()> {
    if let Some(raw) = spec.storage_size_mib.as_deref() {
        if raw.parse::<u128>().is_err() {
            return Err(Error::validation(format!(
                "storage_size_mib must be an unsigned decimal number, got {:?}",
                raw
            )));
        }
    }
    Ok(())
}

fn validate_maintenance_window(window: &MaintenanceWindow) -> Result<()> {
    let mut parts = window.hour.split(':');
    parts
        .next()
        .and_then(|h| h.parse::<u8>().ok())
        .filter(|h| *h < 24)
        .ok_or_else(|| bad_hour(&window.hour))?;
    for part in [parts.next(), parts.next()].into_iter().flatten() {
        let value: u8 = part.parse().map_err(|_| bad_hour(&window.hour))?;
        if value >= 60 {
            return Err(bad_hour(&window.hour));
        }
    }
    if parts.next().is_some() {
        return Err(bad_hour(&window.hour));
    }
    if window.day.trim().is_empty() {
        return Err(Error::validation("maintenance_window day must not be empty"));
    }
    Ok(())
}

fn bad_hour(raw: &str) -> Error {
    Error::validation(format!(
        "maintenance_window hour must be HH, HH:MM or HH:MM:SS, got {:?}",
        raw
    ))
}
