//! Plan-time validation for connection pools.

use crate::reconciler::error::{Error, Result};
use crate::spec::pool::{ConnectionPoolSpec, PoolMode};

/// Parse a raw pool mode as it appears in host configuration. Hosts that
/// already carry a typed [`PoolMode`] never hit the rejection path.
pub fn parse_pool_mode(raw: &str) -> Result<PoolMode> {
    match raw {
        "session" => Ok(PoolMode::Session),
        "transaction" => Ok(PoolMode::Transaction),
        "statement" => Ok(PoolMode::Statement),
        other => Err(Error::validation(format!(
            "expected mode to be one of [{}], got {}",
            PoolMode::ALL.join(" "),
            other
        ))),
    }
}

pub fn validate_pool(spec: &ConnectionPoolSpec) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("pool name must not be empty"));
    }
    if spec.size < 1 {
        return Err(Error::validation(format!(
            "expected size to be at least 1, got {}",
            spec.size
        )));
    }
    if spec.db_name.trim().is_empty() {
        return Err(Error::validation("db_name must not be empty"));
    }
    Ok(())
}
