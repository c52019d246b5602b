//! Connection-pool reconciler. Every attribute is immutable, so there is
//! no update path; any change is destroy-and-recreate at the plan level.

use tracing::{debug, info, warn};

use crate::client::{PoolCreateRequest, PoolState};
use crate::id::{format_pool_id, parse_import_pair};
use crate::policy::validate_pool;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::pool::{ConnectionPoolRecord, ConnectionPoolSpec};

pub async fn create_pool(ctx: &Context, spec: &ConnectionPoolSpec) -> Result<ConnectionPoolRecord> {
    validate_pool(spec)?;

    // With skip_if_exists, a retry after a 5xx on an already-applied
    // create converges by adopting the existing pool.
    if spec.skip_if_exists {
        match ctx.client.get_pool(&spec.cluster_id, &spec.name).await {
            Ok(existing) => {
                debug!(cluster = %spec.cluster_id, pool = %spec.name, "pool already exists, skipping create");
                return Ok(build_record(&spec.cluster_id, existing));
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(Error::remote("probing connection pool", err)),
        }
    }

    let req = PoolCreateRequest {
        name: spec.name.clone(),
        mode: spec.mode,
        size: spec.size,
        db_name: spec.db_name.clone(),
        user: spec.user.clone(),
    };
    let created = ctx
        .client
        .create_pool(&spec.cluster_id, &req)
        .await
        .map_err(|e| Error::remote("creating connection pool", e))?;
    info!(cluster = %spec.cluster_id, pool = %spec.name, mode = %spec.mode, "created connection pool");

    Ok(build_record(&spec.cluster_id, created))
}

pub async fn read_pool(
    ctx: &Context,
    prior: &ConnectionPoolRecord,
) -> Result<Option<ConnectionPoolRecord>> {
    match ctx.client.get_pool(&prior.cluster_id, &prior.name).await {
        Ok(observed) => Ok(Some(build_record(&prior.cluster_id, observed))),
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, pool = %prior.name, "connection pool vanished from remote");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading connection pool", err)),
    }
}

pub async fn delete_pool(ctx: &Context, cluster_id: &str, name: &str) -> Result<()> {
    match ctx.client.delete_pool(cluster_id, name).await {
        Ok(()) => {
            info!(cluster = %cluster_id, pool = %name, "deleted connection pool");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, pool = %name, "connection pool already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting connection pool", err)),
    }
}

/// Import from a `cluster_id,pool_name` identifier.
pub async fn import_pool(ctx: &Context, input: &str) -> Result<ConnectionPoolRecord> {
    let (cluster_id, name) = parse_import_pair(input, "cluster_id,pool_name")?;
    let observed = ctx
        .client
        .get_pool(&cluster_id, &name)
        .await
        .map_err(|e| Error::remote("importing connection pool", e))?;
    Ok(build_record(&cluster_id, observed))
}

fn build_record(cluster_id: &str, observed: PoolState) -> ConnectionPoolRecord {
    ConnectionPoolRecord {
        id: format_pool_id(cluster_id, &observed.name),
        cluster_id: cluster_id.to_string(),
        name: observed.name,
        mode: observed.mode,
        size: observed.size,
        db_name: observed.db_name,
        user: observed.user,
    }
}
