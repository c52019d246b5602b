//! Replica reconciler.
//!
//! Create retries on 412 Precondition Failed: the source cluster may not
//! have taken its first backup yet. After the create lands, a bounded
//! waiter polls until the replica is online. The remote UUID is recorded
//! as its own attribute; the stable local ID stays the composite
//! `cluster/replicas/<name>` form.

use tracing::{debug, info, warn};

use crate::client::{ClusterConnection, ReplicaCreateRequest, ReplicaState};
use crate::id::{format_replica_id, parse_import_pair};
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::reconciler::waiter::wait_for_replica_online;
use crate::spec::replica::{ReplicaRecord, ReplicaSpec};

pub async fn create_replica(ctx: &Context, spec: &ReplicaSpec) -> Result<ReplicaRecord> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("replica name must not be empty"));
    }

    let req = ReplicaCreateRequest {
        name: spec.name.clone(),
        region: spec.region.as_ref().map(|r| r.to_lowercase()),
        size: spec.size.clone(),
        tags: spec.tags.clone(),
        private_network_uuid: spec.private_network_uuid.clone(),
    };

    let mut attempt = 0u32;
    loop {
        match ctx.client.create_replica(&spec.cluster_id, &req).await {
            Ok(_) => break,
            Err(err) if err.is_precondition_failed() => {
                attempt += 1;
                if attempt >= ctx.config.replica_poll_budget {
                    return Err(Error::remote("creating database replica", err));
                }
                debug!(
                    cluster = %spec.cluster_id,
                    replica = %spec.name,
                    attempt,
                    "source cluster has no backup yet, retrying replica create"
                );
                tokio::time::sleep(ctx.config.replica_poll_interval).await;
            }
            Err(err) => return Err(Error::remote("creating database replica", err)),
        }
    }
    info!(cluster = %spec.cluster_id, replica = %spec.name, "created database replica");

    wait_for_replica_online(ctx, &spec.cluster_id, &spec.name).await?;

    let observed = ctx
        .client
        .get_replica(&spec.cluster_id, &spec.name)
        .await
        .map_err(|e| Error::remote("reading database replica", e))?;
    Ok(build_record(&spec.cluster_id, observed, spec.size.clone()))
}

pub async fn read_replica(ctx: &Context, prior: &ReplicaRecord) -> Result<Option<ReplicaRecord>> {
    match ctx.client.get_replica(&prior.cluster_id, &prior.name).await {
        Ok(observed) => {
            // `size` is never reported back; carry the declared value so
            // it does not read as drift.
            Ok(Some(build_record(
                &prior.cluster_id,
                observed,
                prior.size.clone(),
            )))
        }
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, replica = %prior.name, "replica vanished from remote");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading database replica", err)),
    }
}

pub async fn delete_replica(ctx: &Context, cluster_id: &str, name: &str) -> Result<()> {
    match ctx.client.delete_replica(cluster_id, name).await {
        Ok(()) => {
            info!(cluster = %cluster_id, replica = %name, "deleted database replica");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, replica = %name, "replica already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting database replica", err)),
    }
}

/// Import from a `cluster_id,replica_name` identifier. `size` starts
/// unset and is excluded from drift checks.
pub async fn import_replica(ctx: &Context, input: &str) -> Result<ReplicaRecord> {
    let (cluster_id, name) = parse_import_pair(input, "cluster_id,replica_name")?;
    let observed = ctx
        .client
        .get_replica(&cluster_id, &name)
        .await
        .map_err(|e| Error::remote("importing database replica", e))?;
    Ok(build_record(&cluster_id, observed, None))
}

fn build_record(cluster_id: &str, observed: ReplicaState, size: Option<String>) -> ReplicaRecord {
    let uri = observed.connection.as_ref().map(uri_of);
    let private_uri = observed.private_connection.as_ref().map(uri_of);
    ReplicaRecord {
        id: format_replica_id(cluster_id, &observed.name),
        uuid: observed.id,
        cluster_id: cluster_id.to_string(),
        name: observed.name,
        region: observed.region,
        size,
        tags: observed.tags,
        private_network_uuid: observed.private_network_uuid,
        status: observed.status,
        connection: observed.connection,
        private_connection: observed.private_connection,
        uri,
        private_uri,
    }
}

fn uri_of(connection: &ClusterConnection) -> String {
    connection.uri.clone()
}
