//! Provisioning waiters.
//!
//! Mutating cluster operations are asynchronous on the remote; these
//! loops poll until the target status is reached or a bounded number of
//! ticks elapses. A 404 during the poll means the object is not yet
//! observable and the loop continues; any other error aborts.

use std::time::Duration;

use tracing::debug;

use crate::client::ClusterStatus;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};

/// Poll a cluster until it reaches `target`. The tick count is derived
/// from `timeout / poll interval`, so the default 30-minute create budget
/// yields 120 polls at 15 s.
pub async fn wait_for_cluster_status(
    ctx: &Context,
    cluster_id: &str,
    target: ClusterStatus,
    timeout: Duration,
) -> Result<()> {
    let interval = ctx.config.status_poll_interval;
    let ticks = (timeout.as_secs() / interval.as_secs().max(1)).max(1);

    for tick in 0..ticks {
        match ctx.client.get_cluster(cluster_id).await {
            Ok(cluster) if cluster.status == target => {
                debug!(cluster = %cluster_id, status = %target, tick, "cluster reached target status");
                return Ok(());
            }
            Ok(cluster) => {
                debug!(cluster = %cluster_id, status = %cluster.status, tick, "waiting for cluster status");
            }
            Err(err) if err.is_not_found() => {
                // Not observable yet right after create; keep polling.
                debug!(cluster = %cluster_id, tick, "cluster not yet observable");
            }
            Err(err) => return Err(Error::remote("reading database cluster status", err)),
        }
        tokio::time::sleep(interval).await;
    }

    Err(Error::Timeout(target.to_string()))
}

/// Poll a replica until it comes online, bounded by the replica budget
/// (120 ticks at 15 s by default).
pub async fn wait_for_replica_online(ctx: &Context, cluster_id: &str, name: &str) -> Result<()> {
    let interval = ctx.config.replica_poll_interval;

    for tick in 0..ctx.config.replica_poll_budget {
        match ctx.client.get_replica(cluster_id, name).await {
            Ok(replica) if replica.status == ClusterStatus::Online => {
                debug!(cluster = %cluster_id, replica = %name, tick, "replica online");
                return Ok(());
            }
            Ok(replica) => {
                debug!(cluster = %cluster_id, replica = %name, status = %replica.status, tick, "waiting for replica");
            }
            Err(err) if err.is_not_found() => {
                debug!(cluster = %cluster_id, replica = %name, tick, "replica not yet observable");
            }
            Err(err) => return Err(Error::remote("reading database replica status", err)),
        }
        tokio::time::sleep(interval).await;
    }

    Err(Error::Timeout(ClusterStatus::Online.to_string()))
}
