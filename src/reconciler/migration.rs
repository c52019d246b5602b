//! Online-migration coordinator.
//!
//! A short cooperative state machine layered on the destination cluster:
//! verify the destination exists, hold off for a fixed stabilization
//! delay, issue the start call, then poll. An observed `error` status
//! reissues the start (the source may not have been ready); a nil status
//! keeps polling; `syncing` or `done` is success. The budget exhausting
//! converts into the explicit start-failure diagnostic.

use tracing::{debug, info, warn};

use crate::client::OnlineMigrationRequest;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::migration::{MigrationStatus, OnlineMigrationRecord, OnlineMigrationSpec};

pub async fn start_migration(
    ctx: &Context,
    spec: &OnlineMigrationSpec,
) -> Result<OnlineMigrationRecord> {
    if spec.source.host.trim().is_empty() {
        return Err(Error::validation("migration source host must not be empty"));
    }

    // The destination must exist before anything is attempted.
    ctx.client
        .get_cluster(&spec.cluster_id)
        .await
        .map_err(|e| Error::remote("reading destination database cluster", e))?;

    // Freshly provisioned clusters reject migrations for a short while.
    debug!(cluster = %spec.cluster_id, "waiting out migration stabilization delay");
    tokio::time::sleep(ctx.config.migration_stabilization_delay).await;

    let req = OnlineMigrationRequest {
        source: spec.source.clone(),
        disable_ssl: spec.disable_ssl,
        ignore_dbs: spec.ignore_dbs.clone(),
    };
    ctx.client
        .start_online_migration(&spec.cluster_id, &req)
        .await
        .map_err(|e| Error::remote("starting online migration", e))?;

    let interval = ctx.config.migration_poll_interval;
    let ticks =
        (ctx.config.migration_poll_budget.as_secs() / interval.as_secs().max(1)).max(1);
    let mut last_status: Option<MigrationStatus> = None;

    for tick in 0..ticks {
        tokio::time::sleep(interval).await;

        let observed = ctx
            .client
            .get_online_migration_status(&spec.cluster_id)
            .await
            .map_err(|e| Error::remote("reading online migration status", e))?;

        match observed {
            None => {
                debug!(cluster = %spec.cluster_id, tick, "no migration status yet");
            }
            Some(state) if state.status == MigrationStatus::Error => {
                // The source database may not have been reachable yet; one
                // restart attempt per tick.
                warn!(cluster = %spec.cluster_id, tick, "migration reported error, reissuing start");
                last_status = Some(state.status);
                ctx.client
                    .start_online_migration(&spec.cluster_id, &req)
                    .await
                    .map_err(|e| Error::remote("restarting online migration", e))?;
            }
            Some(state) if state.status.is_started() => {
                info!(
                    cluster = %spec.cluster_id,
                    migration = %state.id,
                    status = %state.status,
                    "online migration started"
                );
                return Ok(OnlineMigrationRecord {
                    id: state.id,
                    cluster_id: spec.cluster_id.clone(),
                    status: state.status,
                    created_at: state.created_at,
                });
            }
            Some(state) => {
                debug!(cluster = %spec.cluster_id, status = %state.status, tick, "migration not started yet");
                last_status = Some(state.status);
            }
        }
    }

    Err(Error::MigrationStart(match last_status {
        Some(status) => format!(
            "migration on cluster {} stuck in status {} after {} polls",
            spec.cluster_id, status, ticks
        ),
        None => format!(
            "migration on cluster {} reported no status after {} polls",
            spec.cluster_id, ticks
        ),
    }))
}

/// Refresh the record. A missing remote migration clears it.
pub async fn read_migration(
    ctx: &Context,
    prior: &OnlineMigrationRecord,
) -> Result<Option<OnlineMigrationRecord>> {
    let observed = match ctx
        .client
        .get_online_migration_status(&prior.cluster_id)
        .await
    {
        Ok(observed) => observed,
        Err(err) if err.is_not_found() => None,
        Err(err) => return Err(Error::remote("reading online migration status", err)),
    };

    match observed {
        Some(state) if state.id == prior.id => Ok(Some(OnlineMigrationRecord {
            id: state.id,
            cluster_id: prior.cluster_id.clone(),
            status: state.status,
            created_at: state.created_at.or(prior.created_at),
        })),
        _ => {
            warn!(cluster = %prior.cluster_id, migration = %prior.id, "online migration no longer present");
            Ok(None)
        }
    }
}

pub async fn stop_migration(ctx: &Context, cluster_id: &str, migration_id: &str) -> Result<()> {
    match ctx
        .client
        .stop_online_migration(cluster_id, migration_id)
        .await
    {
        Ok(()) => {
            info!(cluster = %cluster_id, migration = %migration_id, "stopped online migration");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, migration = %migration_id, "online migration already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("stopping online migration", err)),
    }
}
