//! Engine-configuration reconciler.
//!
//! One uniform pattern for every engine: creation is an update of a
//! configuration that already exists on the remote, read copies every
//! field back, and destroy only removes the local record. The remote
//! configuration is deliberately left intact on destroy and the caller
//! receives a Warning diagnostic saying so.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::id::format_engine_config_id;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Diagnostic, Error, Result};
use crate::spec::engine_config::{EngineConfig, EngineConfigRecord, EngineConfigSpec};

/// Apply a declared configuration. Used for both create and update; the
/// request carries only the fields the declaration sets.
pub async fn apply_engine_config<C: EngineConfig>(
    ctx: &Context,
    spec: &EngineConfigSpec<C>,
) -> Result<EngineConfigRecord<C>> {
    spec.config.validate()?;

    let payload = to_payload(&spec.config)?;
    ctx.client
        .update_engine_config(&spec.cluster_id, C::ENGINE, &payload)
        .await
        .map_err(|e| Error::remote(format!("updating {} configuration", C::ENGINE), e))?;
    info!(cluster = %spec.cluster_id, engine = %C::ENGINE, "applied engine configuration");

    fetch_record(ctx, &spec.cluster_id).await
}

pub async fn read_engine_config<C: EngineConfig>(
    ctx: &Context,
    prior: &EngineConfigRecord<C>,
) -> Result<Option<EngineConfigRecord<C>>> {
    match ctx
        .client
        .get_engine_config(&prior.cluster_id, C::ENGINE)
        .await
    {
        Ok(payload) => {
            let config: C = serde_json::from_value(payload)?;
            Ok(Some(EngineConfigRecord {
                id: prior.id.clone(),
                cluster_id: prior.cluster_id.clone(),
                config,
            }))
        }
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, engine = %C::ENGINE, "cluster vanished, clearing configuration record");
            Ok(None)
        }
        Err(err) => Err(Error::remote(
            format!("reading {} configuration", C::ENGINE),
            err,
        )),
    }
}

/// Destroy is local-only: nothing is unset on the remote. The returned
/// Warning diagnostic must be surfaced to the user.
pub async fn delete_engine_config<C: EngineConfig>(
    _ctx: &Context,
    record: &EngineConfigRecord<C>,
) -> Result<Diagnostic> {
    warn!(
        cluster = %record.cluster_id,
        engine = %C::ENGINE,
        "engine configuration removed from tracking; remote configuration retained"
    );
    Ok(Diagnostic::warning(
        format!("{} configuration is not restored on destroy", C::ENGINE),
        format!(
            "Removing this resource only stops tracking the {} configuration of cluster {}; \
             the configuration itself remains as last applied on the remote.",
            C::ENGINE,
            record.cluster_id
        ),
    ))
}

/// Import by cluster UUID; the sentinel local ID is derived from the
/// engine.
pub async fn import_engine_config<C: EngineConfig>(
    ctx: &Context,
    cluster_id: &str,
) -> Result<EngineConfigRecord<C>> {
    let payload = ctx
        .client
        .get_engine_config(cluster_id, C::ENGINE)
        .await
        .map_err(|e| Error::remote(format!("importing {} configuration", C::ENGINE), e))?;
    let config: C = serde_json::from_value(payload)?;
    debug!(cluster = %cluster_id, engine = %C::ENGINE, "imported engine configuration");
    Ok(EngineConfigRecord {
        id: format_engine_config_id(cluster_id, C::ENGINE),
        cluster_id: cluster_id.to_string(),
        config,
    })
}

async fn fetch_record<C: EngineConfig>(
    ctx: &Context,
    cluster_id: &str,
) -> Result<EngineConfigRecord<C>> {
    let payload = ctx
        .client
        .get_engine_config(cluster_id, C::ENGINE)
        .await
        .map_err(|e| Error::remote(format!("reading {} configuration", C::ENGINE), e))?;
    let config: C = serde_json::from_value(payload)?;
    Ok(EngineConfigRecord {
        id: format_engine_config_id(cluster_id, C::ENGINE),
        cluster_id: cluster_id.to_string(),
        config,
    })
}

fn to_payload<C: Serialize>(config: &C) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(config)?)
}
