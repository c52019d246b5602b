//! Log-sink reconciler, shared by the three typed surfaces and the legacy
//! unified one. The surfaces differ in validation strictness and in the
//! local ID form; the remote calls are identical.
//!
//! MongoDB clusters reject rsyslog/opensearch sinks; that diagnostic comes
//! from the remote and is surfaced verbatim rather than pre-empted here.

use tracing::{debug, info, warn};

use crate::client::{LogSinkCreateRequest, LogSinkState};
use crate::id::{format_legacy_sink_id, format_sink_id, parse_legacy_sink_id, parse_sink_id};
use crate::policy::validate_log_sink;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::logsink::{LogSinkRecord, LogSinkSpec};

/// Which resource surface a sink record belongs to; decides its local ID
/// form and the legacy timeout bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkSurface {
    Typed,
    Legacy,
}

impl SinkSurface {
    fn record_id(&self, cluster_id: &str, sink_id: &str) -> String {
        match self {
            SinkSurface::Typed => format_sink_id(cluster_id, sink_id),
            SinkSurface::Legacy => format_legacy_sink_id(cluster_id, sink_id),
        }
    }

    fn is_legacy(&self) -> bool {
        matches!(self, SinkSurface::Legacy)
    }
}

pub async fn create_log_sink(
    ctx: &Context,
    spec: &LogSinkSpec,
    surface: SinkSurface,
) -> Result<LogSinkRecord> {
    validate_log_sink(spec, surface.is_legacy())?;

    let req = LogSinkCreateRequest {
        sink_name: spec.name.clone(),
        config: spec.config.clone(),
    };
    let created = ctx
        .client
        .create_log_sink(&spec.cluster_id, &req)
        .await
        .map_err(|e| Error::remote("creating database log sink", e))?;
    info!(
        cluster = %spec.cluster_id,
        sink = %created.sink_id,
        sink_type = %spec.sink_type(),
        "created database log sink"
    );

    Ok(build_record(&spec.cluster_id, created, surface))
}

pub async fn read_log_sink(ctx: &Context, prior: &LogSinkRecord) -> Result<Option<LogSinkRecord>> {
    match ctx
        .client
        .get_log_sink(&prior.cluster_id, &prior.sink_id)
        .await
    {
        Ok(observed) => {
            let surface = if prior.id.contains(',') {
                SinkSurface::Typed
            } else {
                SinkSurface::Legacy
            };
            Ok(Some(build_record(&prior.cluster_id, observed, surface)))
        }
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, sink = %prior.sink_id, "log sink vanished from remote");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading database log sink", err)),
    }
}

/// `name` and `type` are immutable; only the config updates in place.
pub async fn update_log_sink(
    ctx: &Context,
    prior: &LogSinkRecord,
    spec: &LogSinkSpec,
    surface: SinkSurface,
) -> Result<LogSinkRecord> {
    validate_log_sink(spec, surface.is_legacy())?;
    if spec.sink_type() != prior.config.sink_type() {
        return Err(Error::validation(
            "sink type cannot be changed; replace the sink instead",
        ));
    }

    ctx.client
        .update_log_sink(&prior.cluster_id, &prior.sink_id, &spec.config)
        .await
        .map_err(|e| Error::remote("updating database log sink", e))?;
    debug!(cluster = %prior.cluster_id, sink = %prior.sink_id, "updated database log sink");

    let observed = ctx
        .client
        .get_log_sink(&prior.cluster_id, &prior.sink_id)
        .await
        .map_err(|e| Error::remote("reading database log sink", e))?;
    Ok(build_record(&prior.cluster_id, observed, surface))
}

pub async fn delete_log_sink(ctx: &Context, cluster_id: &str, sink_id: &str) -> Result<()> {
    match ctx.client.delete_log_sink(cluster_id, sink_id).await {
        Ok(()) => {
            info!(cluster = %cluster_id, sink = %sink_id, "deleted database log sink");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, sink = %sink_id, "log sink already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting database log sink", err)),
    }
}

/// Import a typed sink. Only the comma-joined `cluster_id,logsink_id`
/// form is accepted; anything else is rejected with the format hint.
pub async fn import_log_sink(ctx: &Context, input: &str) -> Result<LogSinkRecord> {
    let (cluster_id, sink_id) = parse_sink_id(input)?;
    fetch_imported(ctx, &cluster_id, &sink_id, SinkSurface::Typed).await
}

/// Import a legacy unified sink from its `cluster/logsink/<id>` local ID.
pub async fn import_legacy_log_sink(ctx: &Context, input: &str) -> Result<LogSinkRecord> {
    let (cluster_id, sink_id) = parse_legacy_sink_id(input)?;
    fetch_imported(ctx, &cluster_id, &sink_id, SinkSurface::Legacy).await
}

async fn fetch_imported(
    ctx: &Context,
    cluster_id: &str,
    sink_id: &str,
    surface: SinkSurface,
) -> Result<LogSinkRecord> {
    let observed = ctx
        .client
        .get_log_sink(cluster_id, sink_id)
        .await
        .map_err(|e| Error::remote("importing database log sink", e))?;
    Ok(build_record(cluster_id, observed, surface))
}

fn build_record(cluster_id: &str, observed: LogSinkState, surface: SinkSurface) -> LogSinkRecord {
    LogSinkRecord {
        id: surface.record_id(cluster_id, &observed.sink_id),
        cluster_id: cluster_id.to_string(),
        sink_id: observed.sink_id,
        name: observed.sink_name,
        config: observed.config,
    }
}
