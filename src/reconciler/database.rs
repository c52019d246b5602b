//! Logical-database reconciler: pure create/delete with an existence
//! check on read.

use tracing::{debug, info, warn};

use crate::id::{format_database_id, parse_import_pair};
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::database::{LogicalDatabaseRecord, LogicalDatabaseSpec};

pub async fn create_database(ctx: &Context, spec: &LogicalDatabaseSpec) -> Result<LogicalDatabaseRecord> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("database name must not be empty"));
    }
    let created = ctx
        .client
        .create_database(&spec.cluster_id, &spec.name)
        .await
        .map_err(|e| Error::remote("creating logical database", e))?;
    info!(cluster = %spec.cluster_id, database = %created.name, "created logical database");

    Ok(LogicalDatabaseRecord {
        id: format_database_id(&spec.cluster_id, &created.name),
        cluster_id: spec.cluster_id.clone(),
        name: created.name,
    })
}

pub async fn read_database(
    ctx: &Context,
    prior: &LogicalDatabaseRecord,
) -> Result<Option<LogicalDatabaseRecord>> {
    match ctx.client.get_database(&prior.cluster_id, &prior.name).await {
        Ok(_) => Ok(Some(prior.clone())),
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, database = %prior.name, "logical database vanished from remote");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading logical database", err)),
    }
}

pub async fn delete_database(ctx: &Context, cluster_id: &str, name: &str) -> Result<()> {
    match ctx.client.delete_database(cluster_id, name).await {
        Ok(()) => {
            info!(cluster = %cluster_id, database = %name, "deleted logical database");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, database = %name, "logical database already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting logical database", err)),
    }
}

/// Import from a `cluster_id,database_name` identifier.
pub async fn import_database(ctx: &Context, input: &str) -> Result<LogicalDatabaseRecord> {
    let (cluster_id, name) = parse_import_pair(input, "cluster_id,database_name")?;
    let observed = ctx
        .client
        .get_database(&cluster_id, &name)
        .await
        .map_err(|e| Error::remote("importing logical database", e))?;
    Ok(LogicalDatabaseRecord {
        id: format_database_id(&cluster_id, &observed.name),
        cluster_id,
        name: observed.name,
    })
}
