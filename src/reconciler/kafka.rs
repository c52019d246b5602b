//! Kafka topic and schema-registry reconcilers.
//!
//! Partition counts only grow at the remote; any declared change goes
//! through the update call and the remote enforces monotonicity. Schema
//! subjects are immutable after create: a changed schema is a replace.

use tracing::{debug, info, warn};

use crate::client::{
    SchemaSubjectCreateRequest, TopicCreateRequest, TopicState, TopicUpdateRequest,
};
use crate::id::{format_schema_subject_id, format_topic_id, parse_import_pair};
use crate::policy::{validate_schema_subject, validate_topic};
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::kafka::{KafkaTopicRecord, KafkaTopicSpec, SchemaSubjectRecord, SchemaSubjectSpec};

pub async fn create_topic(ctx: &Context, spec: &KafkaTopicSpec) -> Result<KafkaTopicRecord> {
    validate_topic(spec)?;

    let req = TopicCreateRequest {
        name: spec.name.clone(),
        partition_count: spec.partition_count,
        replication_factor: spec.replication_factor,
        config: spec.config.clone(),
    };
    let created = ctx
        .client
        .create_topic(&spec.cluster_id, &req)
        .await
        .map_err(|e| Error::remote("creating Kafka topic", e))?;
    info!(
        cluster = %spec.cluster_id,
        topic = %spec.name,
        partitions = spec.partition_count,
        "created Kafka topic"
    );

    Ok(build_topic_record(&spec.cluster_id, created))
}

pub async fn read_topic(ctx: &Context, prior: &KafkaTopicRecord) -> Result<Option<KafkaTopicRecord>> {
    match ctx.client.get_topic(&prior.cluster_id, &prior.name).await {
        Ok(observed) => Ok(Some(build_topic_record(&prior.cluster_id, observed))),
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, topic = %prior.name, "Kafka topic vanished from remote");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading Kafka topic", err)),
    }
}

pub async fn update_topic(
    ctx: &Context,
    prior: &KafkaTopicRecord,
    spec: &KafkaTopicSpec,
) -> Result<KafkaTopicRecord> {
    validate_topic(spec)?;

    let req = TopicUpdateRequest {
        partition_count: spec.partition_count,
        replication_factor: spec.replication_factor,
        config: spec.config.clone(),
    };
    ctx.client
        .update_topic(&prior.cluster_id, &prior.name, &req)
        .await
        .map_err(|e| Error::remote("updating Kafka topic", e))?;
    debug!(cluster = %prior.cluster_id, topic = %prior.name, "updated Kafka topic");

    let observed = ctx
        .client
        .get_topic(&prior.cluster_id, &prior.name)
        .await
        .map_err(|e| Error::remote("reading Kafka topic", e))?;
    Ok(build_topic_record(&prior.cluster_id, observed))
}

pub async fn delete_topic(ctx: &Context, cluster_id: &str, name: &str) -> Result<()> {
    match ctx.client.delete_topic(cluster_id, name).await {
        Ok(()) => {
            info!(cluster = %cluster_id, topic = %name, "deleted Kafka topic");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, topic = %name, "Kafka topic already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting Kafka topic", err)),
    }
}

/// Import from a `cluster_id,topic_name` identifier.
pub async fn import_topic(ctx: &Context, input: &str) -> Result<KafkaTopicRecord> {
    let (cluster_id, name) = parse_import_pair(input, "cluster_id,topic_name")?;
    let observed = ctx
        .client
        .get_topic(&cluster_id, &name)
        .await
        .map_err(|e| Error::remote("importing Kafka topic", e))?;
    Ok(build_topic_record(&cluster_id, observed))
}

fn build_topic_record(cluster_id: &str, observed: TopicState) -> KafkaTopicRecord {
    KafkaTopicRecord {
        id: format_topic_id(cluster_id, &observed.name),
        cluster_id: cluster_id.to_string(),
        name: observed.name,
        partition_count: observed.partition_count,
        replication_factor: observed.replication_factor,
        config: observed.config,
        state: observed.state,
    }
}

pub async fn create_schema_subject(
    ctx: &Context,
    spec: &SchemaSubjectSpec,
) -> Result<SchemaSubjectRecord> {
    validate_schema_subject(spec)?;

    let req = SchemaSubjectCreateRequest {
        subject_name: spec.subject_name.clone(),
        schema_type: spec.schema_type,
        schema: spec.schema.clone(),
    };
    let created = ctx
        .client
        .create_schema_subject(&spec.cluster_id, &req)
        .await
        .map_err(|e| Error::remote("creating Kafka schema-registry subject", e))?;
    info!(cluster = %spec.cluster_id, subject = %spec.subject_name, "registered schema subject");

    Ok(SchemaSubjectRecord {
        id: format_schema_subject_id(&spec.cluster_id, &created.subject_name),
        cluster_id: spec.cluster_id.clone(),
        subject_name: created.subject_name,
        schema_type: created.schema_type,
        schema: created.schema,
    })
}

pub async fn read_schema_subject(
    ctx: &Context,
    prior: &SchemaSubjectRecord,
) -> Result<Option<SchemaSubjectRecord>> {
    match ctx
        .client
        .get_schema_subject(&prior.cluster_id, &prior.subject_name)
        .await
    {
        Ok(observed) => Ok(Some(SchemaSubjectRecord {
            id: prior.id.clone(),
            cluster_id: prior.cluster_id.clone(),
            subject_name: observed.subject_name,
            schema_type: observed.schema_type,
            schema: observed.schema,
        })),
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, subject = %prior.subject_name, "schema subject vanished from remote");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading Kafka schema-registry subject", err)),
    }
}

pub async fn delete_schema_subject(ctx: &Context, cluster_id: &str, subject: &str) -> Result<()> {
    match ctx.client.delete_schema_subject(cluster_id, subject).await {
        Ok(()) => {
            info!(cluster = %cluster_id, subject = %subject, "deleted schema subject");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, subject = %subject, "schema subject already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting Kafka schema-registry subject", err)),
    }
}

/// Import from `cluster_id,subject_name`, or from a bare cluster UUID when
/// the subject name is supplied by the declaration being imported into.
pub async fn import_schema_subject(
    ctx: &Context,
    input: &str,
    declared_subject: Option<&str>,
) -> Result<SchemaSubjectRecord> {
    let (cluster_id, subject) = match input.split_once(',') {
        Some((cluster, subject)) if !cluster.is_empty() && !subject.is_empty() => {
            (cluster.to_string(), subject.to_string())
        }
        Some(_) => {
            return Err(Error::Import(format!(
                "invalid import identifier {:?}: must use the format 'cluster_id,subject_name'",
                input
            )))
        }
        None => match declared_subject {
            Some(subject) => (input.to_string(), subject.to_string()),
            None => {
                return Err(Error::Import(format!(
                    "invalid import identifier {:?}: must use the format 'cluster_id,subject_name' \
                     when no subject is declared",
                    input
                )))
            }
        },
    };

    let observed = ctx
        .client
        .get_schema_subject(&cluster_id, &subject)
        .await
        .map_err(|e| Error::remote("importing Kafka schema-registry subject", e))?;
    Ok(SchemaSubjectRecord {
        id: format_schema_subject_id(&cluster_id, &observed.subject_name),
        cluster_id,
        subject_name: observed.subject_name,
        schema_type: observed.schema_type,
        schema: observed.schema,
    })
}
