//! Plan-time validation for Kafka topics and schema-registry subjects.

use crate::reconciler::error::{Error, Result};
use crate::spec::kafka::{KafkaTopicSpec, SchemaSubjectSpec, MESSAGE_FORMAT_VERSIONS};

pub const MIN_PARTITIONS: u32 = 3;
pub const MAX_PARTITIONS: u32 = 2048;
pub const MIN_REPLICATION_FACTOR: u32 = 2;

pub fn validate_topic(spec: &KafkaTopicSpec) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("topic name must not be empty"));
    }
    if !(MIN_PARTITIONS..=MAX_PARTITIONS).contains(&spec.partition_count) {
        return Err(Error::validation(format!(
            "expected partition_count to be in the range ({} - {}), got {}",
            MIN_PARTITIONS, MAX_PARTITIONS, spec.partition_count
        )));
    }
    if spec.replication_factor < MIN_REPLICATION_FACTOR {
        return Err(Error::validation(format!(
            "expected replication_factor to be at least {}, got {}",
            MIN_REPLICATION_FACTOR, spec.replication_factor
        )));
    }

    let config = match &spec.config {
        Some(config) => config,
        None => return Ok(()),
    };

    if let Some(ratio) = config.min_cleanable_dirty_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(Error::validation(format!(
                "expected min_cleanable_dirty_ratio to be in the range (0.0 - 1.0), got {}",
                ratio
            )));
        }
    }
    if let Some(version) = config.message_format_version.as_deref() {
        if !MESSAGE_FORMAT_VERSIONS.contains(&version) {
            return Err(Error::validation(format!(
                "expected message_format_version to be one of the supported versions, got {:?}",
                version
            )));
        }
    }

    // Duration/size tunables travel as decimal strings so they survive
    // beyond i64; they still have to be decimal. -1 disables retention.
    for (field, value, allow_negative) in [
        ("delete_retention_ms", &config.delete_retention_ms, false),
        ("file_delete_delay_ms", &config.file_delete_delay_ms, false),
        ("flush_messages", &config.flush_messages, false),
        ("flush_ms", &config.flush_ms, false),
        ("max_compaction_lag_ms", &config.max_compaction_lag_ms, false),
        (
            "message_timestamp_difference_max_ms",
            &config.message_timestamp_difference_max_ms,
            false,
        ),
        ("min_compaction_lag_ms", &config.min_compaction_lag_ms, false),
        ("retention_bytes", &config.retention_bytes, true),
        ("retention_ms", &config.retention_ms, true),
        ("segment_jitter_ms", &config.segment_jitter_ms, false),
        ("segment_ms", &config.segment_ms, false),
    ] {
        if let Some(raw) = value.as_deref() {
            validate_decimal_string(field, raw, allow_negative)?;
        }
    }

    Ok(())
}

fn validate_decimal_string(field: &str, raw: &str, allow_negative: bool) -> Result<()> {
    if allow_negative && raw == "-1" {
        return Ok(());
    }
    if raw.parse::<u128>().is_err() {
        return Err(Error::validation(format!(
            "expected {} to be a decimal number, got {:?}",
            field, raw
        )));
    }
    Ok(())
}

pub fn validate_schema_subject(spec: &SchemaSubjectSpec) -> Result<()> {
    if spec.subject_name.trim().is_empty() {
        return Err(Error::validation("subject_name must not be empty"));
    }
    if spec.schema.trim().is_empty() {
        return Err(Error::validation("schema must not be empty"));
    }
    Ok(())
}
