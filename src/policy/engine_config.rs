//! Numeric-range and enum constraints for engine configurations.
//!
//! Closed enums are already enforced by the config types themselves; what
//! remains here are the range constraints the remote would otherwise
//! reject at apply time.

use crate::reconciler::error::{Error, Result};
use crate::spec::engine_config::{KafkaConfig, MysqlConfig, OpensearchConfig, PgConfig};

pub fn validate_pg_config(config: &PgConfig) -> Result<()> {
    if let Some(hour) = config.backup_hour {
        if hour > 23 {
            return Err(range_error("backup_hour", 0, 23, hour as i64));
        }
    }
    if let Some(minute) = config.backup_minute {
        if minute > 59 {
            return Err(range_error("backup_minute", 0, 59, minute as i64));
        }
    }
    if let Some(pct) = config.shared_buffers_percentage {
        if !(20.0..=60.0).contains(&pct) {
            return Err(Error::validation(format!(
                "expected shared_buffers_percentage to be in the range (20 - 60), got {}",
                pct
            )));
        }
    }
    if let Some(size) = config.track_activity_query_size {
        if !(1024..=10240).contains(&size) {
            return Err(range_error("track_activity_query_size", 1024, 10240, size as i64));
        }
    }
    if let Some(mem) = config.work_mem {
        if !(1..=1024).contains(&mem) {
            return Err(range_error("work_mem", 1, 1024, mem as i64));
        }
    }
    Ok(())
}

pub fn validate_mysql_config(config: &MysqlConfig) -> Result<()> {
    if let Some(hour) = config.backup_hour {
        if hour > 23 {
            return Err(range_error("backup_hour", 0, 23, hour as i64));
        }
    }
    if let Some(minute) = config.backup_minute {
        if minute > 59 {
            return Err(range_error("backup_minute", 0, 59, minute as i64));
        }
    }
    if let Some(raw) = config.group_concat_max_len.as_deref() {
        if raw.parse::<u128>().is_err() {
            return Err(Error::validation(format!(
                "expected group_concat_max_len to be a decimal number, got {:?}",
                raw
            )));
        }
    }
    Ok(())
}

pub fn validate_kafka_cluster_config(config: &KafkaConfig) -> Result<()> {
    if let Some(ratio) = config.log_cleaner_min_cleanable_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(Error::validation(format!(
                "expected log_cleaner_min_cleanable_ratio to be in the range (0.0 - 1.0), got {}",
                ratio
            )));
        }
    }
    for (field, value, allow_negative) in [
        (
            "log_cleaner_max_compaction_lag_ms",
            &config.log_cleaner_max_compaction_lag_ms,
            false,
        ),
        (
            "log_cleaner_min_compaction_lag_ms",
            &config.log_cleaner_min_compaction_lag_ms,
            false,
        ),
        ("log_flush_interval_messages", &config.log_flush_interval_messages, false),
        ("log_flush_interval_ms", &config.log_flush_interval_ms, false),
        (
            "log_message_timestamp_difference_max_ms",
            &config.log_message_timestamp_difference_max_ms,
            false,
        ),
        ("log_retention_bytes", &config.log_retention_bytes, true),
        ("log_retention_ms", &config.log_retention_ms, true),
        ("log_roll_jitter_ms", &config.log_roll_jitter_ms, false),
    ] {
        if let Some(raw) = value.as_deref() {
            if allow_negative && raw == "-1" {
                continue;
            }
            if raw.parse::<u128>().is_err() {
                return Err(Error::validation(format!(
                    "expected {} to be a decimal number, got {:?}",
                    field, raw
                )));
            }
        }
    }
    Ok(())
}

pub fn validate_opensearch_config(config: &OpensearchConfig) -> Result<()> {
    if let Some(age) = config.ism_history_max_age_hours {
        if age < 1 {
            return Err(Error::validation(
                "expected ism_history_max_age_hours to be at least 1, got 0",
            ));
        }
    }
    if let Some(bytes) = config.http_max_initial_line_length_bytes {
        if bytes < 1024 {
            return Err(Error::validation(format!(
                "expected http_max_initial_line_length_bytes to be at least 1024, got {}",
                bytes
            )));
        }
    }
    for (field, value) in [
        ("thread_pool_search_queue_size", config.thread_pool_search_queue_size),
        (
            "thread_pool_search_throttled_queue_size",
            config.thread_pool_search_throttled_queue_size,
        ),
        ("thread_pool_get_queue_size", config.thread_pool_get_queue_size),
        ("thread_pool_write_queue_size", config.thread_pool_write_queue_size),
    ] {
        if let Some(size) = value {
            if size < 10 {
                return Err(Error::validation(format!(
                    "expected {} to be at least 10, got {}",
                    field, size
                )));
            }
        }
    }
    for (field, value) in [
        (
            "indices_fielddata_cache_size_percentage",
            config.indices_fielddata_cache_size_percentage,
        ),
        (
            "indices_memory_index_buffer_size_percentage",
            config.indices_memory_index_buffer_size_percentage,
        ),
        (
            "indices_queries_cache_size_percentage",
            config.indices_queries_cache_size_percentage,
        ),
    ] {
        if let Some(pct) = value {
            if pct > 100 {
                return Err(range_error(field, 0, 100, pct as i64));
            }
        }
    }
    Ok(())
}

fn range_error(field: &str, low: i64, high: i64, got: i64) -> Error {
    Error::validation(format!(
        "expected {} to be in the range ({} - {}), got {}",
        field, low, high, got
    ))
}
