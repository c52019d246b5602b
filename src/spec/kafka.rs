use serde::{Deserialize, Serialize};

/// Desired state of a Kafka topic.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KafkaTopicSpec {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    /// Topic name (immutable).
    pub name: String,

    /// Partition count within [3, 2048]. The remote only grows it.
    #[serde(default = "default_partition_count")]
    pub partition_count: u32,

    /// Replication factor, at least 2.
    #[serde(default = "default_replication_factor")]
    pub replication_factor: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<KafkaTopicConfig>,
}

fn default_partition_count() -> u32 {
    3
}

fn default_replication_factor() -> u32 {
    2
}

/// Topic tunables. Every field is optional; unset fields are omitted from
/// update requests so the remote keeps its own defaults. Durations and
/// sizes that may exceed the signed 64-bit range travel as decimal
/// strings.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct KafkaTopicConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_policy: Option<CleanupPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<CompressionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_retention_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_delete_delay_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flush_messages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flush_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_interval_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_compaction_lag_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_message_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_down_conversion_enable: Option<bool>,
    /// One of the closed [`MESSAGE_FORMAT_VERSIONS`] list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_format_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_timestamp_difference_max_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_timestamp_type: Option<MessageTimestampType>,
    /// Float within [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cleanable_dirty_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_compaction_lag_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_insync_replicas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preallocate: Option<bool>,
    /// `-1` disables the bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_bytes: Option<String>,
    /// `-1` disables the bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_index_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_jitter_ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_ms: Option<String>,
}

/// Accepted values for `message_format_version`.
pub const MESSAGE_FORMAT_VERSIONS: &[&str] = &[
    "0.8.0", "0.8.1", "0.8.2", "0.9.0", "0.10.0", "0.10.0-IV0", "0.10.0-IV1", "0.10.1",
    "0.10.1-IV0", "0.10.1-IV1", "0.10.1-IV2", "0.10.2", "0.10.2-IV0", "0.11.0", "0.11.0-IV0",
    "0.11.0-IV1", "0.11.0-IV2", "1.0", "1.0-IV0", "1.1", "1.1-IV0", "2.0", "2.0-IV0", "2.0-IV1",
    "2.1", "2.1-IV0", "2.1-IV1", "2.1-IV2", "2.2", "2.2-IV0", "2.2-IV1", "2.3", "2.3-IV0",
    "2.3-IV1", "2.4", "2.4-IV0", "2.4-IV1", "2.5", "2.5-IV0", "2.6", "2.6-IV0", "2.7", "2.7-IV0",
    "2.7-IV1", "2.7-IV2", "2.8", "2.8-IV0", "2.8-IV1", "3.0", "3.0-IV0", "3.0-IV1",
];

/// Log cleanup policies.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    Delete,
    Compact,
    CompactDelete,
}

/// Producer compression codecs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompressionType {
    Producer,
    Gzip,
    Snappy,
    Lz4,
    Zstd,
    Uncompressed,
}

/// Which timestamp a message record carries.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageTimestampType {
    CreateTime,
    LogAppendTime,
}

/// Persisted record of a Kafka topic.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KafkaTopicRecord {
    /// Composite local ID `cluster/topic/<name>`.
    pub id: String,

    pub cluster_id: String,
    pub name: String,
    pub partition_count: u32,
    pub replication_factor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<KafkaTopicConfig>,

    /// Remote topic state, e.g. `active`.
    pub state: String,
}

/// Desired state of a schema-registry subject. Immutable after create:
/// any change is a replace.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SchemaSubjectSpec {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    pub subject_name: String,
    pub schema_type: SchemaType,
    /// Opaque schema body.
    pub schema: String,
}

/// Schema encodings the registry accepts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Avro,
    Json,
    Protobuf,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Avro => "AVRO",
            SchemaType::Json => "JSON",
            SchemaType::Protobuf => "PROTOBUF",
        }
    }
}

/// Persisted record of a schema-registry subject.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SchemaSubjectRecord {
    /// Composite local ID `cluster/schema-registry/<subject>`.
    pub id: String,

    pub cluster_id: String,
    pub subject_name: String,
    pub schema_type: SchemaType,
    pub schema: String,
}
