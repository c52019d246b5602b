//! Per-engine cluster configuration resources.
//!
//! Each engine exposes one singleton configuration object per cluster.
//! Every tunable is optional-and-computed: a declaration sets the fields
//! it names and the remote fills in the rest on read. Serialization skips
//! unset fields, so serializing a config yields exactly the partial
//! update request the remote expects.
//!
//! Tunables that can exceed the signed 64-bit range travel as decimal
//! strings end to end.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::policy::engine::Engine;

/// Marker trait tying a config payload to its engine. `validate` runs the
/// plan-time range and enum checks for the payload; engines without extra
/// constraints inherit the empty default.
pub trait EngineConfig:
    Serialize + DeserializeOwned + Clone + PartialEq + std::fmt::Debug + Send + Sync
{
    const ENGINE: Engine;

    fn validate(&self) -> crate::reconciler::error::Result<()> {
        Ok(())
    }
}

/// Desired state of an engine configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfigSpec<C> {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    pub config: C,
}

/// Persisted record of an engine configuration. The local ID is the
/// sentinel `cluster/<engine>-config`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfigRecord<C> {
    pub id: String,
    pub cluster_id: String,
    pub config: C,
}

macro_rules! optional_fields {
    ($(#[$meta:meta])* pub struct $name:ident { $($(#[$fmeta:meta])* pub $field:ident : $ty:ty,)* }) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }
    };
}

optional_fields! {
    /// PostgreSQL cluster configuration.
    pub struct PgConfig {
        pub autovacuum_freeze_max_age: u64,
        pub autovacuum_max_workers: u32,
        pub autovacuum_naptime: u32,
        pub autovacuum_vacuum_threshold: u32,
        pub autovacuum_analyze_threshold: u32,
        pub autovacuum_vacuum_scale_factor: f64,
        pub autovacuum_analyze_scale_factor: f64,
        pub autovacuum_vacuum_cost_delay: i32,
        pub autovacuum_vacuum_cost_limit: i32,
        pub backup_hour: u8,
        pub backup_minute: u8,
        pub bgwriter_delay: u32,
        pub bgwriter_flush_after: u32,
        pub bgwriter_lru_maxpages: u32,
        pub bgwriter_lru_multiplier: f64,
        pub deadlock_timeout_ms: u32,
        pub default_toast_compression: ToastCompression,
        pub idle_in_transaction_session_timeout: u32,
        pub jit: bool,
        pub log_autovacuum_min_duration: i32,
        pub log_error_verbosity: LogErrorVerbosity,
        pub log_line_prefix: LogLinePrefix,
        pub log_min_duration_statement: i32,
        pub max_files_per_process: u32,
        pub max_locks_per_transaction: u32,
        pub max_parallel_workers: u32,
        pub max_parallel_workers_per_gather: u32,
        pub max_prepared_transactions: u32,
        pub max_wal_senders: u32,
        pub shared_buffers_percentage: f64,
        pub temp_file_limit: i64,
        pub timezone: String,
        pub track_activity_query_size: u32,
        pub track_commit_timestamp: TrackToggle,
        pub track_functions: TrackFunctions,
        pub track_io_timing: TrackToggle,
        pub wal_sender_timeout: u32,
        pub wal_writer_delay: u32,
        pub work_mem: u32,
    }
}

impl EngineConfig for PgConfig {
    const ENGINE: Engine = Engine::Pg;

    fn validate(&self) -> crate::reconciler::error::Result<()> {
        crate::policy::engine_config::validate_pg_config(self)
    }
}

/// TOAST compression algorithms.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastCompression {
    Lz4,
    Pglz,
}

/// `log_error_verbosity` settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogErrorVerbosity {
    Terse,
    Default,
    Verbose,
}

/// The closed set of accepted `log_line_prefix` templates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLinePrefix {
    #[serde(rename = "'pid=%p,user=%u,db=%d,app=%a,client=%h'")]
    PidUserDbAppClient,
    #[serde(rename = "'%t [%p]: [%l-1] user=%u,db=%d,app=%a,client=%h'")]
    TimePidLineUserDbAppClient,
    #[serde(rename = "'%m [%p] %q[user=%u,app=%a,db=%d]'")]
    MillisPidUserAppDb,
}

/// Tri-state `track_*` toggles, reported as `off`/`on`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackToggle {
    Off,
    On,
}

/// `track_functions` settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackFunctions {
    All,
    Pl,
    None,
}

optional_fields! {
    /// MySQL cluster configuration.
    pub struct MysqlConfig {
        pub backup_hour: u8,
        pub backup_minute: u8,
        pub binlog_retention_period: u32,
        pub connect_timeout: u32,
        pub default_time_zone: String,
        pub group_concat_max_len: String,
        pub information_schema_stats_expiry: u32,
        pub innodb_ft_min_token_size: u32,
        pub innodb_ft_server_stopword_table: String,
        pub innodb_lock_wait_timeout: u32,
        pub innodb_log_buffer_size: u64,
        pub innodb_online_alter_log_max_size: u64,
        pub innodb_print_all_deadlocks: bool,
        pub innodb_rollback_on_timeout: bool,
        pub interactive_timeout: u32,
        pub internal_tmp_mem_storage_engine: TmpMemStorageEngine,
        pub long_query_time: f64,
        pub max_allowed_packet: u64,
        pub max_heap_table_size: u64,
        pub net_read_timeout: u32,
        pub net_write_timeout: u32,
        pub slow_query_log: bool,
        pub sort_buffer_size: u64,
        pub sql_mode: String,
        pub sql_require_primary_key: bool,
        pub tmp_table_size: u64,
        pub wait_timeout: u32,
    }
}

impl EngineConfig for MysqlConfig {
    const ENGINE: Engine = Engine::Mysql;

    fn validate(&self) -> crate::reconciler::error::Result<()> {
        crate::policy::engine_config::validate_mysql_config(self)
    }
}

/// Engines backing MySQL internal in-memory temporary tables.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TmpMemStorageEngine {
    TempTable,
    Memory,
}

optional_fields! {
    /// MongoDB cluster configuration.
    pub struct MongoConfig {
        pub default_read_concern: ReadConcern,
        pub default_write_concern: String,
        pub slow_op_threshold_ms: u32,
        pub transaction_lifetime_limit_seconds: u32,
        pub verbosity: u8,
    }
}

impl EngineConfig for MongoConfig {
    const ENGINE: Engine = Engine::Mongodb;
}

/// MongoDB read concerns. The remote accepts any casing; the canonical
/// form is lowercase.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadConcern {
    Local,
    Available,
    Majority,
}

impl<'de> Deserialize<'de> for ReadConcern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.to_lowercase().as_str() {
            "local" => Ok(ReadConcern::Local),
            "available" => Ok(ReadConcern::Available),
            "majority" => Ok(ReadConcern::Majority),
            _ => Err(de::Error::unknown_variant(
                &raw,
                &["local", "available", "majority"],
            )),
        }
    }
}

optional_fields! {
    /// Redis cluster configuration.
    pub struct RedisConfig {
        pub maxmemory_policy: String,
        pub pubsub_client_output_buffer_limit: u32,
        pub number_of_databases: u32,
        pub io_threads: u32,
        pub lfu_log_factor: u32,
        pub lfu_decay_time: u32,
        pub ssl: bool,
        pub timeout: u32,
        pub notify_keyspace_events: String,
        pub persistence: Persistence,
        pub acl_channels_default: AclChannelsDefault,
    }
}

impl EngineConfig for RedisConfig {
    const ENGINE: Engine = Engine::Redis;
}

optional_fields! {
    /// Valkey cluster configuration.
    pub struct ValkeyConfig {
        pub maxmemory_policy: String,
        pub pubsub_client_output_buffer_limit: u32,
        pub number_of_databases: u32,
        pub io_threads: u32,
        pub lfu_log_factor: u32,
        pub lfu_decay_time: u32,
        pub ssl: bool,
        pub timeout: u32,
        pub notify_keyspace_events: String,
        pub persistence: Persistence,
        pub acl_channels_default: AclChannelsDefault,
        pub frequent_snapshots: bool,
    }
}

impl EngineConfig for ValkeyConfig {
    const ENGINE: Engine = Engine::Valkey;
}

/// Snapshot persistence modes for Redis/Valkey.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    Off,
    Rdb,
}

/// Default pub/sub channel permissions for new ACLs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AclChannelsDefault {
    Allchannels,
    Resetchannels,
}

optional_fields! {
    /// Kafka cluster configuration.
    pub struct KafkaConfig {
        pub auto_create_topics_enable: bool,
        pub group_initial_rebalance_delay_ms: u32,
        pub group_min_session_timeout_ms: u32,
        pub group_max_session_timeout_ms: u32,
        pub log_cleaner_delete_retention_ms: u64,
        pub log_cleaner_min_cleanable_ratio: f64,
        pub log_cleaner_max_compaction_lag_ms: String,
        pub log_cleaner_min_compaction_lag_ms: String,
        pub log_cleanup_policy: super::kafka::CleanupPolicy,
        pub log_flush_interval_messages: String,
        pub log_flush_interval_ms: String,
        pub log_index_interval_bytes: u32,
        pub log_message_downconversion_enable: bool,
        pub log_message_timestamp_difference_max_ms: String,
        pub log_message_timestamp_type: super::kafka::MessageTimestampType,
        pub log_preallocate: bool,
        pub log_retention_bytes: String,
        pub log_retention_hours: i32,
        pub log_retention_ms: String,
        pub log_roll_jitter_ms: String,
        pub log_segment_delete_delay_ms: u32,
        pub message_max_bytes: u64,
    }
}

impl EngineConfig for KafkaConfig {
    const ENGINE: Engine = Engine::Kafka;

    fn validate(&self) -> crate::reconciler::error::Result<()> {
        crate::policy::engine_config::validate_kafka_cluster_config(self)
    }
}

optional_fields! {
    /// OpenSearch cluster configuration.
    pub struct OpensearchConfig {
        pub action_auto_create_index_enabled: bool,
        pub action_destructive_requires_name: bool,
        pub cluster_max_shards_per_node: u32,
        pub enable_security_audit: bool,
        pub http_max_content_length_bytes: u32,
        pub http_max_header_size_bytes: u32,
        pub http_max_initial_line_length_bytes: u32,
        pub indices_fielddata_cache_size_percentage: u8,
        pub indices_memory_index_buffer_size_percentage: u8,
        pub indices_memory_min_index_buffer_size_mb: u32,
        pub indices_memory_max_index_buffer_size_mb: u32,
        pub indices_queries_cache_size_percentage: u8,
        pub indices_query_bool_max_clause_count: u32,
        pub indices_recovery_max_mb_per_sec: u32,
        pub indices_recovery_max_concurrent_file_chunks: u32,
        pub ism_enabled: bool,
        pub ism_history_enabled: bool,
        pub ism_history_max_age_hours: u32,
        pub ism_history_max_docs: i64,
        pub ism_history_rollover_check_period_hours: u32,
        pub ism_history_rollover_retention_period_days: u32,
        pub override_main_response_version: bool,
        pub reindex_remote_whitelist: Vec<String>,
        pub script_max_compilations_rate: String,
        pub search_max_buckets: u32,
        pub thread_pool_search_queue_size: u32,
        pub thread_pool_search_throttled_queue_size: u32,
        pub thread_pool_get_queue_size: u32,
        pub thread_pool_write_queue_size: u32,
    }
}

impl EngineConfig for OpensearchConfig {
    const ENGINE: Engine = Engine::Opensearch;

    fn validate(&self) -> crate::reconciler::error::Result<()> {
        crate::policy::engine_config::validate_opensearch_config(self)
    }
}
