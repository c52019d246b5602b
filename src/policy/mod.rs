//! Plan-time validation and the per-engine capability table.
//!
//! Every check here runs before any remote call. A failed check is a
//! [`crate::reconciler::error::Error::Validation`] carrying the exact
//! message the host surfaces; nothing in this module touches the network.

pub mod cluster;
pub mod engine;
pub mod engine_config;
pub mod kafka;
pub mod logsink;
pub mod pool;
pub mod user;

pub use cluster::validate_cluster;
pub use engine::{version_is_current, Engine};
pub use engine_config::{
    validate_kafka_cluster_config, validate_mysql_config, validate_opensearch_config,
    validate_pg_config,
};
pub use kafka::{validate_schema_subject, validate_topic};
pub use logsink::validate_log_sink;
pub use pool::{parse_pool_mode, validate_pool};
pub use user::validate_user;
