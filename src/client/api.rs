use async_trait::async_trait;

use super::types::{
    CaCertificate, ClusterCreateRequest, ClusterResizeRequest, ClusterState, DatabaseState,
    FirewallRule, FirewallRuleInput, LogSinkCreateRequest, LogSinkState, MetricsCredentials,
    MigrationState, OnlineMigrationRequest, PoolCreateRequest, PoolState, ReplicaCreateRequest,
    ReplicaState, SchemaSubjectCreateRequest, SchemaSubjectState, TopicCreateRequest, TopicState,
    TopicUpdateRequest, UserCreateRequest, UserState, UserUpdateRequest,
};
use super::ClientResult;
use crate::policy::engine::Engine;
use crate::spec::cluster::{EvictionPolicy, MaintenanceWindow};
use crate::spec::logsink::LogSinkConfig;

/// The typed control-plane surface the reconciler drives.
///
/// Implementations are expected to be idempotent at the operation level;
/// retries after transient failures are the caller's concern. Methods
/// mutate nothing locally, so the trait object is freely shared.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    // --- clusters ---

    async fn create_cluster(&self, req: &ClusterCreateRequest) -> ClientResult<ClusterState>;
    async fn get_cluster(&self, id: &str) -> ClientResult<ClusterState>;
    async fn list_clusters(&self) -> ClientResult<Vec<ClusterState>>;
    async fn delete_cluster(&self, id: &str) -> ClientResult<()>;
    async fn resize_cluster(&self, id: &str, req: &ClusterResizeRequest) -> ClientResult<()>;
    async fn migrate_cluster(&self, id: &str, region: &str) -> ClientResult<()>;
    async fn update_maintenance(&self, id: &str, window: &MaintenanceWindow) -> ClientResult<()>;
    async fn get_eviction_policy(&self, id: &str) -> ClientResult<EvictionPolicy>;
    async fn set_eviction_policy(&self, id: &str, policy: EvictionPolicy) -> ClientResult<()>;
    async fn get_sql_mode(&self, id: &str) -> ClientResult<String>;
    async fn set_sql_mode(&self, id: &str, sql_mode: &str) -> ClientResult<()>;
    async fn upgrade_major_version(&self, id: &str, version: &str) -> ClientResult<()>;
    async fn get_ca(&self, id: &str) -> ClientResult<CaCertificate>;

    // --- tags ---

    async fn tag_resource(&self, tag: &str, resource_urn: &str) -> ClientResult<()>;
    async fn untag_resource(&self, tag: &str, resource_urn: &str) -> ClientResult<()>;

    // --- users ---

    async fn create_user(&self, cluster_id: &str, req: &UserCreateRequest)
        -> ClientResult<UserState>;
    async fn get_user(&self, cluster_id: &str, name: &str) -> ClientResult<UserState>;
    async fn update_user(
        &self,
        cluster_id: &str,
        name: &str,
        req: &UserUpdateRequest,
    ) -> ClientResult<UserState>;
    async fn reset_user_auth(
        &self,
        cluster_id: &str,
        name: &str,
        auth_plugin: &str,
    ) -> ClientResult<UserState>;
    async fn delete_user(&self, cluster_id: &str, name: &str) -> ClientResult<()>;

    // --- logical databases ---

    async fn create_database(&self, cluster_id: &str, name: &str) -> ClientResult<DatabaseState>;
    async fn get_database(&self, cluster_id: &str, name: &str) -> ClientResult<DatabaseState>;
    async fn delete_database(&self, cluster_id: &str, name: &str) -> ClientResult<()>;

    // --- connection pools ---

    async fn create_pool(&self, cluster_id: &str, req: &PoolCreateRequest)
        -> ClientResult<PoolState>;
    async fn get_pool(&self, cluster_id: &str, name: &str) -> ClientResult<PoolState>;
    async fn delete_pool(&self, cluster_id: &str, name: &str) -> ClientResult<()>;

    // --- firewall ---

    async fn get_firewall_rules(&self, cluster_id: &str) -> ClientResult<Vec<FirewallRule>>;
    /// Replaces the whole rule set (PUT semantics).
    async fn replace_firewall_rules(
        &self,
        cluster_id: &str,
        rules: &[FirewallRuleInput],
    ) -> ClientResult<()>;

    // --- replicas ---

    async fn create_replica(
        &self,
        cluster_id: &str,
        req: &ReplicaCreateRequest,
    ) -> ClientResult<ReplicaState>;
    async fn get_replica(&self, cluster_id: &str, name: &str) -> ClientResult<ReplicaState>;
    async fn delete_replica(&self, cluster_id: &str, name: &str) -> ClientResult<()>;

    // --- log sinks ---

    async fn create_log_sink(
        &self,
        cluster_id: &str,
        req: &LogSinkCreateRequest,
    ) -> ClientResult<LogSinkState>;
    async fn get_log_sink(&self, cluster_id: &str, sink_id: &str) -> ClientResult<LogSinkState>;
    async fn update_log_sink(
        &self,
        cluster_id: &str,
        sink_id: &str,
        config: &LogSinkConfig,
    ) -> ClientResult<()>;
    async fn delete_log_sink(&self, cluster_id: &str, sink_id: &str) -> ClientResult<()>;

    // --- metrics ---

    async fn get_metrics_credentials(&self) -> ClientResult<MetricsCredentials>;

    // --- engine configuration ---

    /// Fetch the engine configuration as a JSON object keyed by tunable.
    async fn get_engine_config(
        &self,
        cluster_id: &str,
        engine: Engine,
    ) -> ClientResult<serde_json::Value>;
    /// Partial update: only the keys present in `config` change.
    async fn update_engine_config(
        &self,
        cluster_id: &str,
        engine: Engine,
        config: &serde_json::Value,
    ) -> ClientResult<()>;

    // --- kafka topics & schema registry ---

    async fn create_topic(&self, cluster_id: &str, req: &TopicCreateRequest)
        -> ClientResult<TopicState>;
    async fn get_topic(&self, cluster_id: &str, name: &str) -> ClientResult<TopicState>;
    async fn update_topic(
        &self,
        cluster_id: &str,
        name: &str,
        req: &TopicUpdateRequest,
    ) -> ClientResult<()>;
    async fn delete_topic(&self, cluster_id: &str, name: &str) -> ClientResult<()>;

    async fn create_schema_subject(
        &self,
        cluster_id: &str,
        req: &SchemaSubjectCreateRequest,
    ) -> ClientResult<SchemaSubjectState>;
    async fn get_schema_subject(
        &self,
        cluster_id: &str,
        subject: &str,
    ) -> ClientResult<SchemaSubjectState>;
    async fn delete_schema_subject(&self, cluster_id: &str, subject: &str) -> ClientResult<()>;

    // --- online migration ---

    async fn start_online_migration(
        &self,
        cluster_id: &str,
        req: &OnlineMigrationRequest,
    ) -> ClientResult<MigrationState>;
    /// `None` when no migration has been observed yet.
    async fn get_online_migration_status(
        &self,
        cluster_id: &str,
    ) -> ClientResult<Option<MigrationState>>;
    async fn stop_online_migration(
        &self,
        cluster_id: &str,
        migration_id: &str,
    ) -> ClientResult<()>;
}
