//! In-memory control plane used by the integration tests.
//!
//! Implements the full client surface with just enough remote behavior to
//! exercise the reconcilers: clusters come online after a configurable
//! number of polls, replica creation can fail with 412 a few times, user
//! reads omit settings, passwords can be redacted, and online-migration
//! status follows a scripted sequence.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use dbaas_operator::client::{
    CaCertificate, ClientResult, ClusterConnection, ClusterCreateRequest, ClusterResizeRequest,
    ClusterState, ClusterStatus, ControlPlaneClient, ControlPlaneError, DatabaseState,
    FirewallRule, FirewallRuleInput, LogSinkCreateRequest, LogSinkState, MetricsCredentials,
    MigrationState, OnlineMigrationRequest, PoolCreateRequest, PoolState, ReplicaCreateRequest,
    ReplicaState, SchemaSubjectCreateRequest, SchemaSubjectState, TopicCreateRequest, TopicState,
    TopicUpdateRequest, UserCreateRequest, UserState, UserUpdateRequest,
};
use dbaas_operator::spec::cluster::{EvictionPolicy, MaintenanceWindow};
use dbaas_operator::spec::logsink::LogSinkConfig;
use dbaas_operator::spec::migration::MigrationStatus;
use dbaas_operator::Engine;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Remote {
    clusters: HashMap<String, ClusterState>,
    /// Remaining polls before a cluster reports `online`.
    pending_polls: HashMap<String, u32>,
    eviction_policies: HashMap<String, EvictionPolicy>,
    sql_modes: HashMap<String, String>,
    users: HashMap<(String, String), StoredUser>,
    databases: HashMap<(String, String), DatabaseState>,
    pools: HashMap<(String, String), PoolState>,
    firewalls: HashMap<String, Vec<FirewallRule>>,
    replicas: HashMap<(String, String), ReplicaState>,
    replica_pending_polls: HashMap<(String, String), u32>,
    sinks: HashMap<(String, String), LogSinkState>,
    topics: HashMap<(String, String), TopicState>,
    subjects: HashMap<(String, String), SchemaSubjectState>,
    configs: HashMap<(String, Engine), serde_json::Value>,
    migrations: HashMap<String, MigrationState>,
    /// Scripted status responses, drained one per status poll. `None`
    /// entries mean "no status yet".
    migration_script: VecDeque<Option<MigrationStatus>>,
    counter: u64,
    /// Remaining 412 responses for replica creation.
    replica_precondition_failures: u32,
    /// Redact connection passwords on reads (MongoDB-style).
    redact_passwords: bool,
}

struct StoredUser {
    state: UserState,
    #[allow(dead_code)]
    auth_plugin: Option<String>,
}

/// Shared fake; clone the `Arc` freely.
pub struct FakeControlPlane {
    remote: Mutex<Remote>,
    user_creates_in_flight: AtomicUsize,
    max_user_creates_in_flight: AtomicUsize,
}

impl FakeControlPlane {
    pub fn shared() -> Arc<Self> {
        init_logging();
        Arc::new(Self {
            remote: Mutex::new(Remote::default()),
            user_creates_in_flight: AtomicUsize::new(0),
            max_user_creates_in_flight: AtomicUsize::new(0),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Remote> {
        self.remote.lock().expect("fake remote poisoned")
    }

    /// How many polls a cluster stays in `creating` after create. A value
    /// seeded before the create call wins over the default.
    pub fn set_polls_until_online(&self, cluster_id: &str, polls: u32) {
        self.lock()
            .pending_polls
            .insert(cluster_id.to_string(), polls);
    }

    pub fn set_replica_precondition_failures(&self, failures: u32) {
        self.lock().replica_precondition_failures = failures;
    }

    pub fn set_redact_passwords(&self, redact: bool) {
        self.lock().redact_passwords = redact;
    }

    pub fn script_migration_statuses<I>(&self, statuses: I)
    where
        I: IntoIterator<Item = Option<MigrationStatus>>,
    {
        self.lock().migration_script = statuses.into_iter().collect();
    }

    pub fn max_user_creates_observed(&self) -> usize {
        self.max_user_creates_in_flight.load(Ordering::SeqCst)
    }

    /// Force a cluster's observed version, e.g. to mimic the service's
    /// forced Redis upgrades.
    pub fn set_cluster_version(&self, cluster_id: &str, version: &str) {
        if let Some(cluster) = self.lock().clusters.get_mut(cluster_id) {
            cluster.version = version.to_string();
        }
    }

    pub fn stored_engine_config(
        &self,
        cluster_id: &str,
        engine: Engine,
    ) -> Option<serde_json::Value> {
        self.lock()
            .configs
            .get(&(cluster_id.to_string(), engine))
            .cloned()
    }

    /// Seed an already-online cluster directly, for child-resource tests
    /// that do not care about the provisioning flow.
    pub fn seed_cluster(&self, name: &str, engine: Engine) -> String {
        let mut remote = self.lock();
        remote.counter += 1;
        let id = uuid::Uuid::new_v4().to_string();
        let password = format!("pw-{}", remote.counter);
        let state = ClusterState {
            id: id.clone(),
            name: name.to_string(),
            engine,
            version: "15".to_string(),
            status: ClusterStatus::Online,
            size: "db-s-1vcpu-2gb".to_string(),
            region: "nyc1".to_string(),
            node_count: 1,
            tags: Default::default(),
            private_network_uuid: None,
            project_id: None,
            storage_size_mib: None,
            maintenance_window: None,
            connection: Some(connection_for(name, &password, false)),
            private_connection: Some(connection_for(name, &password, true)),
            created_at: Some(Utc::now()),
        };
        remote.clusters.insert(id.clone(), state);
        id
    }

    fn missing(what: &str) -> ControlPlaneError {
        ControlPlaneError::not_found(what)
    }
}

fn connection_for(name: &str, password: &str, private: bool) -> ClusterConnection {
    let host = if private {
        format!("private-{}.db.example.com", name)
    } else {
        format!("{}.db.example.com", name)
    };
    ClusterConnection {
        uri: format!(
            "postgresql://doadmin@{}:25060/defaultdb?sslmode=require",
            host
        ),
        database: "defaultdb".to_string(),
        host,
        port: 25060,
        user: "doadmin".to_string(),
        password: password.to_string(),
        ssl: true,
    }
}

fn redacted(mut state: ClusterState) -> ClusterState {
    if let Some(conn) = state.connection.as_mut() {
        conn.password.clear();
    }
    if let Some(conn) = state.private_connection.as_mut() {
        conn.password.clear();
    }
    state
}

#[async_trait]
impl ControlPlaneClient for FakeControlPlane {
    async fn create_cluster(&self, req: &ClusterCreateRequest) -> ClientResult<ClusterState> {
        let mut remote = self.lock();
        remote.counter += 1;
        let id = format!("cluster-{}", remote.counter);
        let password = format!("pw-{}", remote.counter);
        let state = ClusterState {
            id: id.clone(),
            name: req.name.clone(),
            engine: req.engine,
            version: req.version.clone(),
            status: ClusterStatus::Creating,
            size: req.size.clone(),
            region: req.region.clone(),
            node_count: req.node_count,
            tags: req.tags.clone(),
            private_network_uuid: req.private_network_uuid.clone(),
            project_id: req.project_id.clone(),
            storage_size_mib: req.storage_size_mib.clone(),
            maintenance_window: None,
            connection: Some(connection_for(&req.name, &password, false)),
            private_connection: Some(connection_for(&req.name, &password, true)),
            created_at: Some(Utc::now()),
        };
        remote.pending_polls.entry(id.clone()).or_insert(1);
        remote.clusters.insert(id.clone(), state.clone());
        Ok(state)
    }

    async fn get_cluster(&self, id: &str) -> ClientResult<ClusterState> {
        let mut remote = self.lock();
        let pending = remote.pending_polls.get_mut(id).map(|p| {
            let before = *p;
            *p = p.saturating_sub(1);
            before
        });
        let redact = remote.redact_passwords;
        let cluster = remote
            .clusters
            .get_mut(id)
            .ok_or_else(|| Self::missing("database cluster"))?;
        if pending == Some(0) || pending.is_none() {
            cluster.status = ClusterStatus::Online;
        }
        let state = cluster.clone();
        Ok(if redact { redacted(state) } else { state })
    }

    async fn list_clusters(&self) -> ClientResult<Vec<ClusterState>> {
        Ok(self.lock().clusters.values().cloned().collect())
    }

    async fn delete_cluster(&self, id: &str) -> ClientResult<()> {
        let mut remote = self.lock();
        remote
            .clusters
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("database cluster"))
    }

    async fn resize_cluster(&self, id: &str, req: &ClusterResizeRequest) -> ClientResult<()> {
        let mut remote = self.lock();
        let cluster = remote
            .clusters
            .get_mut(id)
            .ok_or_else(|| Self::missing("database cluster"))?;
        cluster.size = req.size.clone();
        cluster.node_count = req.node_count;
        if let Some(storage) = &req.storage_size_mib {
            cluster.storage_size_mib = Some(storage.clone());
        }
        cluster.status = ClusterStatus::Resizing;
        remote.pending_polls.insert(id.to_string(), 1);
        Ok(())
    }

    async fn migrate_cluster(&self, id: &str, region: &str) -> ClientResult<()> {
        let mut remote = self.lock();
        let cluster = remote
            .clusters
            .get_mut(id)
            .ok_or_else(|| Self::missing("database cluster"))?;
        cluster.region = region.to_string();
        cluster.status = ClusterStatus::Migrating;
        remote.pending_polls.insert(id.to_string(), 1);
        Ok(())
    }

    async fn update_maintenance(&self, id: &str, window: &MaintenanceWindow) -> ClientResult<()> {
        let mut remote = self.lock();
        let cluster = remote
            .clusters
            .get_mut(id)
            .ok_or_else(|| Self::missing("database cluster"))?;
        // The remote reports seconds on the hour.
        cluster.maintenance_window = Some(MaintenanceWindow {
            day: window.day.to_lowercase(),
            hour: format!("{}:00", window.normalized_hour()),
        });
        Ok(())
    }

    async fn get_eviction_policy(&self, id: &str) -> ClientResult<EvictionPolicy> {
        self.lock()
            .eviction_policies
            .get(id)
            .copied()
            .ok_or_else(|| Self::missing("eviction policy"))
    }

    async fn set_eviction_policy(&self, id: &str, policy: EvictionPolicy) -> ClientResult<()> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(id) {
            return Err(Self::missing("database cluster"));
        }
        remote.eviction_policies.insert(id.to_string(), policy);
        Ok(())
    }

    async fn get_sql_mode(&self, id: &str) -> ClientResult<String> {
        self.lock()
            .sql_modes
            .get(id)
            .cloned()
            .ok_or_else(|| Self::missing("SQL mode"))
    }

    async fn set_sql_mode(&self, id: &str, sql_mode: &str) -> ClientResult<()> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(id) {
            return Err(Self::missing("database cluster"));
        }
        remote.sql_modes.insert(id.to_string(), sql_mode.to_string());
        Ok(())
    }

    async fn upgrade_major_version(&self, id: &str, version: &str) -> ClientResult<()> {
        let mut remote = self.lock();
        let cluster = remote
            .clusters
            .get_mut(id)
            .ok_or_else(|| Self::missing("database cluster"))?;
        cluster.version = version.to_string();
        Ok(())
    }

    async fn get_ca(&self, id: &str) -> ClientResult<CaCertificate> {
        if !self.lock().clusters.contains_key(id) {
            return Err(Self::missing("database cluster"));
        }
        Ok(CaCertificate {
            certificate: "-----BEGIN CERTIFICATE-----\nfake\n-----END CERTIFICATE-----\n"
                .to_string(),
        })
    }

    async fn tag_resource(&self, tag: &str, resource_urn: &str) -> ClientResult<()> {
        let mut remote = self.lock();
        let cluster = remote
            .clusters
            .values_mut()
            .find(|c| resource_urn.ends_with(&c.id))
            .ok_or_else(|| Self::missing("tagged resource"))?;
        cluster.tags.insert(tag.to_string());
        Ok(())
    }

    async fn untag_resource(&self, tag: &str, resource_urn: &str) -> ClientResult<()> {
        let mut remote = self.lock();
        let cluster = remote
            .clusters
            .values_mut()
            .find(|c| resource_urn.ends_with(&c.id))
            .ok_or_else(|| Self::missing("tagged resource"))?;
        cluster.tags.remove(tag);
        Ok(())
    }

    async fn create_user(
        &self,
        cluster_id: &str,
        req: &UserCreateRequest,
    ) -> ClientResult<UserState> {
        let in_flight = self.user_creates_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_user_creates_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);
        // Hold the slot across an await so unsynchronized callers overlap.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let result = {
            let mut remote = self.lock();
            if !remote.clusters.contains_key(cluster_id) {
                Err(Self::missing("database cluster"))
            } else {
                remote.counter += 1;
                let state = UserState {
                    name: req.name.clone(),
                    role: Some("normal".to_string()),
                    password: Some(format!("userpw-{}", remote.counter)),
                    mysql_auth_plugin: req.mysql_auth_plugin,
                    settings: req.settings.clone(),
                    access_cert: None,
                    access_key: None,
                };
                remote.users.insert(
                    (cluster_id.to_string(), req.name.clone()),
                    StoredUser {
                        state: state.clone(),
                        auth_plugin: req.mysql_auth_plugin.map(|p| p.as_str().to_string()),
                    },
                );
                Ok(state)
            }
        };

        self.user_creates_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn get_user(&self, cluster_id: &str, name: &str) -> ClientResult<UserState> {
        let remote = self.lock();
        let stored = remote
            .users
            .get(&(cluster_id.to_string(), name.to_string()))
            .ok_or_else(|| Self::missing("database user"))?;
        // Plain reads omit settings, like the real service.
        let mut state = stored.state.clone();
        state.settings = None;
        Ok(state)
    }

    async fn update_user(
        &self,
        cluster_id: &str,
        name: &str,
        req: &UserUpdateRequest,
    ) -> ClientResult<UserState> {
        let mut remote = self.lock();
        let stored = remote
            .users
            .get_mut(&(cluster_id.to_string(), name.to_string()))
            .ok_or_else(|| Self::missing("database user"))?;
        stored.state.settings = Some(req.settings.clone());
        Ok(stored.state.clone())
    }

    async fn reset_user_auth(
        &self,
        cluster_id: &str,
        name: &str,
        auth_plugin: &str,
    ) -> ClientResult<UserState> {
        let mut remote = self.lock();
        let stored = remote
            .users
            .get_mut(&(cluster_id.to_string(), name.to_string()))
            .ok_or_else(|| Self::missing("database user"))?;
        stored.auth_plugin = Some(auth_plugin.to_string());
        Ok(stored.state.clone())
    }

    async fn delete_user(&self, cluster_id: &str, name: &str) -> ClientResult<()> {
        self.lock()
            .users
            .remove(&(cluster_id.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("database user"))
    }

    async fn create_database(&self, cluster_id: &str, name: &str) -> ClientResult<DatabaseState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        let state = DatabaseState {
            name: name.to_string(),
        };
        remote
            .databases
            .insert((cluster_id.to_string(), name.to_string()), state.clone());
        Ok(state)
    }

    async fn get_database(&self, cluster_id: &str, name: &str) -> ClientResult<DatabaseState> {
        self.lock()
            .databases
            .get(&(cluster_id.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Self::missing("logical database"))
    }

    async fn delete_database(&self, cluster_id: &str, name: &str) -> ClientResult<()> {
        self.lock()
            .databases
            .remove(&(cluster_id.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("logical database"))
    }

    async fn create_pool(
        &self,
        cluster_id: &str,
        req: &PoolCreateRequest,
    ) -> ClientResult<PoolState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        let state = PoolState {
            name: req.name.clone(),
            mode: req.mode,
            size: req.size,
            db_name: req.db_name.clone(),
            user: req.user.clone(),
        };
        remote
            .pools
            .insert((cluster_id.to_string(), req.name.clone()), state.clone());
        Ok(state)
    }

    async fn get_pool(&self, cluster_id: &str, name: &str) -> ClientResult<PoolState> {
        self.lock()
            .pools
            .get(&(cluster_id.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Self::missing("connection pool"))
    }

    async fn delete_pool(&self, cluster_id: &str, name: &str) -> ClientResult<()> {
        self.lock()
            .pools
            .remove(&(cluster_id.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("connection pool"))
    }

    async fn get_firewall_rules(&self, cluster_id: &str) -> ClientResult<Vec<FirewallRule>> {
        let remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        Ok(remote.firewalls.get(cluster_id).cloned().unwrap_or_default())
    }

    async fn replace_firewall_rules(
        &self,
        cluster_id: &str,
        rules: &[FirewallRuleInput],
    ) -> ClientResult<()> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        remote.counter += 1;
        let base = remote.counter;
        let stored: Vec<FirewallRule> = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| FirewallRule {
                uuid: format!("fw-{}-{}", base, i),
                cluster_id: cluster_id.to_string(),
                rule_type: rule.rule_type,
                value: rule.value.clone(),
                created_at: Utc::now(),
            })
            .collect();
        remote.firewalls.insert(cluster_id.to_string(), stored);
        Ok(())
    }

    async fn create_replica(
        &self,
        cluster_id: &str,
        req: &ReplicaCreateRequest,
    ) -> ClientResult<ReplicaState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        if remote.replica_precondition_failures > 0 {
            remote.replica_precondition_failures -= 1;
            return Err(ControlPlaneError::precondition_failed(
                "source cluster has no completed backup yet",
            ));
        }
        remote.counter += 1;
        let password = format!("replpw-{}", remote.counter);
        let state = ReplicaState {
            id: format!("replica-{}", remote.counter),
            name: req.name.clone(),
            region: req.region.clone().unwrap_or_else(|| "nyc1".to_string()),
            status: ClusterStatus::Creating,
            tags: req.tags.clone(),
            private_network_uuid: req.private_network_uuid.clone(),
            connection: Some(connection_for(&req.name, &password, false)),
            private_connection: Some(connection_for(&req.name, &password, true)),
            created_at: Some(Utc::now()),
        };
        remote
            .replica_pending_polls
            .insert((cluster_id.to_string(), req.name.clone()), 1);
        remote
            .replicas
            .insert((cluster_id.to_string(), req.name.clone()), state.clone());
        Ok(state)
    }

    async fn get_replica(&self, cluster_id: &str, name: &str) -> ClientResult<ReplicaState> {
        let mut remote = self.lock();
        let key = (cluster_id.to_string(), name.to_string());
        let pending = remote.replica_pending_polls.get_mut(&key).map(|p| {
            let before = *p;
            *p = p.saturating_sub(1);
            before
        });
        let replica = remote
            .replicas
            .get_mut(&key)
            .ok_or_else(|| Self::missing("database replica"))?;
        if pending == Some(0) || pending.is_none() {
            replica.status = ClusterStatus::Online;
        }
        Ok(replica.clone())
    }

    async fn delete_replica(&self, cluster_id: &str, name: &str) -> ClientResult<()> {
        self.lock()
            .replicas
            .remove(&(cluster_id.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("database replica"))
    }

    async fn create_log_sink(
        &self,
        cluster_id: &str,
        req: &LogSinkCreateRequest,
    ) -> ClientResult<LogSinkState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        remote.counter += 1;
        let state = LogSinkState {
            sink_id: format!("sink-{}", remote.counter),
            sink_name: req.sink_name.clone(),
            config: req.config.clone(),
        };
        remote
            .sinks
            .insert((cluster_id.to_string(), state.sink_id.clone()), state.clone());
        Ok(state)
    }

    async fn get_log_sink(&self, cluster_id: &str, sink_id: &str) -> ClientResult<LogSinkState> {
        self.lock()
            .sinks
            .get(&(cluster_id.to_string(), sink_id.to_string()))
            .cloned()
            .ok_or_else(|| Self::missing("log sink"))
    }

    async fn update_log_sink(
        &self,
        cluster_id: &str,
        sink_id: &str,
        config: &LogSinkConfig,
    ) -> ClientResult<()> {
        let mut remote = self.lock();
        let sink = remote
            .sinks
            .get_mut(&(cluster_id.to_string(), sink_id.to_string()))
            .ok_or_else(|| Self::missing("log sink"))?;
        sink.config = config.clone();
        Ok(())
    }

    async fn delete_log_sink(&self, cluster_id: &str, sink_id: &str) -> ClientResult<()> {
        self.lock()
            .sinks
            .remove(&(cluster_id.to_string(), sink_id.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("log sink"))
    }

    async fn get_metrics_credentials(&self) -> ClientResult<MetricsCredentials> {
        Ok(MetricsCredentials {
            basic_auth_username: "metrics".to_string(),
            basic_auth_password: "metrics-pw".to_string(),
        })
    }

    async fn get_engine_config(
        &self,
        cluster_id: &str,
        engine: Engine,
    ) -> ClientResult<serde_json::Value> {
        let remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        Ok(remote
            .configs
            .get(&(cluster_id.to_string(), engine))
            .cloned()
            .unwrap_or_else(|| serde_json::json!({})))
    }

    async fn update_engine_config(
        &self,
        cluster_id: &str,
        engine: Engine,
        config: &serde_json::Value,
    ) -> ClientResult<()> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        let entry = remote
            .configs
            .entry((cluster_id.to_string(), engine))
            .or_insert_with(|| serde_json::json!({}));
        if let (Some(target), Some(source)) = (entry.as_object_mut(), config.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn create_topic(
        &self,
        cluster_id: &str,
        req: &TopicCreateRequest,
    ) -> ClientResult<TopicState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        let state = TopicState {
            name: req.name.clone(),
            state: "active".to_string(),
            partition_count: req.partition_count,
            replication_factor: req.replication_factor,
            config: req.config.clone(),
        };
        remote
            .topics
            .insert((cluster_id.to_string(), req.name.clone()), state.clone());
        Ok(state)
    }

    async fn get_topic(&self, cluster_id: &str, name: &str) -> ClientResult<TopicState> {
        self.lock()
            .topics
            .get(&(cluster_id.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Self::missing("Kafka topic"))
    }

    async fn update_topic(
        &self,
        cluster_id: &str,
        name: &str,
        req: &TopicUpdateRequest,
    ) -> ClientResult<()> {
        let mut remote = self.lock();
        let topic = remote
            .topics
            .get_mut(&(cluster_id.to_string(), name.to_string()))
            .ok_or_else(|| Self::missing("Kafka topic"))?;
        // Partition counts only grow on the real service.
        topic.partition_count = topic.partition_count.max(req.partition_count);
        topic.replication_factor = req.replication_factor;
        topic.config = req.config.clone();
        Ok(())
    }

    async fn delete_topic(&self, cluster_id: &str, name: &str) -> ClientResult<()> {
        self.lock()
            .topics
            .remove(&(cluster_id.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("Kafka topic"))
    }

    async fn create_schema_subject(
        &self,
        cluster_id: &str,
        req: &SchemaSubjectCreateRequest,
    ) -> ClientResult<SchemaSubjectState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        let state = SchemaSubjectState {
            subject_name: req.subject_name.clone(),
            schema_type: req.schema_type,
            schema: req.schema.clone(),
        };
        remote
            .subjects
            .insert((cluster_id.to_string(), req.subject_name.clone()), state.clone());
        Ok(state)
    }

    async fn get_schema_subject(
        &self,
        cluster_id: &str,
        subject: &str,
    ) -> ClientResult<SchemaSubjectState> {
        self.lock()
            .subjects
            .get(&(cluster_id.to_string(), subject.to_string()))
            .cloned()
            .ok_or_else(|| Self::missing("schema subject"))
    }

    async fn delete_schema_subject(&self, cluster_id: &str, subject: &str) -> ClientResult<()> {
        self.lock()
            .subjects
            .remove(&(cluster_id.to_string(), subject.to_string()))
            .map(|_| ())
            .ok_or_else(|| Self::missing("schema subject"))
    }

    async fn start_online_migration(
        &self,
        cluster_id: &str,
        _req: &OnlineMigrationRequest,
    ) -> ClientResult<MigrationState> {
        let mut remote = self.lock();
        if !remote.clusters.contains_key(cluster_id) {
            return Err(Self::missing("database cluster"));
        }
        remote.counter += 1;
        let state = MigrationState {
            id: format!("migration-{}", remote.counter),
            status: MigrationStatus::Running,
            created_at: Some(Utc::now()),
        };
        remote.migrations.insert(cluster_id.to_string(), state.clone());
        Ok(state)
    }

    async fn get_online_migration_status(
        &self,
        cluster_id: &str,
    ) -> ClientResult<Option<MigrationState>> {
        let mut remote = self.lock();
        if let Some(scripted) = remote.migration_script.pop_front() {
            let current = remote.migrations.get(cluster_id).cloned();
            return Ok(match (scripted, current) {
                (Some(status), Some(mut state)) => {
                    state.status = status;
                    Some(state)
                }
                (Some(status), None) => Some(MigrationState {
                    id: "migration-unknown".to_string(),
                    status,
                    created_at: None,
                }),
                (None, _) => None,
            });
        }
        Ok(remote.migrations.get(cluster_id).cloned().map(|mut state| {
            state.status = MigrationStatus::Syncing;
            state
        }))
    }

    async fn stop_online_migration(
        &self,
        cluster_id: &str,
        _migration_id: &str,
    ) -> ClientResult<()> {
        self.lock()
            .migrations
            .remove(cluster_id)
            .map(|_| ())
            .ok_or_else(|| Self::missing("online migration"))
    }
}
