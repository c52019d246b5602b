use std::sync::Arc;
use std::time::Duration;

use crate::client::ControlPlaneClient;
use crate::reconciler::guard::{KeyedGuard, KeyedMutex};

/// Tunable budgets for the polling loops. Hosts pass one in; the defaults
/// match the documented service behavior.
#[derive(Clone, Debug)]
pub struct ReconcilerConfig {
    /// Budget for a cluster to reach `online` after create and after each
    /// mutating operation that requires it.
    pub cluster_create_timeout: Duration,
    /// Interval between cluster status polls.
    pub status_poll_interval: Duration,
    /// Interval between replica status polls and 412-retry attempts.
    pub replica_poll_interval: Duration,
    /// Maximum replica status polls.
    pub replica_poll_budget: u32,
    /// Delay before the first online-migration start call.
    pub migration_stabilization_delay: Duration,
    /// Interval between online-migration status polls.
    pub migration_poll_interval: Duration,
    /// Total polling budget for the online-migration coordinator, counted
    /// after the stabilization delay.
    pub migration_poll_budget: Duration,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            cluster_create_timeout: Duration::from_secs(30 * 60),
            status_poll_interval: Duration::from_secs(15),
            replica_poll_interval: Duration::from_secs(15),
            replica_poll_budget: 120,
            migration_stabilization_delay: Duration::from_secs(30),
            migration_poll_interval: Duration::from_secs(10),
            migration_poll_budget: Duration::from_secs(90),
        }
    }
}

/// Shared context for all resource operations.
pub struct Context {
    pub client: Arc<dyn ControlPlaneClient>,
    pub config: ReconcilerConfig,
    user_locks: KeyedMutex,
}

impl Context {
    pub fn new(client: Arc<dyn ControlPlaneClient>) -> Self {
        Self::with_config(client, ReconcilerConfig::default())
    }

    pub fn with_config(client: Arc<dyn ControlPlaneClient>, config: ReconcilerConfig) -> Self {
        Self {
            client,
            config,
            user_locks: KeyedMutex::new(),
        }
    }

    /// Serialize user create/delete for one cluster. The key is
    /// hierarchical so unrelated clusters never contend.
    pub async fn lock_users(&self, cluster_id: &str) -> KeyedGuard {
        self.user_locks
            .lock(&format!("cluster/{}/users", cluster_id))
            .await
    }
}
