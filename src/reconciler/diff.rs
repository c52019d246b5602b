//! Desired-vs-observed diff engine for clusters.
//!
//! Produces the minimal ordered list of remote calls that realize a
//! desired cluster spec against a prior record. Order is fixed: resize,
//! migrate, maintenance, eviction, SQL mode, version upgrade, tag sync.
//! Each action knows whether the cluster must be back `online` before the
//! next one may proceed.

use crate::policy::engine::version_is_current;
use crate::spec::cluster::{ClusterRecord, ClusterSpec, EvictionPolicy, MaintenanceWindow};

/// One remote call in an update plan.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterAction {
    Resize {
        size: String,
        node_count: u32,
        /// Only carried when the declared storage changed, so a grown size
        /// slug can apply its own default storage.
        storage_size_mib: Option<String>,
    },
    Migrate {
        region: String,
    },
    UpdateMaintenance(MaintenanceWindow),
    SetEvictionPolicy(EvictionPolicy),
    SetSqlMode(String),
    UpgradeVersion(String),
    SyncTags {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

impl ClusterAction {
    /// Whether the reconciler must wait for the cluster to come back
    /// `online` before issuing the next action.
    pub fn waits_for_online(&self) -> bool {
        matches!(self, ClusterAction::Resize { .. } | ClusterAction::Migrate { .. })
    }
}

/// An ordered update plan. Empty means the remote already matches the
/// declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterDiff {
    pub actions: Vec<ClusterAction>,
}

impl ClusterDiff {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Compute the plan for `desired` against `prior`. Assumes `desired`
    /// already passed validation and that no immutable field changed (see
    /// [`requires_replace`]).
    pub fn between(prior: &ClusterRecord, desired: &ClusterSpec) -> ClusterDiff {
        let mut actions = Vec::new();

        let storage_changed = desired
            .storage_size_mib
            .as_ref()
            .is_some_and(|s| prior.storage_size_mib.as_ref() != Some(s));
        if desired.size != prior.size || desired.node_count != prior.node_count || storage_changed {
            actions.push(ClusterAction::Resize {
                size: desired.size.clone(),
                node_count: desired.node_count,
                storage_size_mib: storage_changed.then(|| {
                    desired
                        .storage_size_mib
                        .clone()
                        .unwrap_or_default()
                }),
            });
        }

        let region = desired.canonical_region();
        if region != prior.region {
            actions.push(ClusterAction::Migrate { region });
        }

        if let Some(window) = &desired.maintenance_window {
            let unchanged = prior
                .maintenance_window
                .as_ref()
                .is_some_and(|prior_window| prior_window.plan_equal(window));
            if !unchanged {
                actions.push(ClusterAction::UpdateMaintenance(window.clone()));
            }
        }

        match (prior.eviction_policy, desired.eviction_policy) {
            (_, Some(policy)) if prior.eviction_policy != Some(policy) => {
                actions.push(ClusterAction::SetEvictionPolicy(policy));
            }
            // Removing the declaration resets the remote to `noeviction`.
            (Some(prior_policy), None) if prior_policy != EvictionPolicy::Noeviction => {
                actions.push(ClusterAction::SetEvictionPolicy(EvictionPolicy::Noeviction));
            }
            _ => {}
        }

        if let Some(sql_mode) = &desired.sql_mode {
            if prior.sql_mode.as_ref() != Some(sql_mode) {
                actions.push(ClusterAction::SetSqlMode(sql_mode.clone()));
            }
        }

        if let Some(version) = desired.version.as_deref() {
            if !version_is_current(desired.engine, version, &prior.version) {
                actions.push(ClusterAction::UpgradeVersion(version.to_string()));
            }
        }

        let add: Vec<String> = desired
            .tags
            .difference(&prior.tags)
            .cloned()
            .collect();
        let remove: Vec<String> = prior
            .tags
            .difference(&desired.tags)
            .cloned()
            .collect();
        if !add.is_empty() || !remove.is_empty() {
            actions.push(ClusterAction::SyncTags { add, remove });
        }

        ClusterDiff { actions }
    }
}

/// Whether a declared change can only be realized by destroying and
/// recreating the cluster. Immutable after create: name, engine, VPC and
/// project association. `backup_restore` is one-shot and never diffed.
pub fn requires_replace(prior: &ClusterRecord, desired: &ClusterSpec) -> bool {
    if desired.name != prior.name || desired.engine != prior.engine {
        return true;
    }
    if desired.private_network_uuid.is_some()
        && desired.private_network_uuid != prior.private_network_uuid
    {
        return true;
    }
    if desired.project_id.is_some() && desired.project_id != prior.project_id {
        return true;
    }
    false
}
