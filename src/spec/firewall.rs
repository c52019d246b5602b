use std::fmt;

use serde::{Deserialize, Serialize};

/// Desired state of a cluster's firewall: an unordered set of inbound
/// rules. The remote holds a single replaceable set per cluster, so every
/// update is a full PUT and delete PUTs an empty set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FirewallSpec {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    pub rules: Vec<FirewallRuleSpec>,
}

/// One declared inbound rule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FirewallRuleSpec {
    #[serde(rename = "type")]
    pub rule_type: FirewallRuleType,

    /// The permitted source: an address, a droplet ID, a cluster UUID, a
    /// tag name or an app ID depending on `rule_type`.
    pub value: String,
}

/// Source kinds a firewall rule can reference.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FirewallRuleType {
    IpAddr,
    Droplet,
    K8s,
    Tag,
    App,
}

impl FirewallRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirewallRuleType::IpAddr => "ip_addr",
            FirewallRuleType::Droplet => "droplet",
            FirewallRuleType::K8s => "k8s",
            FirewallRuleType::Tag => "tag",
            FirewallRuleType::App => "app",
        }
    }
}

impl fmt::Display for FirewallRuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted record of a firewall rule, including the fields the remote
/// fills in. `uuid` and `created_at` never participate in drift checks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FirewallRuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(rename = "type")]
    pub rule_type: FirewallRuleType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Persisted record of a firewall rule set. The remote has no per-ruleset
/// identity, so the local ID is synthetic: `<cluster>-<unique suffix>`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FirewallRecord {
    pub id: String,
    pub cluster_id: String,
    pub rules: Vec<FirewallRuleRecord>,
}
