use serde::{Deserialize, Serialize};

/// Desired state of a database user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserSpec {
    /// Owning cluster UUID (immutable; a change is a replace).
    pub cluster_id: String,

    /// User name (immutable).
    pub name: String,

    /// MySQL authentication plugin. Unset maps to the default
    /// `caching_sha2_password` when resetting auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql_auth_plugin: Option<MysqlAuthPlugin>,

    /// Engine-specific access settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
}

/// MySQL authentication plugins accepted by the remote.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MysqlAuthPlugin {
    MysqlNativePassword,
    CachingSha2Password,
}

impl MysqlAuthPlugin {
    pub fn as_str(&self) -> &'static str {
        match self {
            MysqlAuthPlugin::MysqlNativePassword => "mysql_native_password",
            MysqlAuthPlugin::CachingSha2Password => "caching_sha2_password",
        }
    }
}

impl Default for MysqlAuthPlugin {
    fn default() -> Self {
        MysqlAuthPlugin::CachingSha2Password
    }
}

/// Access settings attached to a user. At most one of the two ACL lists is
/// meaningful, depending on the cluster engine.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserSettings {
    /// Kafka topic ACLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<KafkaAcl>,

    /// OpenSearch index ACLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opensearch_acl: Vec<OpensearchAcl>,
}

impl UserSettings {
    pub fn is_empty(&self) -> bool {
        self.acl.is_empty() && self.opensearch_acl.is_empty()
    }

    /// Canonical form used for plan comparison: permissions normalized,
    /// remote-assigned ACL ids ignored.
    pub fn normalized(&self) -> UserSettings {
        UserSettings {
            acl: self
                .acl
                .iter()
                .map(|acl| KafkaAcl {
                    id: None,
                    topic: acl.topic.clone(),
                    permission: acl.permission,
                })
                .collect(),
            opensearch_acl: self.opensearch_acl.clone(),
        }
    }
}

/// Per-topic Kafka ACL.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KafkaAcl {
    /// Remote-assigned ACL id; absent on declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub topic: String,
    pub permission: KafkaAclPermission,
}

/// Kafka topic permission. Parsed case-insensitively; the canonical wire
/// form is lowercase with no separator (`produceconsume`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KafkaAclPermission {
    Admin,
    Consume,
    Produce,
    Produceconsume,
}

impl KafkaAclPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            KafkaAclPermission::Admin => "admin",
            KafkaAclPermission::Consume => "consume",
            KafkaAclPermission::Produce => "produce",
            KafkaAclPermission::Produceconsume => "produceconsume",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "admin" => Some(KafkaAclPermission::Admin),
            "consume" => Some(KafkaAclPermission::Consume),
            "produce" => Some(KafkaAclPermission::Produce),
            "produceconsume" => Some(KafkaAclPermission::Produceconsume),
            _ => None,
        }
    }
}

/// Per-index OpenSearch ACL.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OpensearchAcl {
    pub index: String,
    pub permission: OpensearchAclPermission,
}

/// OpenSearch index permission; canonical wire form is lowercase with no
/// separator (`readwrite`).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpensearchAclPermission {
    Deny,
    Admin,
    Read,
    Write,
    Readwrite,
}

impl OpensearchAclPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpensearchAclPermission::Deny => "deny",
            OpensearchAclPermission::Admin => "admin",
            OpensearchAclPermission::Read => "read",
            OpensearchAclPermission::Write => "write",
            OpensearchAclPermission::Readwrite => "readwrite",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "deny" => Some(OpensearchAclPermission::Deny),
            "admin" => Some(OpensearchAclPermission::Admin),
            "read" => Some(OpensearchAclPermission::Read),
            "write" => Some(OpensearchAclPermission::Write),
            "readwrite" => Some(OpensearchAclPermission::Readwrite),
            _ => None,
        }
    }
}

/// Persisted record of a reconciled user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserRecord {
    /// Composite local ID `cluster/user/<name>`.
    pub id: String,

    pub cluster_id: String,
    pub name: String,

    /// Remote-assigned role, `normal` unless the remote says otherwise.
    pub role: String,

    /// Sensitive. Only refreshed from reads when the remote returns a
    /// non-empty value.
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql_auth_plugin: Option<MysqlAuthPlugin>,

    /// Settings as last written by a create or explicit update. Reads omit
    /// them on the wire, so they are never refreshed from a read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,

    /// Kafka mutual-TLS access certificate. Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_cert: Option<String>,
    /// Kafka mutual-TLS access key. Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
}
