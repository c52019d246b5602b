use std::fmt;

use serde::{Deserialize, Serialize};

/// Desired state of a log sink. The three typed resource surfaces and the
/// legacy unified one all share this shape; they differ only in which
/// config variants they admit and in their local ID form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LogSinkSpec {
    /// Owning cluster UUID (immutable).
    pub cluster_id: String,

    /// Sink name (immutable).
    pub name: String,

    pub config: LogSinkConfig,
}

impl LogSinkSpec {
    pub fn sink_type(&self) -> LogSinkType {
        self.config.sink_type()
    }
}

/// Sink destination kinds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogSinkType {
    Rsyslog,
    Opensearch,
    Elasticsearch,
}

impl LogSinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSinkType::Rsyslog => "rsyslog",
            LogSinkType::Opensearch => "opensearch",
            LogSinkType::Elasticsearch => "elasticsearch",
        }
    }
}

impl fmt::Display for LogSinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink configuration, discriminated by `sink_type` on the wire.
///
/// The legacy unified surface used to carry these three shapes behind one
/// untagged block and type-assert on read; the tagged union makes an
/// unexpected remote payload a decode error instead of a crash.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "sink_type", rename_all = "lowercase")]
pub enum LogSinkConfig {
    Rsyslog(RsyslogConfig),
    Opensearch(OpensearchSinkConfig),
    Elasticsearch(ElasticsearchSinkConfig),
}

impl LogSinkConfig {
    pub fn sink_type(&self) -> LogSinkType {
        match self {
            LogSinkConfig::Rsyslog(_) => LogSinkType::Rsyslog,
            LogSinkConfig::Opensearch(_) => LogSinkType::Opensearch,
            LogSinkConfig::Elasticsearch(_) => LogSinkType::Elasticsearch,
        }
    }
}

/// Forward logs to an rsyslog server.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RsyslogConfig {
    pub server: String,

    /// 1..=65535.
    pub port: u16,

    #[serde(default)]
    pub tls: bool,

    pub format: RsyslogFormat,

    /// Custom log line template; required iff `format` is `custom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logline: Option<String>,

    /// RFC 5424 structured-data block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<String>,

    /// PEM CA certificate for the server. Implies `tls`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    /// PEM client certificate; all-or-none with `key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    /// PEM client key; all-or-none with `cert`. Sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Message formats an rsyslog sink can emit.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RsyslogFormat {
    Rfc5424,
    Rfc3164,
    Custom,
}

impl RsyslogFormat {
    pub const ALL: [&'static str; 3] = ["rfc5424", "rfc3164", "custom"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RsyslogFormat::Rfc5424 => "rfc5424",
            RsyslogFormat::Rfc3164 => "rfc3164",
            RsyslogFormat::Custom => "custom",
        }
    }
}

/// Ship logs to an OpenSearch endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OpensearchSinkConfig {
    /// Endpoint URL; must use the https scheme.
    pub url: String,

    pub index_prefix: String,

    /// Days an index is retained; at least 1.
    pub index_days_max: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,

    /// Request timeout; at least 1 second. The legacy unified surface
    /// additionally bounds it to [10, 120].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

/// Ship logs to an Elasticsearch endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ElasticsearchSinkConfig {
    pub url: String,

    pub index_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_days_max: Option<u32>,

    /// Request timeout in seconds, within [10, 120].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

/// Persisted record of a log sink.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LogSinkRecord {
    /// Composite local ID: `cluster,sink_id` for the typed surfaces, or
    /// `cluster/logsink/<id>` for the legacy unified one.
    pub id: String,

    pub cluster_id: String,
    /// Remote-assigned sink ID.
    pub sink_id: String,
    pub name: String,
    pub config: LogSinkConfig,
}
