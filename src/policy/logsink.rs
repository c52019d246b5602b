//! Plan-time validation for log-sink declarations.

use url::Url;

use crate::reconciler::error::{Error, Result};
use crate::spec::logsink::{
    ElasticsearchSinkConfig, LogSinkConfig, LogSinkSpec, OpensearchSinkConfig, RsyslogConfig,
    RsyslogFormat,
};

/// Validate a sink declaration. `legacy` selects the unified surface's
/// slightly stricter OpenSearch timeout bound.
pub fn validate_log_sink(spec: &LogSinkSpec, legacy: bool) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("sink_name must not be empty"));
    }
    match &spec.config {
        LogSinkConfig::Rsyslog(config) => validate_rsyslog(config),
        LogSinkConfig::Opensearch(config) => validate_opensearch(config, legacy),
        LogSinkConfig::Elasticsearch(config) => validate_elasticsearch(config),
    }
}

fn validate_rsyslog(config: &RsyslogConfig) -> Result<()> {
    if config.server.trim().is_empty() {
        return Err(Error::validation("server must not be empty"));
    }
    if config.port == 0 {
        return Err(Error::validation(
            "expected port to be in the range (1 - 65535), got 0",
        ));
    }
    if config.format == RsyslogFormat::Custom
        && config.logline.as_deref().map_or(true, |l| l.trim().is_empty())
    {
        return Err(Error::validation(
            "logline is required when format is 'custom'",
        ));
    }
    if config.cert.is_some() != config.key.is_some() {
        return Err(Error::validation(
            "cert and key must both be set when either is",
        ));
    }
    let has_tls_material =
        config.ca.is_some() || config.cert.is_some() || config.key.is_some();
    if has_tls_material && !config.tls {
        return Err(Error::validation(
            "tls must be set to true when ca, cert or key is provided",
        ));
    }
    Ok(())
}

fn validate_opensearch(config: &OpensearchSinkConfig, legacy: bool) -> Result<()> {
    // A scheme-less or unparseable endpoint is reported the same way as a
    // plain-http one.
    let is_https = Url::parse(&config.url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false);
    if !is_https {
        return Err(Error::validation(format!(
            "endpoint {:?} must use HTTPS scheme",
            config.url
        )));
    }
    if config.index_prefix.trim().is_empty() {
        return Err(Error::validation("index_prefix must not be empty"));
    }
    if config.index_days_max < 1 {
        return Err(Error::validation(
            "expected index_days_max to be at least 1, got 0",
        ));
    }
    if let Some(timeout) = config.timeout_seconds {
        if legacy {
            if !(10.0..=120.0).contains(&timeout) {
                return Err(Error::validation(format!(
                    "expected timeout_seconds to be in the range (10 - 120), got {}",
                    timeout
                )));
            }
        } else if timeout < 1.0 {
            return Err(Error::validation(format!(
                "expected timeout_seconds to be at least 1, got {}",
                timeout
            )));
        }
    }
    Ok(())
}

fn validate_elasticsearch(config: &ElasticsearchSinkConfig) -> Result<()> {
    Url::parse(&config.url)
        .map_err(|_| Error::validation(format!("invalid endpoint URL {:?}", config.url)))?;
    if config.index_prefix.trim().is_empty() {
        return Err(Error::validation("index_prefix must not be empty"));
    }
    if let Some(days) = config.index_days_max {
        if days < 1 {
            return Err(Error::validation(
                "expected index_days_max to be at least 1, got 0",
            ));
        }
    }
    if let Some(timeout) = config.timeout {
        if !(10.0..=120.0).contains(&timeout) {
            return Err(Error::validation(format!(
                "expected timeout to be in the range (10 - 120), got {}",
                timeout
            )));
        }
    }
    Ok(())
}
