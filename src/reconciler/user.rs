//! User reconciler.
//!
//! Create and delete serialize on the per-cluster user lock: the remote
//! user-management endpoints reject concurrent writes against the same
//! cluster. The create response is the only reliable source of `password`
//! and `settings`, so both are written to the record immediately and never
//! refreshed from plain reads.

use tracing::{debug, info, warn};

use crate::client::{UserCreateRequest, UserState, UserUpdateRequest};
use crate::id::{format_user_id, parse_import_pair};
use crate::policy::validate_user;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::user::{MysqlAuthPlugin, UserRecord, UserSpec, UserSettings};

const DEFAULT_ROLE: &str = "normal";

pub async fn create_user(ctx: &Context, spec: &UserSpec) -> Result<UserRecord> {
    validate_user(spec)?;

    let _held = ctx.lock_users(&spec.cluster_id).await;

    let req = UserCreateRequest {
        name: spec.name.clone(),
        mysql_auth_plugin: spec.mysql_auth_plugin,
        settings: spec.settings.as_ref().map(UserSettings::normalized),
    };
    let created = ctx
        .client
        .create_user(&spec.cluster_id, &req)
        .await
        .map_err(|e| Error::remote("creating database user", e))?;
    info!(cluster = %spec.cluster_id, user = %spec.name, "created database user");

    Ok(build_record(&spec.cluster_id, created, spec.settings.clone()))
}

/// Refresh a record. `settings` is deliberately left as last written: the
/// read API omits it, and overwriting would fabricate drift.
pub async fn read_user(ctx: &Context, prior: &UserRecord) -> Result<Option<UserRecord>> {
    let observed = match ctx.client.get_user(&prior.cluster_id, &prior.name).await {
        Ok(observed) => observed,
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, user = %prior.name, "user vanished from remote");
            return Ok(None);
        }
        Err(err) => return Err(Error::remote("reading database user", err)),
    };

    let mut record = prior.clone();
    record.role = observed.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());
    if let Some(password) = observed.password.filter(|p| !p.is_empty()) {
        record.password = password;
    }
    record.mysql_auth_plugin = observed.mysql_auth_plugin.or(prior.mysql_auth_plugin);
    if observed.access_cert.is_some() {
        record.access_cert = observed.access_cert;
    }
    if observed.access_key.is_some() {
        record.access_key = observed.access_key;
    }
    Ok(Some(record))
}

pub async fn update_user(ctx: &Context, prior: &UserRecord, spec: &UserSpec) -> Result<UserRecord> {
    validate_user(spec)?;

    let mut record = prior.clone();

    // Two orthogonal transitions: auth plugin and settings. An unset
    // declared plugin maps to the remote default.
    let desired_plugin = spec.mysql_auth_plugin.unwrap_or_default();
    let prior_plugin = prior.mysql_auth_plugin.unwrap_or_default();
    if desired_plugin != prior_plugin {
        let updated = ctx
            .client
            .reset_user_auth(&spec.cluster_id, &spec.name, desired_plugin.as_str())
            .await
            .map_err(|e| Error::remote("resetting auth for database user", e))?;
        debug!(cluster = %spec.cluster_id, user = %spec.name, "reset user auth plugin");
        record.mysql_auth_plugin = Some(desired_plugin);
        if let Some(password) = updated.password.filter(|p| !p.is_empty()) {
            record.password = password;
        }
    }

    let desired_settings = spec.settings.as_ref().map(UserSettings::normalized);
    let prior_settings = prior.settings.as_ref().map(UserSettings::normalized);
    if desired_settings != prior_settings {
        if let Some(settings) = desired_settings {
            let updated = ctx
                .client
                .update_user(
                    &spec.cluster_id,
                    &spec.name,
                    &UserUpdateRequest {
                        settings: settings.clone(),
                    },
                )
                .await
                .map_err(|e| Error::remote("updating database user", e))?;
            debug!(cluster = %spec.cluster_id, user = %spec.name, "updated user settings");
            // The update response is authoritative for settings, like the
            // create response.
            record.settings = updated.settings.or(Some(settings));
        }
    }

    Ok(record)
}

pub async fn delete_user(ctx: &Context, cluster_id: &str, name: &str) -> Result<()> {
    let _held = ctx.lock_users(cluster_id).await;

    match ctx.client.delete_user(cluster_id, name).await {
        Ok(()) => {
            info!(cluster = %cluster_id, user = %name, "deleted database user");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, user = %name, "user already gone");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting database user", err)),
    }
}

/// Import from a `cluster_id,user_name` identifier.
pub async fn import_user(ctx: &Context, input: &str) -> Result<UserRecord> {
    let (cluster_id, name) = parse_import_pair(input, "cluster_id,user_name")?;
    let observed = ctx
        .client
        .get_user(&cluster_id, &name)
        .await
        .map_err(|e| Error::remote("importing database user", e))?;
    Ok(build_record(&cluster_id, observed, None))
}

fn build_record(
    cluster_id: &str,
    observed: UserState,
    declared_settings: Option<UserSettings>,
) -> UserRecord {
    let settings = observed
        .settings
        .or_else(|| declared_settings.map(|s| s.normalized()));
    UserRecord {
        id: format_user_id(cluster_id, &observed.name),
        cluster_id: cluster_id.to_string(),
        name: observed.name,
        role: observed.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        password: observed.password.unwrap_or_default(),
        mysql_auth_plugin: observed.mysql_auth_plugin,
        settings,
        access_cert: observed.access_cert,
        access_key: observed.access_key,
    }
}
