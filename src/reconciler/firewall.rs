//! Firewall reconciler. The remote holds one replaceable rule set per
//! cluster: create and update both PUT the declared set, delete PUTs an
//! empty one. Fields the remote fills in (`uuid`, `created_at`) are
//! carried on the record but never diffed.

use tracing::{debug, info, warn};

use crate::client::FirewallRuleInput;
use crate::id::firewall_id;
use crate::reconciler::context::Context;
use crate::reconciler::error::{Error, Result};
use crate::spec::firewall::{FirewallRecord, FirewallRuleRecord, FirewallSpec};

pub async fn create_firewall(ctx: &Context, spec: &FirewallSpec) -> Result<FirewallRecord> {
    if spec.rules.is_empty() {
        return Err(Error::validation("at least one firewall rule is required"));
    }
    put_rules(ctx, &spec.cluster_id, spec).await?;
    info!(cluster = %spec.cluster_id, rules = spec.rules.len(), "created firewall rule set");

    let rules = fetch_rules(ctx, &spec.cluster_id).await?;
    Ok(FirewallRecord {
        id: firewall_id(&spec.cluster_id),
        cluster_id: spec.cluster_id.clone(),
        rules,
    })
}

pub async fn read_firewall(ctx: &Context, prior: &FirewallRecord) -> Result<Option<FirewallRecord>> {
    match ctx.client.get_firewall_rules(&prior.cluster_id).await {
        Ok(observed) => Ok(Some(FirewallRecord {
            id: prior.id.clone(),
            cluster_id: prior.cluster_id.clone(),
            rules: observed.into_iter().map(rule_record).collect(),
        })),
        Err(err) if err.is_not_found() => {
            warn!(cluster = %prior.cluster_id, "cluster vanished, clearing firewall record");
            Ok(None)
        }
        Err(err) => Err(Error::remote("reading database firewall", err)),
    }
}

pub async fn update_firewall(
    ctx: &Context,
    prior: &FirewallRecord,
    spec: &FirewallSpec,
) -> Result<FirewallRecord> {
    put_rules(ctx, &prior.cluster_id, spec).await?;
    debug!(cluster = %prior.cluster_id, rules = spec.rules.len(), "replaced firewall rule set");

    let rules = fetch_rules(ctx, &prior.cluster_id).await?;
    Ok(FirewallRecord {
        id: prior.id.clone(),
        cluster_id: prior.cluster_id.clone(),
        rules,
    })
}

/// Delete clears the remote set; the cluster itself is untouched.
pub async fn delete_firewall(ctx: &Context, cluster_id: &str) -> Result<()> {
    match ctx.client.replace_firewall_rules(cluster_id, &[]).await {
        Ok(()) => {
            info!(cluster = %cluster_id, "cleared firewall rule set");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            debug!(cluster = %cluster_id, "cluster already gone, nothing to clear");
            Ok(())
        }
        Err(err) => Err(Error::remote("deleting database firewall", err)),
    }
}

/// Import by cluster UUID; a fresh synthetic local ID is minted.
pub async fn import_firewall(ctx: &Context, cluster_id: &str) -> Result<FirewallRecord> {
    let rules = ctx
        .client
        .get_firewall_rules(cluster_id)
        .await
        .map_err(|e| Error::remote("importing database firewall", e))?;
    Ok(FirewallRecord {
        id: firewall_id(cluster_id),
        cluster_id: cluster_id.to_string(),
        rules: rules.into_iter().map(rule_record).collect(),
    })
}

async fn put_rules(ctx: &Context, cluster_id: &str, spec: &FirewallSpec) -> Result<()> {
    let inputs: Vec<FirewallRuleInput> = spec
        .rules
        .iter()
        .map(|rule| FirewallRuleInput {
            rule_type: rule.rule_type,
            value: rule.value.clone(),
        })
        .collect();
    ctx.client
        .replace_firewall_rules(cluster_id, &inputs)
        .await
        .map_err(|e| Error::remote("updating database firewall", e))
}

async fn fetch_rules(ctx: &Context, cluster_id: &str) -> Result<Vec<FirewallRuleRecord>> {
    let observed = ctx
        .client
        .get_firewall_rules(cluster_id)
        .await
        .map_err(|e| Error::remote("reading database firewall", e))?;
    Ok(observed.into_iter().map(rule_record).collect())
}

fn rule_record(rule: crate::client::FirewallRule) -> FirewallRuleRecord {
    FirewallRuleRecord {
        uuid: Some(rule.uuid),
        rule_type: rule.rule_type,
        value: rule.value,
        created_at: Some(rule.created_at),
    }
}
