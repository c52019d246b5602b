//! Users, logical databases, connection pools, firewalls and replicas.

use std::sync::Arc;

use dbaas_operator::reconciler::database::{
    create_database, delete_database, import_database, read_database,
};
use dbaas_operator::reconciler::firewall::{
    create_firewall, delete_firewall, import_firewall, read_firewall, update_firewall,
};
use dbaas_operator::reconciler::pool::{create_pool, delete_pool, read_pool};
use dbaas_operator::reconciler::replica::{create_replica, delete_replica, read_replica};
use dbaas_operator::reconciler::user::{create_user, delete_user, read_user, update_user};
use dbaas_operator::reconciler::Context;
use dbaas_operator::spec::database::LogicalDatabaseSpec;
use dbaas_operator::spec::firewall::{FirewallRuleSpec, FirewallRuleType, FirewallSpec};
use dbaas_operator::spec::pool::{ConnectionPoolSpec, PoolMode};
use dbaas_operator::spec::replica::ReplicaSpec;
use dbaas_operator::spec::user::{
    KafkaAcl, KafkaAclPermission, MysqlAuthPlugin, UserSettings, UserSpec,
};
use dbaas_operator::Engine;

use crate::fake::FakeControlPlane;

fn ctx(fake: &Arc<FakeControlPlane>) -> Context {
    Context::new(fake.clone())
}

#[tokio::test]
async fn test_user_settings_survive_reads_that_omit_them() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("kafka-a", Engine::Kafka);

    let spec = UserSpec {
        cluster_id: cluster_id.clone(),
        name: "producer".to_string(),
        mysql_auth_plugin: None,
        settings: Some(UserSettings {
            acl: vec![KafkaAcl {
                id: None,
                topic: "events".to_string(),
                permission: KafkaAclPermission::Produceconsume,
            }],
            opensearch_acl: vec![],
        }),
    };

    let record = create_user(&ctx, &spec).await.unwrap();
    assert_eq!(record.id, format!("{}/user/producer", cluster_id));
    assert_eq!(record.role, "normal");
    assert!(!record.password.is_empty());
    assert!(record.settings.is_some());

    // The read API omits settings; the record keeps what create returned.
    let refreshed = read_user(&ctx, &record).await.unwrap().unwrap();
    assert_eq!(refreshed.settings, record.settings);
    assert_eq!(refreshed.password, record.password);
}

#[tokio::test]
async fn test_user_auth_plugin_reset() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("mysql-a", Engine::Mysql);

    let spec = UserSpec {
        cluster_id: cluster_id.clone(),
        name: "app".to_string(),
        mysql_auth_plugin: Some(MysqlAuthPlugin::MysqlNativePassword),
        settings: None,
    };
    let record = create_user(&ctx, &spec).await.unwrap();
    assert_eq!(
        record.mysql_auth_plugin,
        Some(MysqlAuthPlugin::MysqlNativePassword)
    );

    // Removing the declaration maps to the default plugin.
    let mut desired = spec.clone();
    desired.mysql_auth_plugin = None;
    let updated = update_user(&ctx, &record, &desired).await.unwrap();
    assert_eq!(
        updated.mysql_auth_plugin,
        Some(MysqlAuthPlugin::CachingSha2Password)
    );
}

#[tokio::test]
async fn test_user_delete_then_read_clears() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("pg-a", Engine::Pg);

    let spec = UserSpec {
        cluster_id: cluster_id.clone(),
        name: "temp".to_string(),
        mysql_auth_plugin: None,
        settings: None,
    };
    let record = create_user(&ctx, &spec).await.unwrap();

    delete_user(&ctx, &cluster_id, "temp").await.unwrap();
    delete_user(&ctx, &cluster_id, "temp").await.unwrap();
    assert!(read_user(&ctx, &record).await.unwrap().is_none());
}

#[tokio::test]
async fn test_logical_database_lifecycle() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("pg-a", Engine::Pg);

    let spec = LogicalDatabaseSpec {
        cluster_id: cluster_id.clone(),
        name: "orders".to_string(),
    };
    let record = create_database(&ctx, &spec).await.unwrap();
    assert_eq!(record.id, format!("{}/database/orders", cluster_id));

    assert!(read_database(&ctx, &record).await.unwrap().is_some());

    let imported = import_database(&ctx, &format!("{},orders", cluster_id))
        .await
        .unwrap();
    assert_eq!(imported.id, record.id);

    delete_database(&ctx, &cluster_id, "orders").await.unwrap();
    assert!(read_database(&ctx, &record).await.unwrap().is_none());
}

#[tokio::test]
async fn test_pool_skip_if_exists_adopts_existing() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("pg-a", Engine::Pg);

    let spec = ConnectionPoolSpec {
        cluster_id: cluster_id.clone(),
        name: "web".to_string(),
        mode: PoolMode::Transaction,
        size: 10,
        db_name: "defaultdb".to_string(),
        user: Some("doadmin".to_string()),
        skip_if_exists: false,
    };
    let record = create_pool(&ctx, &spec).await.unwrap();
    assert_eq!(record.id, format!("{}/web", cluster_id));

    // A retried create with skip_if_exists adopts the pool instead of
    // failing.
    let mut retry = spec.clone();
    retry.skip_if_exists = true;
    let adopted = create_pool(&ctx, &retry).await.unwrap();
    assert_eq!(adopted, record);

    delete_pool(&ctx, &cluster_id, "web").await.unwrap();
    assert!(read_pool(&ctx, &record).await.unwrap().is_none());
}

#[tokio::test]
async fn test_firewall_replace_semantics() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("pg-a", Engine::Pg);

    let one_rule = FirewallSpec {
        cluster_id: cluster_id.clone(),
        rules: vec![FirewallRuleSpec {
            rule_type: FirewallRuleType::IpAddr,
            value: "192.0.2.10".to_string(),
        }],
    };
    let record = create_firewall(&ctx, &one_rule).await.unwrap();
    assert!(record.id.starts_with(&format!("{}-", cluster_id)));
    assert_eq!(record.rules.len(), 1);
    // Remote-populated fields are present without causing drift checks.
    assert!(record.rules[0].uuid.is_some());
    assert!(record.rules[0].created_at.is_some());

    let two_rules = FirewallSpec {
        cluster_id: cluster_id.clone(),
        rules: vec![
            FirewallRuleSpec {
                rule_type: FirewallRuleType::IpAddr,
                value: "192.0.2.10".to_string(),
            },
            FirewallRuleSpec {
                rule_type: FirewallRuleType::IpAddr,
                value: "192.0.2.11".to_string(),
            },
        ],
    };
    let record = update_firewall(&ctx, &record, &two_rules).await.unwrap();
    assert_eq!(record.rules.len(), 2);

    let record = update_firewall(&ctx, &record, &one_rule).await.unwrap();
    assert_eq!(record.rules.len(), 1);

    delete_firewall(&ctx, &cluster_id).await.unwrap();
    let cleared = read_firewall(&ctx, &record).await.unwrap().unwrap();
    assert!(cleared.rules.is_empty());

    let imported = import_firewall(&ctx, &cluster_id).await.unwrap();
    assert_ne!(imported.id, record.id);
}

#[tokio::test(start_paused = true)]
async fn test_replica_retries_precondition_failures() {
    let fake = FakeControlPlane::shared();
    let ctx = ctx(&fake);
    let cluster_id = fake.seed_cluster("pg-a", Engine::Pg);
    fake.set_replica_precondition_failures(2);

    let spec = ReplicaSpec {
        cluster_id: cluster_id.clone(),
        name: "read-1".to_string(),
        region: Some("SFO3".to_string()),
        size: Some("db-s-1vcpu-2gb".to_string()),
        tags: Default::default(),
        private_network_uuid: None,
    };
    let record = create_replica(&ctx, &spec).await.unwrap();
    assert_eq!(record.id, format!("{}/replicas/read-1", cluster_id));
    assert!(record.uuid.starts_with("replica-"));
    assert_eq!(record.region, "sfo3");
    assert_eq!(record.size.as_deref(), Some("db-s-1vcpu-2gb"));

    // Size is not reported on read; the declared value is carried along.
    let refreshed = read_replica(&ctx, &record).await.unwrap().unwrap();
    assert_eq!(refreshed.size.as_deref(), Some("db-s-1vcpu-2gb"));

    delete_replica(&ctx, &cluster_id, "read-1").await.unwrap();
    assert!(read_replica(&ctx, &record).await.unwrap().is_none());
}
