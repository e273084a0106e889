//! Integration tests for billing and Slack persistence.
//!
//! To run these tests, you need a PostgreSQL database and the `DATABASE_URL`
//! environment variable set. Migrations are applied by the tests.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test -p console --test billing_integration`
//!
//! Each test works in its own freshly named workspace and removes its rows
//! afterwards, so they can safely run against a development database.

use console::{
    actor::WorkspaceActor,
    billing::{self, CreateUsage, DayRange, SetSubscription},
    database::{Database, MIGRATOR},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use time::macros::date;
use uuid::Uuid;

/// Get database pool, skipping tests if DATABASE_URL is not set.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    Some(pool)
}

/// Helper to create a workspace with an empty Stripe row.
async fn create_test_workspace(pool: &PgPool) -> WorkspaceActor {
    let workspace_id = format!("test-{}", Uuid::new_v4());
    sqlx::query("INSERT INTO workspace (id, slug) VALUES ($1, $1)")
        .bind(&workspace_id)
        .execute(pool)
        .await
        .expect("Failed to create test workspace");
    sqlx::query("INSERT INTO stripe (workspace_id) VALUES ($1)")
        .bind(&workspace_id)
        .execute(pool)
        .await
        .expect("Failed to create stripe row");

    WorkspaceActor::new(workspace_id)
}

/// Cleanup helper to remove test data.
async fn cleanup_test_data(pool: &PgPool, actor: &WorkspaceActor) {
    for table in ["usage", "stripe", "slack_team"] {
        let _ = sqlx::query(&format!("DELETE FROM {table} WHERE workspace_id = $1"))
            .bind(actor.workspace_id())
            .execute(pool)
            .await;
    }
    let _ = sqlx::query("DELETE FROM workspace WHERE id = $1")
        .bind(actor.workspace_id())
        .execute(pool)
        .await;
}

#[tokio::test]
async fn test_usage_upsert_and_range() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool.clone());
    let actor = create_test_workspace(&pool).await;

    for (day, invocations) in [
        (date!(2021 - 01 - 01), 100),
        (date!(2021 - 01 - 02), 5),
        (date!(2021 - 01 - 02), 1_230_000),
        (date!(2021 - 02 - 01), 7),
    ] {
        billing::create_usage(
            &db,
            &actor,
            CreateUsage {
                stage_id: "stage-1".to_string(),
                day,
                invocations,
            },
        )
        .await
        .expect("create usage");
    }

    let january = billing::list_usage(
        &db,
        &actor,
        DayRange {
            start_day: date!(2021 - 01 - 01),
            end_day: date!(2021 - 01 - 31),
        },
    )
    .await
    .expect("list usage");

    // The second write for Jan 2 replaced the first.
    assert_eq!(january.len(), 2);
    assert_eq!(january[1].invocations, 1_230_000);

    let summary = billing::summarize(&january);
    assert_eq!(summary.invocations, 1_230_100);
    assert_eq!(summary.overage, 230_100);

    cleanup_test_data(&pool, &actor).await;
}

#[tokio::test]
async fn test_usage_replacement_keeps_row_id() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool.clone());
    let actor = create_test_workspace(&pool).await;

    let record = |invocations| CreateUsage {
        stage_id: "stage-1".to_string(),
        day: date!(2021 - 01 - 01),
        invocations,
    };

    let first = billing::create_usage(&db, &actor, record(100))
        .await
        .expect("first write");
    let second = billing::create_usage(&db, &actor, record(250))
        .await
        .expect("second write");

    assert_eq!(second.id, first.id);
    assert_eq!(second.time_created, first.time_created);
    assert_eq!(second.invocations, 250);

    let stored = billing::list_usage(
        &db,
        &actor,
        DayRange {
            start_day: date!(2021 - 01 - 01),
            end_day: date!(2021 - 01 - 01),
        },
    )
    .await
    .expect("list usage");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);

    cleanup_test_data(&pool, &actor).await;
}

#[tokio::test]
async fn test_stripe_subscription_lifecycle() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool.clone());
    let actor = create_test_workspace(&pool).await;
    let suffix = Uuid::new_v4().simple().to_string();
    let customer_id = format!("cus_{suffix}");
    let subscription_id = format!("sub_{suffix}");

    billing::set_customer_id(&db, &actor, &format!("  {customer_id} "))
        .await
        .expect("set customer");
    billing::set_subscription(
        &db,
        &actor,
        SetSubscription {
            subscription_id: subscription_id.clone(),
            subscription_item_id: format!("si_{suffix}"),
        },
    )
    .await
    .expect("set subscription");

    let info = billing::from_customer_id(&db, &customer_id)
        .await
        .expect("lookup")
        .expect("customer recorded");
    assert_eq!(info.workspace_id, actor.workspace_id());
    assert!(info.has_subscription());

    billing::remove_subscription(&db, &subscription_id)
        .await
        .expect("remove subscription");

    let info = billing::get_stripe(&db, &actor)
        .await
        .expect("get")
        .expect("stripe row");
    assert!(info.subscription_id.is_none());
    assert!(info.subscription_item_id.is_none());
    assert_eq!(info.customer_id.as_deref(), Some(customer_id.as_str()));

    cleanup_test_data(&pool, &actor).await;
}

#[tokio::test]
async fn test_slack_team_reconnect_replaces_token() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool.clone());
    let actor = create_test_workspace(&pool).await;

    db.upsert_slack_team(actor.workspace_id(), "T1", "Acme", "xoxb-1")
        .await
        .expect("connect");
    db.upsert_slack_team(actor.workspace_id(), "T1", "Acme Inc", "xoxb-2")
        .await
        .expect("reconnect");

    let team = db
        .get_slack_team(actor.workspace_id(), "T1")
        .await
        .expect("lookup")
        .expect("team stored");
    assert_eq!(team.team_name, "Acme Inc");
    assert_eq!(team.access_token, "xoxb-2");

    assert!(
        db.get_slack_team(actor.workspace_id(), "T2")
            .await
            .expect("lookup")
            .is_none()
    );

    cleanup_test_data(&pool, &actor).await;
}
