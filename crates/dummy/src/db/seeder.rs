//! Database seeding utilities.

use console::database::upsert_usage;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tracing::{debug, info};

use crate::generators::{
    DummyData, GeneratedAccount, GeneratedApp, GeneratedStage, GeneratedUser, GeneratedWorkspace,
};
use crate::sequence::DummySummary;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Sequence must start with a workspace")]
    MissingWorkspace,
    #[error("Unexpected second workspace: {0}")]
    UnexpectedWorkspace(String),
}

/// Workspace-scoped tables, children first.
const WORKSPACE_TABLES: [&str; 7] = [
    "usage",
    "stage",
    "app",
    "aws_account",
    "users",
    "stripe",
    "slack_team",
];

/// Loads generated dummy data into the console database.
pub struct Seeder {
    pool: PgPool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Seeds one generated workspace.
    ///
    /// Runs in a single transaction. Rows left by an earlier seed of the same
    /// workspace are removed first, so reseeding with another configuration
    /// replaces rather than merges.
    pub async fn seed<I>(&self, data: I) -> Result<DummySummary, SeedError>
    where
        I: IntoIterator<Item = DummyData>,
    {
        let mut data = data.into_iter();
        let Some(DummyData::Workspace(workspace)) = data.next() else {
            return Err(SeedError::MissingWorkspace);
        };

        let mut tx = self.pool.begin().await?;
        clear_workspace(&mut tx, &workspace.id).await?;
        insert_workspace(&mut tx, &workspace).await?;

        let mut summary = DummySummary {
            workspaces: 1,
            ..DummySummary::default()
        };

        for entity in data {
            summary.record(&entity);
            match entity {
                DummyData::Workspace(other) => {
                    return Err(SeedError::UnexpectedWorkspace(other.id));
                }
                DummyData::User(user) => insert_user(&mut tx, &workspace.id, &user).await?,
                DummyData::Account(account) => {
                    insert_account(&mut tx, &workspace.id, &account).await?
                }
                DummyData::App(app) => insert_app(&mut tx, &workspace.id, &app).await?,
                DummyData::Stage(stage) => insert_stage(&mut tx, &workspace.id, &stage).await?,
                DummyData::Usage(usage) => {
                    upsert_usage(&mut *tx, &usage.into_row(&workspace.id)).await?;
                }
            }
        }

        tx.commit().await?;

        info!(
            "Seeded workspace {}: {} users, {} accounts, {} apps, {} stages, {} usage rows",
            workspace.id,
            summary.users,
            summary.accounts,
            summary.apps,
            summary.stages,
            summary.usage
        );
        Ok(summary)
    }
}

async fn clear_workspace(conn: &mut PgConnection, workspace_id: &str) -> Result<(), SeedError> {
    for table in WORKSPACE_TABLES {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE workspace_id = $1"))
            .bind(workspace_id)
            .execute(&mut *conn)
            .await?;
        debug!("Cleared {} rows from {table}", result.rows_affected());
    }

    sqlx::query("DELETE FROM workspace WHERE id = $1")
        .bind(workspace_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

async fn insert_workspace(
    conn: &mut PgConnection,
    workspace: &GeneratedWorkspace,
) -> Result<(), SeedError> {
    sqlx::query(
        r#"
        INSERT INTO workspace (id, slug, time_created, time_updated, time_deleted)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&workspace.id)
    .bind(&workspace.slug)
    .bind(workspace.time_created)
    .bind(workspace.time_updated)
    .bind(workspace.time_deleted)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO stripe (workspace_id, customer_id, subscription_id, subscription_item_id,
                            time_created, time_updated)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&workspace.id)
    .bind(&workspace.stripe_customer_id)
    .bind(&workspace.stripe_subscription_id)
    .bind(&workspace.stripe_subscription_item_id)
    .bind(workspace.time_created)
    .bind(workspace.time_updated)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_user(
    conn: &mut PgConnection,
    workspace_id: &str,
    user: &GeneratedUser,
) -> Result<(), SeedError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, workspace_id, email, time_created, time_updated, time_seen, time_deleted)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (workspace_id, id) DO NOTHING
        "#,
    )
    .bind(&user.id)
    .bind(workspace_id)
    .bind(&user.email)
    .bind(user.time_created)
    .bind(user.time_updated)
    .bind(user.time_seen)
    .bind(user.time_deleted)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_account(
    conn: &mut PgConnection,
    workspace_id: &str,
    account: &GeneratedAccount,
) -> Result<(), SeedError> {
    sqlx::query(
        r#"
        INSERT INTO aws_account (id, workspace_id, account_id, time_created, time_updated,
                                 time_deleted, time_failed, time_discovered)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (workspace_id, id) DO NOTHING
        "#,
    )
    .bind(&account.id)
    .bind(workspace_id)
    .bind(&account.account_id)
    .bind(account.time_created)
    .bind(account.time_updated)
    .bind(account.time_deleted)
    .bind(account.time_failed)
    .bind(account.time_discovered)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_app(
    conn: &mut PgConnection,
    workspace_id: &str,
    app: &GeneratedApp,
) -> Result<(), SeedError> {
    sqlx::query(
        r#"
        INSERT INTO app (id, workspace_id, name, time_created, time_updated, time_deleted)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (workspace_id, id) DO NOTHING
        "#,
    )
    .bind(&app.id)
    .bind(workspace_id)
    .bind(&app.name)
    .bind(app.time_created)
    .bind(app.time_updated)
    .bind(app.time_deleted)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn insert_stage(
    conn: &mut PgConnection,
    workspace_id: &str,
    stage: &GeneratedStage,
) -> Result<(), SeedError> {
    sqlx::query(
        r#"
        INSERT INTO stage (id, workspace_id, app_id, aws_account_id, name, region,
                           time_created, time_updated, time_deleted)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (workspace_id, id) DO NOTHING
        "#,
    )
    .bind(&stage.id)
    .bind(workspace_id)
    .bind(&stage.app_id)
    .bind(&stage.account_id)
    .bind(&stage.name)
    .bind(&stage.region)
    .bind(stage.time_created)
    .bind(stage.time_updated)
    .bind(stage.time_deleted)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
