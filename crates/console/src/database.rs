use crate::errors::AppError;
use crate::models::{SlackTeam, StripeInfo, Usage};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use time::Date;

/// Embedded console schema.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Inserts a usage row, replacing the invocation count when the workspace
/// already has a row for the same stage and day.
///
/// Returns the stored row; on conflict it keeps its original id and
/// creation time. Generic over the executor so seeding can run it inside a
/// transaction.
pub async fn upsert_usage<'e, E>(executor: E, usage: &Usage) -> Result<Usage, sqlx::Error>
where
    E: sqlx::postgres::PgExecutor<'e>,
{
    sqlx::query_as(
        r#"
        INSERT INTO usage (id, workspace_id, stage_id, day, invocations,
                           time_created, time_updated, time_deleted)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (workspace_id, stage_id, day)
        DO UPDATE SET invocations = EXCLUDED.invocations, time_updated = EXCLUDED.time_updated
        RETURNING id, workspace_id, stage_id, day, invocations,
                  time_created, time_updated, time_deleted
        "#,
    )
    .bind(&usage.id)
    .bind(&usage.workspace_id)
    .bind(&usage.stage_id)
    .bind(usage.day)
    .bind(usage.invocations)
    .bind(usage.time_created)
    .bind(usage.time_updated)
    .bind(usage.time_deleted)
    .fetch_one(executor)
    .await
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Usage

    pub async fn create_usage(&self, usage: &Usage) -> Result<Usage, AppError> {
        let stored = upsert_usage(&self.pool, usage).await?;
        Ok(stored)
    }

    pub async fn list_usage_between(
        &self,
        workspace_id: &str,
        start_day: Date,
        end_day: Date,
    ) -> Result<Vec<Usage>, AppError> {
        let usage: Vec<Usage> = sqlx::query_as(
            r#"
            SELECT id, workspace_id, stage_id, day, invocations,
                   time_created, time_updated, time_deleted
            FROM usage
            WHERE workspace_id = $1 AND day BETWEEN $2 AND $3
            ORDER BY day, stage_id
            "#,
        )
        .bind(workspace_id)
        .bind(start_day)
        .bind(end_day)
        .fetch_all(&self.pool)
        .await?;

        Ok(usage)
    }

    // Stripe

    pub async fn get_stripe(&self, workspace_id: &str) -> Result<Option<StripeInfo>, AppError> {
        let info = sqlx::query_as(
            r#"
            SELECT workspace_id, customer_id, subscription_id, subscription_item_id,
                   time_created, time_updated
            FROM stripe
            WHERE workspace_id = $1
            "#,
        )
        .bind(workspace_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(info)
    }

    pub async fn get_stripe_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<StripeInfo>, AppError> {
        let info = sqlx::query_as(
            r#"
            SELECT workspace_id, customer_id, subscription_id, subscription_item_id,
                   time_created, time_updated
            FROM stripe
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(info)
    }

    /// Returns the number of rows updated.
    pub async fn set_stripe_subscription(
        &self,
        workspace_id: &str,
        subscription_id: &str,
        subscription_item_id: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE stripe
            SET subscription_id = $2, subscription_item_id = $3, time_updated = NOW()
            WHERE workspace_id = $1
            "#,
        )
        .bind(workspace_id)
        .bind(subscription_id)
        .bind(subscription_item_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn set_stripe_customer(
        &self,
        workspace_id: &str,
        customer_id: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE stripe
            SET customer_id = $2, time_updated = NOW()
            WHERE workspace_id = $1
            "#,
        )
        .bind(workspace_id)
        .bind(customer_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn remove_stripe_subscription(&self, subscription_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE stripe
            SET subscription_id = NULL, subscription_item_id = NULL, time_updated = NOW()
            WHERE subscription_id = $1
            "#,
        )
        .bind(subscription_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // Slack

    pub async fn upsert_slack_team(
        &self,
        workspace_id: &str,
        team_id: &str,
        team_name: &str,
        access_token: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO slack_team (id, workspace_id, team_id, team_name, access_token)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (workspace_id, team_id)
            DO UPDATE SET access_token = EXCLUDED.access_token,
                          team_name = EXCLUDED.team_name,
                          time_updated = NOW()
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(workspace_id)
        .bind(team_id)
        .bind(team_name)
        .bind(access_token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_slack_team(
        &self,
        workspace_id: &str,
        team_id: &str,
    ) -> Result<Option<SlackTeam>, AppError> {
        let team = sqlx::query_as(
            r#"
            SELECT id, workspace_id, team_id, team_name, access_token
            FROM slack_team
            WHERE workspace_id = $1 AND team_id = $2
            "#,
        )
        .bind(workspace_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }
}
