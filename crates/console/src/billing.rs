//! Billing: daily usage and Stripe bookkeeping.
//!
//! Every operation validates its input and then runs a single statement
//! against the console database. Nothing here talks to Stripe itself; the
//! webhook and checkout flows that do keep the `stripe` table in sync
//! through these functions.

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    actor::WorkspaceActor,
    database::Database,
    errors::AppError,
    models::{StripeInfo, Usage, day_format},
};

/// Invocations included in the plan each billing period.
pub const FREE_INVOCATIONS: i64 = 1_000_000;

/// Usage creation request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUsage {
    #[validate(length(min = 1, message = "stage_id must not be empty"))]
    pub stage_id: String,
    #[serde(with = "day_format")]
    #[schema(value_type = String, format = Date)]
    pub day: Date,
    #[validate(range(min = 0, message = "invocations must not be negative"))]
    pub invocations: i64,
}

/// Inclusive day range.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct DayRange {
    #[serde(with = "day_format")]
    #[schema(value_type = String, format = Date)]
    pub start_day: Date,
    #[serde(with = "day_format")]
    #[schema(value_type = String, format = Date)]
    pub end_day: Date,
}

impl DayRange {
    fn check(&self) -> Result<(), AppError> {
        if self.start_day > self.end_day {
            return Err(AppError::InvalidInput(
                "start_day must not be after end_day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Invocation totals over a range of usage rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct UsageSummary {
    pub invocations: i64,
    pub included: i64,
    /// Invocations beyond the plan allotment.
    pub overage: i64,
}

/// Subscription update request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SetSubscription {
    #[validate(length(min = 1, message = "subscription_id must not be empty"))]
    pub subscription_id: String,
    #[validate(length(min = 1, message = "subscription_item_id must not be empty"))]
    pub subscription_item_id: String,
}

impl SetSubscription {
    fn normalized(self) -> Self {
        Self {
            subscription_id: self.subscription_id.trim().to_string(),
            subscription_item_id: self.subscription_item_id.trim().to_string(),
        }
    }
}

/// Customer update request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetCustomer {
    pub customer_id: String,
}

/// Trims `value` and rejects it when nothing is left.
fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

// Usage

/// Records a day of invocations for a stage, replacing any earlier count.
///
/// Returns the stored row, which keeps its id across replacements.
pub async fn create_usage(
    db: &Database,
    actor: &WorkspaceActor,
    input: CreateUsage,
) -> Result<Usage, AppError> {
    input.validate()?;

    let usage = Usage::new(
        actor.workspace_id().to_string(),
        input.stage_id,
        input.day,
        input.invocations,
    );
    db.create_usage(&usage).await
}

pub async fn list_usage(
    db: &Database,
    actor: &WorkspaceActor,
    range: DayRange,
) -> Result<Vec<Usage>, AppError> {
    range.check()?;
    db.list_usage_between(actor.workspace_id(), range.start_day, range.end_day)
        .await
}

pub fn summarize(usage: &[Usage]) -> UsageSummary {
    let invocations = usage
        .iter()
        .map(|u| u.invocations)
        .fold(0i64, i64::saturating_add);
    UsageSummary {
        invocations,
        included: FREE_INVOCATIONS,
        overage: (invocations - FREE_INVOCATIONS).max(0),
    }
}

// Stripe

pub async fn get_stripe(
    db: &Database,
    actor: &WorkspaceActor,
) -> Result<Option<StripeInfo>, AppError> {
    db.get_stripe(actor.workspace_id()).await
}

pub async fn set_subscription(
    db: &Database,
    actor: &WorkspaceActor,
    input: SetSubscription,
) -> Result<(), AppError> {
    let input = input.normalized();
    input.validate()?;

    db.set_stripe_subscription(
        actor.workspace_id(),
        &input.subscription_id,
        &input.subscription_item_id,
    )
    .await?;
    Ok(())
}

pub async fn set_customer_id(
    db: &Database,
    actor: &WorkspaceActor,
    customer_id: &str,
) -> Result<(), AppError> {
    let customer_id = required("customer_id", customer_id)?;
    db.set_stripe_customer(actor.workspace_id(), &customer_id)
        .await?;
    Ok(())
}

/// Finds the workspace billed to a Stripe customer. Not workspace scoped.
pub async fn from_customer_id(
    db: &Database,
    customer_id: &str,
) -> Result<Option<StripeInfo>, AppError> {
    db.get_stripe_by_customer(customer_id).await
}

/// Clears the subscription wherever it is recorded.
pub async fn remove_subscription(db: &Database, subscription_id: &str) -> Result<(), AppError> {
    if subscription_id.is_empty() {
        return Err(AppError::InvalidInput(
            "subscription_id must not be empty".to_string(),
        ));
    }
    let removed = db.remove_stripe_subscription(subscription_id).await?;
    tracing::info!("Removed subscription {subscription_id} from {removed} workspace(s)");
    Ok(())
}
