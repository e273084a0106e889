//! Usage and Stripe bookkeeping handlers.

use axum::{
    Extension,
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};

use crate::{
    actor::WorkspaceActor,
    billing::{
        self, CreateUsage, DayRange, SetCustomer, SetSubscription, UsageSummary,
    },
    database::Database,
    errors::AppError,
    models::{StripeInfo, Usage},
};

/// Record a day of invocations for a stage.
#[utoipa::path(
    post,
    path = "/billing/usage",
    tag = "billing",
    request_body = CreateUsage,
    responses(
        (status = 200, description = "Usage recorded", body = Usage),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Missing workspace")
    )
)]
pub async fn create_usage(
    Extension(db): Extension<Database>,
    actor: WorkspaceActor,
    Json(input): Json<CreateUsage>,
) -> Result<Json<Usage>, AppError> {
    let usage = billing::create_usage(&db, &actor, input).await?;
    Ok(Json(usage))
}

/// List usage rows between two days, inclusive.
#[utoipa::path(
    get,
    path = "/billing/usage",
    tag = "billing",
    params(
        ("start_day" = String, Query, description = "First day, YYYY-MM-DD"),
        ("end_day" = String, Query, description = "Last day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Usage rows", body = Vec<Usage>),
        (status = 400, description = "Invalid range")
    )
)]
pub async fn list_usage(
    Extension(db): Extension<Database>,
    actor: WorkspaceActor,
    Query(range): Query<DayRange>,
) -> Result<Json<Vec<Usage>>, AppError> {
    let usage = billing::list_usage(&db, &actor, range).await?;
    Ok(Json(usage))
}

/// Total invocations and overage between two days, inclusive.
#[utoipa::path(
    get,
    path = "/billing/usage/summary",
    tag = "billing",
    params(
        ("start_day" = String, Query, description = "First day, YYYY-MM-DD"),
        ("end_day" = String, Query, description = "Last day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Usage summary", body = UsageSummary)
    )
)]
pub async fn usage_summary(
    Extension(db): Extension<Database>,
    actor: WorkspaceActor,
    Query(range): Query<DayRange>,
) -> Result<Json<UsageSummary>, AppError> {
    let usage = billing::list_usage(&db, &actor, range).await?;
    Ok(Json(billing::summarize(&usage)))
}

/// Get the workspace's Stripe record.
#[utoipa::path(
    get,
    path = "/billing/stripe",
    tag = "billing",
    responses(
        (status = 200, description = "Stripe record", body = StripeInfo),
        (status = 404, description = "Workspace has no Stripe record")
    )
)]
pub async fn get_stripe(
    Extension(db): Extension<Database>,
    actor: WorkspaceActor,
) -> Result<Json<StripeInfo>, AppError> {
    billing::get_stripe(&db, &actor)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Record the workspace's subscription.
#[utoipa::path(
    put,
    path = "/billing/stripe/subscription",
    tag = "billing",
    request_body = SetSubscription,
    responses(
        (status = 204, description = "Subscription recorded"),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn set_subscription(
    Extension(db): Extension<Database>,
    actor: WorkspaceActor,
    Json(input): Json<SetSubscription>,
) -> Result<StatusCode, AppError> {
    billing::set_subscription(&db, &actor, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record the workspace's Stripe customer.
#[utoipa::path(
    put,
    path = "/billing/stripe/customer",
    tag = "billing",
    request_body = SetCustomer,
    responses(
        (status = 204, description = "Customer recorded"),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn set_customer(
    Extension(db): Extension<Database>,
    actor: WorkspaceActor,
    Json(input): Json<SetCustomer>,
) -> Result<StatusCode, AppError> {
    billing::set_customer_id(&db, &actor, &input.customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Find the Stripe record of a customer.
#[utoipa::path(
    get,
    path = "/billing/stripe/customers/{customer_id}",
    tag = "billing",
    params(
        ("customer_id" = String, Path, description = "Stripe customer id")
    ),
    responses(
        (status = 200, description = "Stripe record", body = StripeInfo),
        (status = 404, description = "Unknown customer")
    )
)]
pub async fn get_stripe_by_customer(
    Extension(db): Extension<Database>,
    Path(customer_id): Path<String>,
) -> Result<Json<StripeInfo>, AppError> {
    billing::from_customer_id(&db, &customer_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Clear a cancelled subscription.
#[utoipa::path(
    delete,
    path = "/billing/stripe/subscriptions/{subscription_id}",
    tag = "billing",
    params(
        ("subscription_id" = String, Path, description = "Stripe subscription id")
    ),
    responses(
        (status = 204, description = "Subscription cleared")
    )
)]
pub async fn remove_subscription(
    Extension(db): Extension<Database>,
    Path(subscription_id): Path<String>,
) -> Result<StatusCode, AppError> {
    billing::remove_subscription(&db, &subscription_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
