//! OpenAPI document for the console API.

use utoipa::OpenApi;

use crate::{
    billing::{CreateUsage, DayRange, SetCustomer, SetSubscription, UsageSummary},
    handlers,
    models::{StripeInfo, Usage},
    slack::{ConnectRequest, SendRequest, SendResult},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Console API"),
    paths(
        handlers::health_check,
        handlers::create_usage,
        handlers::list_usage,
        handlers::usage_summary,
        handlers::get_stripe,
        handlers::set_subscription,
        handlers::set_customer,
        handlers::get_stripe_by_customer,
        handlers::remove_subscription,
        handlers::connect,
        handlers::send,
    ),
    components(schemas(
        Usage,
        StripeInfo,
        CreateUsage,
        DayRange,
        UsageSummary,
        SetSubscription,
        SetCustomer,
        ConnectRequest,
        SendRequest,
        SendResult,
    )),
    tags(
        (name = "billing", description = "Usage and Stripe bookkeeping"),
        (name = "slack", description = "Slack alerts"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
