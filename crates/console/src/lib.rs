pub mod actor;
pub mod billing;
pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod request_id;
pub mod slack;

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    database::Database,
    handlers::{
        connect, create_usage, get_stripe, get_stripe_by_customer, health_check, list_usage,
        remove_subscription, send, set_customer, set_subscription, usage_summary,
    },
    openapi::ApiDoc,
    request_id::request_id_middleware,
    slack::{SlackApi, SlackClient},
};

pub fn create_router(pool: PgPool, slack_api: Arc<dyn SlackApi>) -> Router {
    let db = Database::new(pool);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        // Usage routes
        .route("/billing/usage", get(list_usage).post(create_usage))
        .route("/billing/usage/summary", get(usage_summary))
        // Stripe routes
        .route("/billing/stripe", get(get_stripe))
        .route("/billing/stripe/subscription", put(set_subscription))
        .route("/billing/stripe/customer", put(set_customer))
        .route(
            "/billing/stripe/customers/{customer_id}",
            get(get_stripe_by_customer),
        )
        .route(
            "/billing/stripe/subscriptions/{subscription_id}",
            delete(remove_subscription),
        )
        // Slack routes
        .route("/slack/connect", post(connect))
        .route("/slack/send", post(send))
        .layer(Extension(db))
        .layer(Extension(slack_api))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

pub async fn run_server(pool: PgPool, config: Config) -> anyhow::Result<()> {
    let slack_api: Arc<dyn SlackApi> = Arc::new(SlackClient::new(config.slack_api_url));
    let app = create_router(pool, slack_api);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
