//! HTTP request handlers for the console API.
//!
//! This module re-exports handlers from focused submodules organized by domain.

pub mod billing;
pub mod health;
pub mod slack;

// Re-export handlers from submodules (including utoipa __path types for OpenAPI)
pub use billing::{
    __path_create_usage, __path_get_stripe, __path_get_stripe_by_customer, __path_list_usage,
    __path_remove_subscription, __path_set_customer, __path_set_subscription,
    __path_usage_summary, create_usage, get_stripe, get_stripe_by_customer, list_usage,
    remove_subscription, set_customer, set_subscription, usage_summary,
};
pub use health::{__path_health_check, health_check};
pub use slack::{__path_connect, __path_send, connect, send};
