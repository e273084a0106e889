use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;

time::serde::format_description!(pub day_format, Date, "[year]-[month]-[day]");

/// Daily invocation count for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Usage {
    pub id: String,
    pub workspace_id: String,
    pub stage_id: String,
    #[serde(with = "day_format")]
    #[schema(value_type = String, format = Date)]
    pub day: Date,
    pub invocations: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
}

impl Usage {
    pub fn new(workspace_id: String, stage_id: String, day: Date, invocations: i64) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            workspace_id,
            stage_id,
            day,
            invocations,
            time_created: now,
            time_updated: now,
            time_deleted: None,
        }
    }
}

/// Stripe identifiers recorded for a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StripeInfo {
    pub workspace_id: String,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_item_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
}

impl StripeInfo {
    pub fn has_subscription(&self) -> bool {
        self.subscription_id.is_some()
    }
}

/// Slack team connected to a workspace. The access token is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SlackTeam {
    pub id: String,
    pub workspace_id: String,
    pub team_id: String,
    pub team_name: String,
    #[serde(skip_serializing)]
    pub access_token: String,
}
