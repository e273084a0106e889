//! Slack integration: connecting a team and posting alerts.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};
use utoipa::ToSchema;
use validator::Validate;

use crate::{actor::WorkspaceActor, database::Database, errors::AppError};

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Attachment color for alert messages.
pub const ALERT_COLOR: &str = "#ff0000";

/// Team a token belongs to, as reported by `team.info`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
}

/// Slack Web API calls used by the console.
#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn team_info(&self, token: &str) -> Result<TeamInfo, AppError>;

    async fn post_message(&self, token: &str, payload: &Value) -> Result<(), AppError>;
}

/// Envelope shared by every Slack Web API response.
#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
    team: Option<TeamInfo>,
}

impl SlackResponse {
    fn into_result(self) -> Result<Self, AppError> {
        if self.ok {
            Ok(self)
        } else {
            Err(AppError::Slack(
                self.error.unwrap_or_else(|| "unknown_error".to_string()),
            ))
        }
    }
}

/// HTTP client for the Slack Web API.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    base_url: String,
}

impl SlackClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

impl Default for SlackClient {
    fn default() -> Self {
        Self::new(DEFAULT_SLACK_API_URL)
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn team_info(&self, token: &str) -> Result<TeamInfo, AppError> {
        let response: SlackResponse = self
            .client
            .get(self.url("team.info"))
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;

        response
            .into_result()?
            .team
            .ok_or_else(|| AppError::Slack("team.info returned no team".to_string()))
    }

    async fn post_message(&self, token: &str, payload: &Value) -> Result<(), AppError> {
        let response: SlackResponse = self
            .client
            .post(self.url("chat.postMessage"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()?;
        Ok(())
    }
}

/// Slack connection request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ConnectRequest {
    pub token: String,
}

/// Alert message request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendRequest {
    #[validate(length(min = 1, message = "channel must not be empty"))]
    pub channel: String,
    /// Slack block kit blocks, passed through untouched.
    #[schema(value_type = Vec<Object>)]
    pub blocks: Vec<Value>,
    #[validate(length(min = 1, message = "team_id must not be empty"))]
    pub team_id: String,
}

/// Outcome of a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct SendResult {
    /// False when the workspace has no connection to the requested team.
    pub delivered: bool,
}

/// Builds a `chat.postMessage` body carrying `blocks` in one colored attachment.
pub fn message_payload(channel: &str, blocks: &[Value]) -> Value {
    json!({
        "channel": channel,
        "attachments": [
            {
                "color": ALERT_COLOR,
                "blocks": blocks,
            }
        ],
    })
}

/// Connects the workspace to the Slack team owning `token`.
///
/// Reconnecting the same team replaces the stored token and team name.
pub async fn connect(
    db: &Database,
    slack: &dyn SlackApi,
    actor: &WorkspaceActor,
    token: &str,
) -> Result<TeamInfo, AppError> {
    if token.is_empty() {
        return Err(AppError::InvalidInput("token must not be empty".to_string()));
    }

    let team = slack.team_info(token).await?;
    db.upsert_slack_team(actor.workspace_id(), &team.id, &team.name, token)
        .await?;

    info!("Connected Slack team {} ({})", team.name, team.id);
    Ok(team)
}

/// Posts an alert to a channel of a connected team.
///
/// A team the workspace never connected is skipped silently.
pub async fn send(
    db: &Database,
    slack: &dyn SlackApi,
    actor: &WorkspaceActor,
    input: SendRequest,
) -> Result<SendResult, AppError> {
    input.validate()?;

    let Some(team) = db
        .get_slack_team(actor.workspace_id(), &input.team_id)
        .await?
    else {
        debug!("No Slack team {} for workspace", input.team_id);
        return Ok(SendResult { delivered: false });
    };

    let payload = message_payload(&input.channel, &input.blocks);
    slack.post_message(&team.access_token, &payload).await?;

    Ok(SendResult { delivered: true })
}
