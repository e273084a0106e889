//! Slack integration handlers.

use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{
    actor::WorkspaceActor,
    database::Database,
    errors::AppError,
    slack::{self, ConnectRequest, SendRequest, SendResult, SlackApi},
};

/// Connect the workspace to a Slack team.
#[utoipa::path(
    post,
    path = "/slack/connect",
    tag = "slack",
    request_body = ConnectRequest,
    responses(
        (status = 200, description = "Team connected"),
        (status = 400, description = "Invalid input"),
        (status = 502, description = "Slack rejected the token")
    )
)]
pub async fn connect(
    Extension(db): Extension<Database>,
    Extension(slack_api): Extension<Arc<dyn SlackApi>>,
    actor: WorkspaceActor,
    Json(input): Json<ConnectRequest>,
) -> Result<Json<Value>, AppError> {
    let team = slack::connect(&db, slack_api.as_ref(), &actor, &input.token).await?;
    Ok(Json(json!({
        "team_id": team.id,
        "team_name": team.name,
    })))
}

/// Post an alert to a channel of a connected team.
#[utoipa::path(
    post,
    path = "/slack/send",
    tag = "slack",
    request_body = SendRequest,
    responses(
        (status = 200, description = "Message handled", body = SendResult),
        (status = 400, description = "Invalid input"),
        (status = 502, description = "Slack rejected the message")
    )
)]
pub async fn send(
    Extension(db): Extension<Database>,
    Extension(slack_api): Extension<Arc<dyn SlackApi>>,
    actor: WorkspaceActor,
    Json(input): Json<SendRequest>,
) -> Result<Json<SendResult>, AppError> {
    let result = slack::send(&db, slack_api.as_ref(), &actor, input).await?;
    Ok(Json(result))
}
