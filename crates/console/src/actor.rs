//! The workspace an operation acts on.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

/// Header carrying the calling workspace id.
pub const WORKSPACE_HEADER: &str = "x-console-workspace";

/// Workspace scope extracted from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceActor(pub String);

impl WorkspaceActor {
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self(workspace_id.into())
    }

    pub fn workspace_id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for WorkspaceActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let workspace_id = parts
            .headers
            .get(WORKSPACE_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(AppError::Unauthorized)?;

        tracing::Span::current().record("workspace_id", workspace_id);
        Ok(WorkspaceActor::new(workspace_id))
    }
}
