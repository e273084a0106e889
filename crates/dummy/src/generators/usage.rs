//! Usage rows.
//!
//! Usage is written as literal values by the overage block rather than
//! through a builder.

use console::models::{Usage, day_format};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Generated daily invocation count for a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUsage {
    pub id: String,
    #[serde(rename = "stageID")]
    pub stage_id: String,
    #[serde(with = "day_format")]
    pub day: Date,
    pub invocations: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
}

impl GeneratedUsage {
    /// Converts into a console usage row owned by `workspace_id`.
    pub fn into_row(self, workspace_id: &str) -> Usage {
        Usage {
            id: self.id,
            workspace_id: workspace_id.to_string(),
            stage_id: self.stage_id,
            day: self.day,
            invocations: self.invocations,
            time_created: self.time_created,
            time_updated: self.time_updated,
            time_deleted: self.time_deleted,
        }
    }
}
