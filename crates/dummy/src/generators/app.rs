//! App and stage generation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::DummyData;

/// Region used for stages that do not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Generated app ready for seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedApp {
    pub id: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppProps<'a> {
    pub id: &'a str,
    /// Falls back to `id` when absent.
    pub name: Option<&'a str>,
}

impl GeneratedApp {
    pub fn new(props: AppProps<'_>, now: OffsetDateTime) -> Self {
        Self {
            id: props.id.to_string(),
            name: props.name.unwrap_or(props.id).to_string(),
            time_created: now,
            time_updated: now,
            time_deleted: None,
        }
    }
}

pub fn app(props: AppProps<'_>, now: OffsetDateTime) -> DummyData {
    GeneratedApp::new(props, now).into()
}

/// Generated stage of an app, bound to an AWS account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStage {
    pub id: String,
    pub name: String,
    #[serde(rename = "appID")]
    pub app_id: String,
    #[serde(rename = "awsAccountID")]
    pub account_id: String,
    pub region: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StageProps<'a> {
    pub id: &'a str,
    pub app_id: &'a str,
    pub account_id: &'a str,
    /// Falls back to [`DEFAULT_REGION`] when absent.
    pub region: Option<&'a str>,
}

impl GeneratedStage {
    pub fn new(props: StageProps<'_>, now: OffsetDateTime) -> Self {
        Self {
            id: props.id.to_string(),
            name: props.id.to_string(),
            app_id: props.app_id.to_string(),
            account_id: props.account_id.to_string(),
            region: props.region.unwrap_or(DEFAULT_REGION).to_string(),
            time_created: now,
            time_updated: now,
            time_deleted: None,
        }
    }
}

pub fn stage(props: StageProps<'_>, now: OffsetDateTime) -> DummyData {
    GeneratedStage::new(props, now).into()
}
