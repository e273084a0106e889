//! AWS account binding generation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::DummyData;

/// Generated AWS account binding ready for seeding.
///
/// `time_discovered` is absent while the account is still syncing;
/// `time_failed` marks an account whose last sync failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAccount {
    pub id: String,
    #[serde(rename = "accountID")]
    pub account_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_failed: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_discovered: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountProps<'a> {
    pub id: &'a str,
    /// Twelve digit AWS account number.
    pub account_id: &'a str,
    pub failed: bool,
    pub syncing: bool,
}

impl GeneratedAccount {
    pub fn new(props: AccountProps<'_>, now: OffsetDateTime) -> Self {
        Self {
            id: props.id.to_string(),
            account_id: props.account_id.to_string(),
            time_created: now,
            time_updated: now,
            time_deleted: None,
            time_failed: props.failed.then_some(now),
            time_discovered: (!props.syncing).then_some(now),
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.time_discovered.is_none()
    }

    pub fn is_failed(&self) -> bool {
        self.time_failed.is_some()
    }
}

pub fn account(props: AccountProps<'_>, now: OffsetDateTime) -> DummyData {
    GeneratedAccount::new(props, now).into()
}
