//! User generation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::DummyData;

/// Generated workspace member ready for seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUser {
    pub id: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_seen: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserProps<'a> {
    /// Falls back to `email` when absent.
    pub id: Option<&'a str>,
    pub email: &'a str,
    /// Has signed in at least once.
    pub active: bool,
    pub deleted: bool,
}

impl GeneratedUser {
    pub fn new(props: UserProps<'_>, now: OffsetDateTime) -> Self {
        Self {
            id: props.id.unwrap_or(props.email).to_string(),
            email: props.email.to_string(),
            time_created: now,
            time_updated: now,
            time_seen: props.active.then_some(now),
            time_deleted: props.deleted.then_some(now),
        }
    }

    /// Invited users have never been seen.
    pub fn is_invited(&self) -> bool {
        self.time_seen.is_none()
    }
}

pub fn user(props: UserProps<'_>, now: OffsetDateTime) -> DummyData {
    GeneratedUser::new(props, now).into()
}
