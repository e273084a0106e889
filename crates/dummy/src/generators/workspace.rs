//! Workspace generation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::DummyData;

/// Subscription id stamped onto workspaces with an active subscription.
pub const SUBSCRIPTION_ID: &str = "sub_123";
/// Subscription item id stamped onto workspaces with an active subscription.
pub const SUBSCRIPTION_ITEM_ID: &str = "si_123";

/// Generated workspace ready for seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWorkspace {
    pub id: String,
    pub slug: String,
    #[serde(with = "time::serde::rfc3339")]
    pub time_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub time_updated: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
    #[serde(rename = "stripeCustomerID")]
    pub stripe_customer_id: Option<String>,
    #[serde(rename = "stripeSubscriptionID")]
    pub stripe_subscription_id: Option<String>,
    #[serde(rename = "stripeSubscriptionItemID")]
    pub stripe_subscription_item_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceProps<'a> {
    pub id: &'a str,
    pub active_subscription: bool,
}

impl GeneratedWorkspace {
    pub fn new(props: WorkspaceProps<'_>, now: OffsetDateTime) -> Self {
        let subscription = |value: &str| props.active_subscription.then(|| value.to_string());

        Self {
            id: props.id.to_string(),
            slug: props.id.to_string(),
            time_created: now,
            time_updated: now,
            time_deleted: None,
            stripe_customer_id: None,
            stripe_subscription_id: subscription(SUBSCRIPTION_ID),
            stripe_subscription_item_id: subscription(SUBSCRIPTION_ITEM_ID),
        }
    }

    pub fn has_subscription(&self) -> bool {
        self.stripe_subscription_id.is_some()
    }
}

/// Builds a workspace whose slug mirrors its id.
pub fn workspace(props: WorkspaceProps<'_>, now: OffsetDateTime) -> DummyData {
    GeneratedWorkspace::new(props, now).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_inactive_workspace_has_no_subscription() {
        let now = datetime!(2024-03-01 12:00 UTC);
        let ws = GeneratedWorkspace::new(
            WorkspaceProps {
                id: "dummy-workspace",
                active_subscription: false,
            },
            now,
        );

        assert_eq!(ws.slug, "dummy-workspace");
        assert!(!ws.has_subscription());
        assert!(ws.stripe_subscription_item_id.is_none());
        assert!(ws.stripe_customer_id.is_none());
        assert!(ws.time_deleted.is_none());
        assert_eq!(ws.time_created, now);
        assert_eq!(ws.time_updated, now);
    }

    #[test]
    fn test_active_workspace_has_subscription() {
        let ws = GeneratedWorkspace::new(
            WorkspaceProps {
                id: "dummy-workspace",
                active_subscription: true,
            },
            datetime!(2024-03-01 12:00 UTC),
        );

        assert_eq!(ws.stripe_subscription_id.as_deref(), Some(SUBSCRIPTION_ID));
        assert_eq!(
            ws.stripe_subscription_item_id.as_deref(),
            Some(SUBSCRIPTION_ITEM_ID)
        );
        assert!(ws.stripe_customer_id.is_none());
    }
}
