//! Composition of a complete dummy workspace.
//!
//! [`generate`] turns a configuration string into an ordered, lazy sequence
//! of [`DummyData`]. The order is part of the contract: stages always follow
//! the apps and accounts they reference, so a consumer can load the
//! sequence front to back without resolving references.
//!
//! ```rust,ignore
//! use dummy::prelude::*;
//!
//! for entity in generate("overview:full;usage:overage", SystemClock) {
//!     println!("{} {}", entity.kind(), entity.id());
//! }
//! ```

use std::iter;

use time::OffsetDateTime;
use time::macros::date;

use crate::clock::Clock;
use crate::config::DummyConfig;
use crate::generators::{
    AccountProps, AppProps, DummyData, GeneratedUsage, StageProps, UserProps, WorkspaceProps,
    account, app, stage, user, workspace,
};

pub const WORKSPACE_ID: &str = "dummy-workspace";

const APP_ID: &str = "1";
const APP_ID_LONG: &str = "2";
const APP_LOCAL: &str = "dummy";
const STAGE_LOCAL: &str = "dummy";
const ACCOUNT_ID: &str = "connected";
const ACCOUNT_ID_LONG: &str = "long";
const ACCOUNT_ID_FAILED: &str = "failed";
const ACCOUNT_ID_SYNCING: &str = "syncing";
const STAGE_OVERAGE: &str = "stage-account-overage";

/// Extra users and stages generated for volume and pagination views.
pub const BULK_COUNT: usize = 30;

/// One contiguous run of entities in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Workspace { active_subscription: bool },
    FixedUsers,
    BulkUsers,
    OverviewBase,
    OverviewFull,
    UsageOverage,
}

impl Block {
    /// Produces this block's entities, all stamped with `now`.
    pub fn entities(self, now: OffsetDateTime) -> Box<dyn Iterator<Item = DummyData>> {
        match self {
            Block::Workspace {
                active_subscription,
            } => Box::new(iter::once(workspace(
                WorkspaceProps {
                    id: WORKSPACE_ID,
                    active_subscription,
                },
                now,
            ))),
            Block::FixedUsers => Box::new(fixed_users(now).into_iter()),
            Block::BulkUsers => Box::new((0..BULK_COUNT).map(move |i| {
                let email = format!("dummy{i}@example.com");
                user(
                    UserProps {
                        email: &email,
                        active: true,
                        ..Default::default()
                    },
                    now,
                )
            })),
            Block::OverviewBase => Box::new(overview_base(now).into_iter()),
            Block::OverviewFull => Box::new(
                overview_full(now)
                    .into_iter()
                    .chain((0..BULK_COUNT).map(move |i| {
                        let id = format!("stage-{i}");
                        stage(
                            StageProps {
                                id: &id,
                                app_id: APP_ID,
                                account_id: ACCOUNT_ID,
                                region: None,
                            },
                            now,
                        )
                    })),
            ),
            Block::UsageOverage => Box::new(usage_overage(now).into_iter()),
        }
    }
}

/// Decides which blocks a configuration enables, in sequence order.
pub fn plan(config: &DummyConfig) -> Vec<Block> {
    let mut blocks = vec![
        Block::Workspace {
            active_subscription: config.subscription_active(),
        },
        Block::FixedUsers,
    ];

    if config.overview_full() {
        blocks.push(Block::BulkUsers);
    }
    if config.overview() {
        blocks.push(Block::OverviewBase);
    }
    if config.overview_full() {
        blocks.push(Block::OverviewFull);
    }
    if config.usage_overage() {
        blocks.push(Block::UsageOverage);
    }

    blocks
}

/// Generates the dummy workspace described by `config`.
///
/// The clock is read once; every timestamp in the sequence carries that
/// instant. Blocks are built only as the caller pulls into them.
pub fn generate<C: Clock>(config: &str, clock: C) -> impl Iterator<Item = DummyData> + use<C> {
    let config = DummyConfig::parse(config);
    let now = clock.now();

    plan(&config)
        .into_iter()
        .flat_map(move |block| block.entities(now))
}

fn fixed_users(now: OffsetDateTime) -> [DummyData; 3] {
    [
        user(
            UserProps {
                id: Some("dummy"),
                email: "me@example.com",
                active: true,
                deleted: false,
            },
            now,
        ),
        user(
            UserProps {
                email: "invited-dummy@example.com",
                ..Default::default()
            },
            now,
        ),
        user(
            UserProps {
                email: "deleted-dummy@example.com",
                active: true,
                deleted: true,
                ..Default::default()
            },
            now,
        ),
    ]
}

fn overview_base(now: OffsetDateTime) -> [DummyData; 6] {
    [
        account(
            AccountProps {
                id: ACCOUNT_ID_LONG,
                account_id: "123456789012",
                ..Default::default()
            },
            now,
        ),
        app(
            AppProps {
                id: APP_LOCAL,
                name: None,
            },
            now,
        ),
        app(
            AppProps {
                id: APP_ID_LONG,
                name: Some("my-sst-app-that-has-a-really-long-name-that-should-be-truncated"),
            },
            now,
        ),
        stage(
            StageProps {
                id: STAGE_LOCAL,
                app_id: APP_LOCAL,
                account_id: ACCOUNT_ID_LONG,
                region: None,
            },
            now,
        ),
        stage(
            StageProps {
                id: "stage-long-id-1",
                app_id: APP_ID_LONG,
                account_id: ACCOUNT_ID_LONG,
                region: None,
            },
            now,
        ),
        stage(
            StageProps {
                id: "this-stage-name-is-really-long-and-needs-to-be-truncated",
                app_id: APP_ID_LONG,
                account_id: ACCOUNT_ID_LONG,
                region: Some("ap-southeast-1"),
            },
            now,
        ),
    ]
}

/// Every account state the overview renders, plus stages on the unhealthy ones.
/// The bulk stages on the connected account are appended by [`Block::entities`].
fn overview_full(now: OffsetDateTime) -> [DummyData; 9] {
    [
        app(
            AppProps {
                id: APP_ID,
                name: Some("my-sst-app"),
            },
            now,
        ),
        account(
            AccountProps {
                id: "syncing-empty",
                account_id: "123456789013",
                syncing: true,
                ..Default::default()
            },
            now,
        ),
        account(
            AccountProps {
                id: "failed-empty",
                account_id: "123456789014",
                failed: true,
                ..Default::default()
            },
            now,
        ),
        account(
            AccountProps {
                id: "empty",
                account_id: "123456789015",
                ..Default::default()
            },
            now,
        ),
        account(
            AccountProps {
                id: ACCOUNT_ID_FAILED,
                account_id: "123456789016",
                failed: true,
                ..Default::default()
            },
            now,
        ),
        stage(
            StageProps {
                id: "stage-account-failed",
                app_id: APP_ID,
                account_id: ACCOUNT_ID_FAILED,
                region: Some("ap-southeast-1"),
            },
            now,
        ),
        // Discovered: only `syncing: true` withholds the discovered timestamp.
        account(
            AccountProps {
                id: ACCOUNT_ID_SYNCING,
                account_id: "123456789017",
                syncing: false,
                ..Default::default()
            },
            now,
        ),
        stage(
            StageProps {
                id: "stage-account-syncing",
                app_id: APP_ID,
                account_id: ACCOUNT_ID_SYNCING,
                region: None,
            },
            now,
        ),
        account(
            AccountProps {
                id: ACCOUNT_ID,
                account_id: "123456789018",
                ..Default::default()
            },
            now,
        ),
    ]
}

/// Two days on a synthetic stage; the second day alone exceeds the free tier.
fn usage_overage(now: OffsetDateTime) -> [DummyData; 2] {
    let usage = |id: &str, day, invocations| {
        DummyData::Usage(GeneratedUsage {
            id: id.to_string(),
            stage_id: STAGE_OVERAGE.to_string(),
            day,
            invocations,
            time_created: now,
            time_updated: now,
            time_deleted: None,
        })
    };

    [
        usage("1", date!(2021 - 01 - 01), 100),
        usage("2", date!(2021 - 01 - 02), 1_230_000),
    ]
}

/// Per-kind counts of a generated or seeded sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DummySummary {
    pub workspaces: usize,
    pub users: usize,
    pub accounts: usize,
    pub apps: usize,
    pub stages: usize,
    pub usage: usize,
}

impl DummySummary {
    pub fn record(&mut self, entity: &DummyData) {
        match entity {
            DummyData::Workspace(_) => self.workspaces += 1,
            DummyData::User(_) => self.users += 1,
            DummyData::Account(_) => self.accounts += 1,
            DummyData::App(_) => self.apps += 1,
            DummyData::Stage(_) => self.stages += 1,
            DummyData::Usage(_) => self.usage += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.workspaces + self.users + self.accounts + self.apps + self.stages + self.usage
    }
}

impl<'a> FromIterator<&'a DummyData> for DummySummary {
    fn from_iter<I: IntoIterator<Item = &'a DummyData>>(iter: I) -> Self {
        let mut summary = Self::default();
        for entity in iter {
            summary.record(entity);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::clock::FixedClock;
    use crate::config::OVERVIEW_ALL;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-03-01 12:00 UTC);

    fn collect(config: &str) -> Vec<DummyData> {
        generate(config, FixedClock(NOW)).collect()
    }

    fn summary(data: &[DummyData]) -> DummySummary {
        data.iter().collect()
    }

    fn kinds(data: &[DummyData]) -> Vec<&'static str> {
        data.iter().map(DummyData::kind).collect()
    }

    #[test]
    fn test_prefix_is_workspace_then_fixed_users() {
        for config in ["", "overview:base", OVERVIEW_ALL, "usage:overage", "junk"] {
            let data = collect(config);
            assert!(matches!(&data[0], DummyData::Workspace(w) if w.id == WORKSPACE_ID));

            let emails: Vec<&str> = data[1..4]
                .iter()
                .map(|d| match d {
                    DummyData::User(u) => u.email.as_str(),
                    other => panic!("expected user, got {}", other.kind()),
                })
                .collect();
            assert_eq!(
                emails,
                [
                    "me@example.com",
                    "invited-dummy@example.com",
                    "deleted-dummy@example.com"
                ]
            );
        }
    }

    #[test]
    fn test_fixed_user_states() {
        let data = collect("");
        let users: Vec<_> = data
            .iter()
            .filter_map(|d| match d {
                DummyData::User(u) => Some(u),
                _ => None,
            })
            .collect();

        assert_eq!(users[0].id, "dummy");
        assert_eq!(users[0].time_seen, Some(NOW));
        assert!(users[0].time_deleted.is_none());

        assert_eq!(users[1].id, "invited-dummy@example.com");
        assert!(users[1].time_seen.is_none());

        assert_eq!(users[2].time_seen, Some(NOW));
        assert_eq!(users[2].time_deleted, Some(NOW));
    }

    #[test]
    fn test_empty_config() {
        let data = collect("");
        assert_eq!(data.len(), 4);
        assert_eq!(kinds(&data), ["workspace", "user", "user", "user"]);
    }

    #[test]
    fn test_malformed_config_matches_empty() {
        assert_eq!(collect("overview"), collect(""));
        assert_eq!(collect("overview;usage"), collect(""));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(collect("color:blue;usage:none"), collect(""));
    }

    #[test]
    fn test_overview_base() {
        let data = collect("overview:base");
        assert_eq!(
            kinds(&data),
            [
                "workspace",
                "user",
                "user",
                "user",
                "awsAccount",
                "app",
                "app",
                "stage",
                "stage",
                "stage",
            ]
        );

        let regions: Vec<&str> = data
            .iter()
            .filter_map(|d| match d {
                DummyData::Stage(s) => Some(s.region.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(regions, ["us-east-1", "us-east-1", "ap-southeast-1"]);
    }

    #[test]
    fn test_overview_full_counts() {
        for config in ["overview:full", "overview:all"] {
            let data = collect(config);
            let summary = summary(&data);

            assert_eq!(summary.workspaces, 1);
            assert_eq!(summary.users, 3 + BULK_COUNT);
            assert_eq!(summary.apps, 3);
            // `long` from the base block plus six account states.
            assert_eq!(summary.accounts, 7);
            assert_eq!(summary.stages, 35);
            assert_eq!(summary.usage, 0);
            assert_eq!(summary.total(), data.len());
        }
    }

    #[test]
    fn test_bulk_users_follow_fixed_users() {
        let data = collect("overview:full");
        for (i, entity) in data[4..4 + BULK_COUNT].iter().enumerate() {
            match entity {
                DummyData::User(u) => {
                    assert_eq!(u.email, format!("dummy{i}@example.com"));
                    assert_eq!(u.id, u.email);
                    assert!(u.time_seen.is_some());
                }
                other => panic!("expected user, got {}", other.kind()),
            }
        }
        assert_eq!(data[4 + BULK_COUNT].kind(), "awsAccount");
    }

    #[test]
    fn test_usage_overage_without_overview() {
        let data = collect("usage:overage");
        assert_eq!(data.len(), 6);

        let usage: Vec<_> = data[4..]
            .iter()
            .map(|d| match d {
                DummyData::Usage(u) => u,
                other => panic!("expected usage, got {}", other.kind()),
            })
            .collect();

        assert_eq!(usage[0].invocations, 100);
        assert_eq!(usage[1].invocations, 1_230_000);
        assert_eq!(usage[0].day, date!(2021 - 01 - 01));
        assert_eq!(usage[1].day, date!(2021 - 01 - 02));
        assert!(usage.iter().all(|u| u.stage_id == STAGE_OVERAGE));

        let summary = summary(&data);
        assert_eq!(summary.accounts + summary.apps + summary.stages, 0);
    }

    #[test]
    fn test_usage_is_last() {
        let data = collect(OVERVIEW_ALL);
        let last_two = &data[data.len() - 2..];
        assert!(last_two.iter().all(|d| d.kind() == "usage"));
        assert_eq!(summary(&data).usage, 2);
    }

    #[test]
    fn test_subscription_flag() {
        let active = collect("subscription:active");
        let inactive = collect("subscription:cancelled");

        match (&active[0], &inactive[0]) {
            (DummyData::Workspace(a), DummyData::Workspace(i)) => {
                assert!(a.has_subscription());
                assert!(!i.has_subscription());
            }
            _ => panic!("workspace must come first"),
        }
    }

    #[test]
    fn test_stages_reference_earlier_apps_and_accounts() {
        let mut apps = HashSet::new();
        let mut accounts = HashSet::new();

        for entity in collect(OVERVIEW_ALL) {
            match entity {
                DummyData::App(a) => {
                    apps.insert(a.id);
                }
                DummyData::Account(a) => {
                    accounts.insert(a.id);
                }
                DummyData::Stage(s) => {
                    assert!(apps.contains(&s.app_id), "{} before app {}", s.id, s.app_id);
                    assert!(
                        accounts.contains(&s.account_id),
                        "{} before account {}",
                        s.id,
                        s.account_id
                    );
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_account_states_in_full_block() {
        let data = collect("overview:full");
        let accounts: Vec<_> = data
            .iter()
            .filter_map(|d| match d {
                DummyData::Account(a) => Some(a),
                _ => None,
            })
            .collect();

        let by_id = |id: &str| {
            accounts
                .iter()
                .find(|a| a.id == id)
                .unwrap_or_else(|| panic!("missing account {id}"))
        };

        assert!(by_id("syncing-empty").is_syncing());
        assert!(by_id("failed-empty").is_failed());
        assert!(by_id("failed-empty").time_discovered.is_some());
        assert!(!by_id("empty").is_syncing());
        assert!(by_id("failed").is_failed());
        assert!(!by_id("syncing").is_syncing());
        assert!(!by_id("connected").is_failed());

        let ids: HashSet<&str> = accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), accounts.len());
        assert_eq!(
            accounts.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            [
                "long",
                "syncing-empty",
                "failed-empty",
                "empty",
                "failed",
                "syncing",
                "connected"
            ]
        );
    }

    #[test]
    fn test_every_timestamp_uses_the_same_instant() {
        for entity in collect(OVERVIEW_ALL) {
            let value = serde_json::to_value(&entity).unwrap();
            assert_eq!(value["timeCreated"], "2024-03-01T12:00:00Z");
            assert_eq!(value["timeUpdated"], "2024-03-01T12:00:00Z");
            assert!(value["timeDeleted"].is_null() || entity.kind() == "user");
        }
    }

    #[test]
    fn test_deterministic_for_fixed_clock() {
        assert_eq!(collect(OVERVIEW_ALL), collect(OVERVIEW_ALL));
    }

    #[test]
    fn test_clock_read_once() {
        struct CountingClock(AtomicUsize);

        impl Clock for CountingClock {
            fn now(&self) -> OffsetDateTime {
                self.0.fetch_add(1, Ordering::SeqCst);
                NOW
            }
        }

        let clock = CountingClock(AtomicUsize::new(0));
        let count = generate(OVERVIEW_ALL, &clock).count();
        assert!(count > 4);
        assert_eq!(clock.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_partial_consumption() {
        let first: Vec<_> = generate(OVERVIEW_ALL, FixedClock(NOW)).take(2).collect();
        assert_eq!(kinds(&first), ["workspace", "user"]);
    }

    #[test]
    fn test_plan_order() {
        let config = DummyConfig::parse(OVERVIEW_ALL);
        assert_eq!(
            plan(&config),
            [
                Block::Workspace {
                    active_subscription: true
                },
                Block::FixedUsers,
                Block::BulkUsers,
                Block::OverviewBase,
                Block::OverviewFull,
                Block::UsageOverage,
            ]
        );
    }
}
