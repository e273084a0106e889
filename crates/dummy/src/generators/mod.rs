//! Entity builders for dummy workspace data.
//!
//! Each builder takes a props struct with defaulted fields plus the instant of
//! the current generation pass, and returns a tagged [`DummyData`]:
//! - [`workspace`]: the tenant, optionally with a subscription
//! - [`user`]: members, seen and deleted states
//! - [`account`]: AWS account bindings in every sync state
//! - [`app`] and [`stage`]: apps and their deployment environments
//!
//! Usage rows have no builder; see [`GeneratedUsage`].

pub mod account;
pub mod app;
pub mod usage;
pub mod user;
pub mod workspace;

use serde::{Deserialize, Serialize};

pub use account::{AccountProps, GeneratedAccount, account};
pub use app::{AppProps, DEFAULT_REGION, GeneratedApp, GeneratedStage, StageProps, app, stage};
pub use usage::GeneratedUsage;
pub use user::{GeneratedUser, UserProps, user};
pub use workspace::{GeneratedWorkspace, WorkspaceProps, workspace};

/// A generated entity tagged with its kind.
///
/// Serializes with a `_type` discriminant, the shape the console front end
/// consumes in dummy mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum DummyData {
    #[serde(rename = "workspace")]
    Workspace(GeneratedWorkspace),
    #[serde(rename = "user")]
    User(GeneratedUser),
    #[serde(rename = "awsAccount")]
    Account(GeneratedAccount),
    #[serde(rename = "app")]
    App(GeneratedApp),
    #[serde(rename = "stage")]
    Stage(GeneratedStage),
    #[serde(rename = "usage")]
    Usage(GeneratedUsage),
}

impl DummyData {
    /// Returns the discriminant as serialized.
    pub fn kind(&self) -> &'static str {
        match self {
            DummyData::Workspace(_) => "workspace",
            DummyData::User(_) => "user",
            DummyData::Account(_) => "awsAccount",
            DummyData::App(_) => "app",
            DummyData::Stage(_) => "stage",
            DummyData::Usage(_) => "usage",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            DummyData::Workspace(w) => &w.id,
            DummyData::User(u) => &u.id,
            DummyData::Account(a) => &a.id,
            DummyData::App(a) => &a.id,
            DummyData::Stage(s) => &s.id,
            DummyData::Usage(u) => &u.id,
        }
    }
}

impl From<GeneratedWorkspace> for DummyData {
    fn from(value: GeneratedWorkspace) -> Self {
        DummyData::Workspace(value)
    }
}

impl From<GeneratedUser> for DummyData {
    fn from(value: GeneratedUser) -> Self {
        DummyData::User(value)
    }
}

impl From<GeneratedAccount> for DummyData {
    fn from(value: GeneratedAccount) -> Self {
        DummyData::Account(value)
    }
}

impl From<GeneratedApp> for DummyData {
    fn from(value: GeneratedApp) -> Self {
        DummyData::App(value)
    }
}

impl From<GeneratedStage> for DummyData {
    fn from(value: GeneratedStage) -> Self {
        DummyData::Stage(value)
    }
}

impl From<GeneratedUsage> for DummyData {
    fn from(value: GeneratedUsage) -> Self {
        DummyData::Usage(value)
    }
}
