//! Dummy workspace data for the console.
//!
//! This crate generates a consistent demo workspace (users, AWS accounts,
//! apps, stages and usage) from a compact configuration string, and can
//! seed it into the console database.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dummy::prelude::*;
//!
//! let data = generate("overview:full;usage:overage", SystemClock);
//! let summary = Seeder::new(pool).seed(data).await?;
//! ```

pub mod clock;
pub mod config;
pub mod db;
pub mod generators;
pub mod sequence;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::{DummyConfig, EMPTY, OVERVIEW_ALL, OVERVIEW_BASE};
    pub use crate::db::{SeedError, Seeder};
    pub use crate::generators::{
        DummyData, GeneratedAccount, GeneratedApp, GeneratedStage, GeneratedUsage, GeneratedUser,
        GeneratedWorkspace,
    };
    pub use crate::sequence::{DummySummary, WORKSPACE_ID, generate};
}
