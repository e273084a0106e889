//! Database integration for seeding dummy data.
//!
//! The [`Seeder`] loads a generated sequence into the console tables,
//! replacing whatever an earlier seed left behind for the same workspace.

mod seeder;

pub use seeder::{SeedError, Seeder};
