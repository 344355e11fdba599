//! Database integration for seeding fixture data.
//!
//! The [`Seeder`] performs the ordered provisioning sequence against the
//! target database: application credential first, then tables, then the
//! fixture rows.

mod seeder;

pub use seeder::{SeedError, Seeder};
