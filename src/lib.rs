//! Database seeding for the UniFi controller integration-test environment.
//!
//! Provisions an application-level database credential and inserts the
//! fixture records the controller expects on first boot: a setup-complete
//! setting, a default admin account, and an API key for token-based test
//! authentication. Intended to run exactly once against a fresh database
//! before any other process connects.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use unifi_seed::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let fixtures = Fixtures::for_config(&config);
//! let seeder = Seeder::new(pool, config);
//! seeder.run(&fixtures).await?;
//! ```

pub mod config;
pub mod db;
pub mod fixtures;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::fixtures::{
        AdminAccount, ApiKey, AppCredential, Fixtures, RoleGrant, SetupSetting,
    };
}
