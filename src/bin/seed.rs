//! One-shot seed script for the controller test database.
//!
//! Run with:
//! ```
//! cargo run --bin seed
//! ```

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;
use unifi_seed::config::SeedConfig;
use unifi_seed::db::Seeder;
use unifi_seed::fixtures::Fixtures;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    let fixtures = Fixtures::for_config(&config);
    let seeder = Seeder::new(pool, config);
    seeder.run(&fixtures).await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Application user: {}", fixtures.credential.user);
    tracing::info!("  Settings: {}", fixtures.settings.len());
    tracing::info!("  Admin accounts: {}", fixtures.admins.len());
    tracing::info!("  API keys: {}", fixtures.api_keys.len());

    Ok(())
}
