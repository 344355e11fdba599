//! Database seeding utilities.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::SeedConfig;
use crate::fixtures::{AdminAccount, ApiKey, AppCredential, Fixtures, RoleGrant, SetupSetting};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Quotes a SQL identifier, doubling any embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a SQL string literal. DDL cannot take bind parameters, so role
/// passwords go through this instead.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Builds the `CREATE USER` statement for the application credential.
fn create_user_statement(credential: &AppCredential) -> String {
    format!(
        "CREATE USER {} WITH PASSWORD {}",
        quote_ident(&credential.user),
        quote_literal(&credential.password)
    )
}

/// Expands one role grant into its statement set, scoped to `database`.
///
/// ReadWrite covers tables that already exist plus, via default privileges,
/// tables the admin role creates afterwards; the seeder grants before it
/// creates the fixture tables, matching the provisioning order.
fn grant_statements(grant: RoleGrant, database: &str, user: &str) -> Vec<String> {
    let user = quote_ident(user);
    match grant {
        RoleGrant::ReadWrite => vec![
            format!(
                "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {user}"
            ),
            format!(
                "ALTER DEFAULT PRIVILEGES IN SCHEMA public \
                 GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {user}"
            ),
        ],
        RoleGrant::Admin => vec![format!(
            "GRANT CREATE ON DATABASE {} TO {user}",
            quote_ident(database)
        )],
    }
}

/// Database seeder for the controller test environment.
///
/// Runs once against a fresh database. There is no rollback, no idempotency
/// check, and no retry: any failure propagates and aborts the run.
pub struct Seeder {
    pool: PgPool,
    config: SeedConfig,
}

impl Seeder {
    /// Creates a new seeder over an admin-capable connection pool.
    pub fn new(pool: PgPool, config: SeedConfig) -> Self {
        Self { pool, config }
    }

    /// Performs the full provisioning sequence in its required order:
    /// application credential, fixture tables, then the fixture rows.
    pub async fn run(&self, fixtures: &Fixtures) -> Result<(), SeedError> {
        info!("Seeding database {}", self.config.database);

        self.create_app_user(&fixtures.credential).await?;
        self.create_tables().await?;
        self.seed_settings(&fixtures.settings).await?;
        self.seed_admins(&fixtures.admins).await?;
        self.seed_api_keys(&fixtures.api_keys).await?;

        info!("Seeding complete");
        Ok(())
    }

    /// Creates the application login role with its grants.
    ///
    /// Fails if the role already exists; a rerun against a seeded database is
    /// expected to abort here.
    pub async fn create_app_user(&self, credential: &AppCredential) -> Result<(), SeedError> {
        info!("Creating application user {}...", credential.user);

        sqlx::query(&create_user_statement(credential))
            .execute(&self.pool)
            .await?;

        for grant in &credential.grants {
            for statement in grant_statements(*grant, &self.config.database, &credential.user) {
                sqlx::query(&statement).execute(&self.pool).await?;
            }
        }

        info!(
            "Created application user {} with {} grants",
            credential.user,
            credential.grants.len()
        );
        Ok(())
    }

    /// Creates the fixture tables.
    ///
    /// Columns only, no keys or constraints: the records are flat documents
    /// and nothing enforces uniqueness or references between them.
    pub async fn create_tables(&self) -> Result<(), SeedError> {
        sqlx::query("CREATE TABLE IF NOT EXISTS setting (key TEXT, value BOOLEAN)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS admin \
             (name TEXT, x_shadow TEXT, email TEXT, last_site_name TEXT)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS apikey \
             (name TEXT, key TEXT, site_id TEXT, permissions TEXT[])",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Seeds setting rows.
    pub async fn seed_settings(&self, settings: &[SetupSetting]) -> Result<(), SeedError> {
        info!("Seeding {} settings...", settings.len());

        for setting in settings {
            sqlx::query("INSERT INTO setting (key, value) VALUES ($1, $2)")
                .bind(&setting.key)
                .bind(setting.value)
                .execute(&self.pool)
                .await?;
        }

        info!("Seeded {} settings", settings.len());
        Ok(())
    }

    /// Seeds admin account rows.
    pub async fn seed_admins(&self, admins: &[AdminAccount]) -> Result<(), SeedError> {
        info!("Seeding {} admin accounts...", admins.len());

        for admin in admins {
            sqlx::query(
                "INSERT INTO admin (name, x_shadow, email, last_site_name) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&admin.name)
            .bind(&admin.x_shadow)
            .bind(&admin.email)
            .bind(&admin.last_site_name)
            .execute(&self.pool)
            .await?;
        }

        info!("Seeded {} admin accounts", admins.len());
        Ok(())
    }

    /// Seeds API key rows.
    pub async fn seed_api_keys(&self, api_keys: &[ApiKey]) -> Result<(), SeedError> {
        info!("Seeding {} API keys...", api_keys.len());

        for api_key in api_keys {
            sqlx::query(
                "INSERT INTO apikey (name, key, site_id, permissions) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&api_key.name)
            .bind(&api_key.key)
            .bind(&api_key.site_id)
            .bind(&api_key.permissions)
            .execute(&self.pool)
            .await?;
        }

        info!("Seeded {} API keys", api_keys.len());
        Ok(())
    }

    /// Clears all seeded fixture rows.
    ///
    /// Leaves the tables and the application role in place; only useful for
    /// local reruns where the duplicate-role failure is avoided by hand.
    pub async fn clear_all(&self) -> Result<(), SeedError> {
        info!("Clearing all seeded data...");

        sqlx::query("DELETE FROM apikey").execute(&self.pool).await?;
        sqlx::query("DELETE FROM admin").execute(&self.pool).await?;
        sqlx::query("DELETE FROM setting")
            .execute(&self.pool)
            .await?;

        info!("All data cleared");
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("unifi"), "\"unifi\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_quote_literal_doubles_embedded_quotes() {
        assert_eq!(quote_literal("unifi"), "'unifi'");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_create_user_statement() {
        let statement = create_user_statement(&AppCredential::default());

        assert_eq!(statement, "CREATE USER \"unifi\" WITH PASSWORD 'unifi'");
    }

    #[test]
    fn test_configured_credential_reaches_create_user_statement() {
        let config = SeedConfig {
            app_user: "custom_app".to_string(),
            app_password: "s3cret".to_string(),
            ..SeedConfig::default()
        };

        let fixtures = Fixtures::for_config(&config);
        let statement = create_user_statement(&fixtures.credential);

        assert_eq!(
            statement,
            "CREATE USER \"custom_app\" WITH PASSWORD 's3cret'"
        );
    }

    #[test]
    fn test_read_write_grant_covers_existing_and_future_tables() {
        let statements = grant_statements(RoleGrant::ReadWrite, "unifi", "unifi");

        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("ON ALL TABLES IN SCHEMA public"));
        assert!(statements[1].starts_with("ALTER DEFAULT PRIVILEGES"));
        assert!(statements.iter().all(|s| s.ends_with("TO \"unifi\"")));
    }

    #[test]
    fn test_admin_grant_is_scoped_to_target_database() {
        let statements = grant_statements(RoleGrant::Admin, "unifi", "unifi");

        assert_eq!(
            statements,
            vec!["GRANT CREATE ON DATABASE \"unifi\" TO \"unifi\"".to_string()]
        );
    }
}
