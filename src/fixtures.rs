//! Fixture records inserted by the seeder.
//!
//! These are the literal documents the controller's integration tests expect
//! to find: a setup-complete marker, a default admin account, and a static
//! API key. Defaults carry the exact values; nothing is generated at runtime.

use crate::config::SeedConfig;

/// Precomputed salted hash for the default admin password (`password123`).
///
/// Treated as an opaque literal: the scheme and salt derivation are the
/// controller's concern, not ours, and the value is only meaningful inside
/// the disposable test environment.
const ADMIN_SHADOW: &str =
    "$6$967AE4B000000000$8ED992C00000000008ED992C000000000967AE4B0000000067EC5CD0:1577279704";

/// A single controller setting row.
#[derive(Debug, Clone)]
pub struct SetupSetting {
    pub key: String,
    pub value: bool,
}

impl Default for SetupSetting {
    fn default() -> Self {
        Self {
            key: "is_setup".to_string(),
            value: true,
        }
    }
}

/// A controller admin account with a precomputed password hash.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub name: String,
    pub x_shadow: String,
    pub email: String,
    pub last_site_name: String,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            name: "admin".to_string(),
            x_shadow: ADMIN_SHADOW.to_string(),
            email: "admin@local.host".to_string(),
            last_site_name: "default".to_string(),
        }
    }
}

/// An API key record for bearer-token test authentication.
///
/// `site_id` is a plain string reference; no foreign key backs it.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub name: String,
    pub key: String,
    pub site_id: String,
    pub permissions: Vec<String>,
}

impl Default for ApiKey {
    fn default() -> Self {
        Self {
            name: "terraform-test".to_string(),
            key: "tf-test-token-12345".to_string(),
            site_id: "default".to_string(),
            // "all" is the controller's wildcard scope.
            permissions: vec!["all".to_string()],
        }
    }
}

/// Role grants available to the application credential, each scoped to the
/// target database only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGrant {
    /// DML on every table in the target database.
    ReadWrite,
    /// Database-level administrative rights (object creation).
    Admin,
}

/// The login credential the application connects with.
#[derive(Debug, Clone)]
pub struct AppCredential {
    pub user: String,
    pub password: String,
    pub grants: Vec<RoleGrant>,
}

impl Default for AppCredential {
    fn default() -> Self {
        Self {
            user: "unifi".to_string(),
            password: "unifi".to_string(),
            grants: vec![RoleGrant::ReadWrite, RoleGrant::Admin],
        }
    }
}

/// Everything one seeding run writes, bundled so the binary and tests pass a
/// single value around.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub credential: AppCredential,
    pub settings: Vec<SetupSetting>,
    pub admins: Vec<AdminAccount>,
    pub api_keys: Vec<ApiKey>,
}

impl Fixtures {
    /// The stock test-environment fixture set: one of each record.
    pub fn standard() -> Self {
        Self {
            credential: AppCredential::default(),
            settings: vec![SetupSetting::default()],
            admins: vec![AdminAccount::default()],
            api_keys: vec![ApiKey::default()],
        }
    }

    /// The stock fixture set with the application credential taken from the
    /// configuration, so `SEED_APP_USER`/`SEED_APP_PASSWORD` overrides reach
    /// the role the seeder creates.
    pub fn for_config(config: &SeedConfig) -> Self {
        let mut fixtures = Self::standard();
        fixtures.credential.user = config.app_user.clone();
        fixtures.credential.password = config.app_password.clone();
        fixtures
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_setting_marks_setup_complete() {
        let setting = SetupSetting::default();

        assert_eq!(setting.key, "is_setup");
        assert!(setting.value);
    }

    #[test]
    fn test_admin_account_literals() {
        let admin = AdminAccount::default();

        assert_eq!(admin.name, "admin");
        assert_eq!(admin.email, "admin@local.host");
        assert_eq!(admin.last_site_name, "default");
        // The hash is a fixed literal, never derived at runtime.
        assert!(admin.x_shadow.starts_with("$6$"));
        assert!(admin.x_shadow.ends_with(":1577279704"));
    }

    #[test]
    fn test_api_key_has_wildcard_scope() {
        let api_key = ApiKey::default();

        assert_eq!(api_key.key, "tf-test-token-12345");
        assert_eq!(api_key.site_id, "default");
        assert_eq!(api_key.permissions, vec!["all".to_string()]);
    }

    #[test]
    fn test_credential_grants_both_roles() {
        let credential = AppCredential::default();

        assert_eq!(credential.user, "unifi");
        assert!(credential.grants.contains(&RoleGrant::ReadWrite));
        assert!(credential.grants.contains(&RoleGrant::Admin));
        assert_eq!(credential.grants.len(), 2);
    }

    #[test]
    fn test_for_config_overrides_credential() {
        let config = SeedConfig {
            app_user: "custom_app".to_string(),
            app_password: "s3cret".to_string(),
            ..SeedConfig::default()
        };

        let fixtures = Fixtures::for_config(&config);

        assert_eq!(fixtures.credential.user, "custom_app");
        assert_eq!(fixtures.credential.password, "s3cret");
        // Grants and the record fixtures stay stock.
        assert_eq!(fixtures.credential.grants.len(), 2);
        assert_eq!(fixtures.settings.len(), 1);
    }

    #[test]
    fn test_standard_fixtures_have_one_of_each() {
        let fixtures = Fixtures::standard();

        assert_eq!(fixtures.settings.len(), 1);
        assert_eq!(fixtures.admins.len(), 1);
        assert_eq!(fixtures.api_keys.len(), 1);
    }
}
