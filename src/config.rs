//! Application configuration, read from the environment.

use std::path::PathBuf;

/// Environment variable for the HTTP port.
pub const PORT_ENV_VAR: &str = "PORT";
/// Environment variable for the file store directory.
pub const DATA_DIR_ENV_VAR: &str = "KINGKART_DATA_DIR";
/// Environment variable for the admin login email.
pub const ADMIN_EMAIL_ENV_VAR: &str = "KINGKART_ADMIN_EMAIL";
/// Environment variable for the admin login password.
pub const ADMIN_PASSWORD_ENV_VAR: &str = "KINGKART_ADMIN_PASSWORD";
/// Environment variable for the admin display name.
pub const ADMIN_NAME_ENV_VAR: &str = "KINGKART_ADMIN_NAME";
/// Environment variable for the measurement profile ownership key.
pub const MEASUREMENT_OWNER_ENV_VAR: &str = "KINGKART_MEASUREMENT_OWNER";

pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_MEASUREMENT_OWNER: &str = "mock-user-1";

/// The single admin identity accepted by the session store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    pub first_name: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: "admin@kingkart.com".to_string(),
            password: "Admin123!".to_string(),
            first_name: "Admin".to_string(),
        }
    }
}

impl AdminCredentials {
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub admin: AdminCredentials,
    pub measurement_owner: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            admin: AdminCredentials::default(),
            measurement_owner: DEFAULT_MEASUREMENT_OWNER.to_string(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from process environment variables.
    ///
    /// Unset variables fall back to defaults; an unparsable `PORT` is ignored
    /// with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = match lookup(PORT_ENV_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };
        Self {
            port,
            data_dir: lookup(DATA_DIR_ENV_VAR).map(PathBuf::from).unwrap_or(defaults.data_dir),
            admin: AdminCredentials {
                email: lookup(ADMIN_EMAIL_ENV_VAR).unwrap_or(defaults.admin.email),
                password: lookup(ADMIN_PASSWORD_ENV_VAR).unwrap_or(defaults.admin.password),
                first_name: lookup(ADMIN_NAME_ENV_VAR).unwrap_or(defaults.admin.first_name),
            },
            measurement_owner: lookup(MEASUREMENT_OWNER_ENV_VAR)
                .unwrap_or(defaults.measurement_owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert!(config.admin.matches("admin@kingkart.com", "Admin123!"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (PORT_ENV_VAR, "9000"),
            (DATA_DIR_ENV_VAR, "/tmp/kk"),
            (MEASUREMENT_OWNER_ENV_VAR, "user-7"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/kk"));
        assert_eq!(config.measurement_owner, "user-7");
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = AppConfig::from_lookup(|k| (k == PORT_ENV_VAR).then(|| "nope".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
