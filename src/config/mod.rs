//! Application configuration.
//!
//! Loaded from environment variables with the `ASSO_LEDGER` prefix, nested
//! values separated by `__`. A `.env` file is read first when present.
//!
//! ```no_run
//! use asso_ledger::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// - `ASSO_LEDGER__SERVER__PORT=8080` -> `server.port`
    /// - `ASSO_LEDGER__DATABASE__URL=...` -> `database.url`
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` if a required value is missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSO_LEDGER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "ASSO_LEDGER__DATABASE__URL",
        "ASSO_LEDGER__SERVER__PORT",
        "ASSO_LEDGER__SERVER__ENVIRONMENT",
        "ASSO_LEDGER__DATABASE__RUN_MIGRATIONS",
    ];

    fn set_minimal_env() {
        env::set_var("ASSO_LEDGER__DATABASE__URL", "postgresql://asso@localhost/asso");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ASSO_LEDGER__DATABASE__RUN_MIGRATIONS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://asso@localhost/asso");
        assert!(config.database.run_migrations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_section_is_optional() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn server_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ASSO_LEDGER__SERVER__PORT", "3000");
        env::set_var("ASSO_LEDGER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
    }

    #[test]
    fn missing_database_url_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(matches!(AppConfig::load(), Err(ConfigError::LoadError(_))));
    }
}
