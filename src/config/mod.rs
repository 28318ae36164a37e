//! Application configuration module
//!
//! Configuration is read from environment variables with the `TRIP_PLANNER`
//! prefix; nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use trip_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod collaborators;
mod database;
mod error;
mod features;
mod server;

pub use auth::AuthConfig;
pub use collaborators::CollaboratorsConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Postgres connection; the in-memory store is used when no URL is set
    #[serde(default)]
    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    /// Exchange-rate and weather services
    #[serde(default)]
    pub collaborators: CollaboratorsConfig,

    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then maps `TRIP_PLANNER__SECTION__KEY`
    /// variables onto the typed sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIP_PLANNER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.collaborators.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TRIP_PLANNER__AUTH__JWT_SECRET",
        "TRIP_PLANNER__DATABASE__URL",
        "TRIP_PLANNER__SERVER__PORT",
        "TRIP_PLANNER__SERVER__ENVIRONMENT",
        "TRIP_PLANNER__SERVER__HOST",
        "TRIP_PLANNER__SERVER__CORS_ORIGINS",
        "TRIP_PLANNER__COLLABORATORS__DEFAULT_TARGET_CURRENCY",
        "TRIP_PLANNER__FEATURES__ENFORCE_ACTIVITY_TIME_ORDER",
    ];

    fn set_minimal_env() {
        env::set_var("TRIP_PLANNER__AUTH__JWT_SECRET", "local-development-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_minimal_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("minimal config loads");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.database.url().is_none());
        assert_eq!(config.collaborators.default_target_currency, "USD");
        assert!(!config.features.enforce_activity_time_order);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_jwt_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn nested_values_override_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        env::set_var("TRIP_PLANNER__SERVER__PORT", "3000");
        env::set_var("TRIP_PLANNER__DATABASE__URL", "postgresql://planner@localhost/trips");
        env::set_var("TRIP_PLANNER__COLLABORATORS__DEFAULT_TARGET_CURRENCY", "EUR");
        env::set_var("TRIP_PLANNER__FEATURES__ENFORCE_ACTIVITY_TIME_ORDER", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config loads");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.database.url(),
            Some("postgresql://planner@localhost/trips")
        );
        assert_eq!(config.collaborators.default_target().unwrap().as_str(), "EUR");
        assert!(config.features.activity_rules().enforce_time_order);
    }

    #[test]
    fn server_host_must_be_an_ip_address() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        env::set_var("TRIP_PLANNER__SERVER__HOST", "not a host");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn malformed_cors_origin_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        env::set_var("TRIP_PLANNER__SERVER__CORS_ORIGINS", "https://trips.example.com,localhost");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config loads");
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCorsOrigin("localhost".to_string()))
        );
    }

    #[test]
    fn production_rejects_short_secret() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        env::set_var("TRIP_PLANNER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config loads");
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WeakJwtSecret));
    }
}
