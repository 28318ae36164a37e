//! Authentication configuration (HS256 bearer tokens)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify bearer tokens
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim, when tokens carry one
    #[serde(default)]
    pub issuer: Option<String>,

    /// Clock skew tolerated on `exp`/`nbf`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn leeway(&self) -> Duration {
        Duration::from_secs(self.leeway_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production requires a secret long enough for HS256.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            issuer: None,
            leeway_secs: default_leeway(),
        }
    }
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_secret_is_missing() {
        let config = AuthConfig::default();
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn short_secret_only_allowed_outside_production() {
        let config = with_secret("dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret)
        );
    }

    #[test]
    fn long_secret_passes_in_production() {
        let config = with_secret("0123456789abcdef0123456789abcdef");
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let config = with_secret("super-secret-value");
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }

    #[test]
    fn leeway_defaults_to_thirty_seconds() {
        assert_eq!(AuthConfig::default().leeway(), Duration::from_secs(30));
    }
}
