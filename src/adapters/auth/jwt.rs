//! HS256 bearer-token validator.
//!
//! Tokens are signed with a shared secret by the identity service. The user id
//! comes from `sub`, falling back to a `userId` claim for tokens minted by
//! older issuers.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

#[derive(Clone)]
pub struct JwtConfig {
    secret: Secret<String>,
    pub issuer: Option<String>,
    pub leeway: Duration,
}

impl JwtConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            issuer: None,
            leeway: Duration::from_secs(30),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway.as_secs();
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
            issuer: config.issuer,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let subject = claims.sub.or(claims.user_id).ok_or_else(|| {
            tracing::warn!("Token carries neither sub nor userId");
            AuthError::InvalidToken
        })?;
        let user_id = UserId::new(&subject).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", subject);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email.unwrap_or_default(),
            claims.name,
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-signing-secret";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(Secret::new(SECRET.to_string())))
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sign(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn accepts_sub_claim() {
        let token = sign(
            json!({ "sub": "traveller-1", "email": "t@example.com", "exp": now() + 600 }),
            SECRET,
        );
        let user = validator().validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "traveller-1");
        assert_eq!(user.email, "t@example.com");
    }

    #[tokio::test]
    async fn falls_back_to_user_id_claim() {
        let token = sign(json!({ "userId": "legacy-7", "exp": now() + 600 }), SECRET);
        let user = validator().validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "legacy-7");
        assert_eq!(user.email, "");
    }

    #[tokio::test]
    async fn wrong_signature_is_invalid() {
        let token = sign(json!({ "sub": "traveller-1", "exp": now() + 600 }), "other-secret");
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let token = sign(json!({ "sub": "traveller-1", "exp": now() - 3600 }), SECRET);
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn token_without_identity_is_invalid() {
        let token = sign(json!({ "email": "t@example.com", "exp": now() + 600 }), SECRET);
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn issuer_is_checked_when_configured() {
        let validator = JwtSessionValidator::new(
            JwtConfig::new(Secret::new(SECRET.to_string())).with_issuer("https://id.trips.test"),
        );
        let foreign = sign(
            json!({ "sub": "u", "iss": "https://elsewhere", "exp": now() + 600 }),
            SECRET,
        );
        let ours = sign(
            json!({ "sub": "u", "iss": "https://id.trips.test", "exp": now() + 600 }),
            SECRET,
        );
        assert!(validator.validate(&foreign).await.is_err());
        assert!(validator.validate(&ours).await.is_ok());
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert!(matches!(
            validator().validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
