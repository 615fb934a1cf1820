//! Token signature and registered-claim verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::{AuthError, JwtClaims};

/// Verifies a raw bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<JwtClaims, AuthError>;
}

/// HS256 validator over a shared secret.
///
/// Audience and issuer are only checked when configured; once configured, a
/// token without the claim is rejected like one with the wrong value.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(&secret),
            validation,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.validation.set_audience(&[audience.into()]);
        self.validation.validate_aud = true;
        self.validation.required_spec_claims.insert("aud".to_string());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.validation.set_issuer(&[issuer.into()]);
        self.validation.required_spec_claims.insert("iss".to_string());
        self
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::InvalidClaims,
                    ErrorKind::MissingRequiredClaim(claim) if claim == "aud" || claim == "iss" => {
                        AuthError::InvalidClaims
                    }
                    _ => AuthError::UnparsableToken,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn claims(exp_in: Duration) -> JwtClaims {
        let now = Utc::now();
        JwtClaims {
            sub: "barista|1".to_string(),
            exp: (now + exp_in).timestamp(),
            iat: Some(now.timestamp()),
            aud: Some(serde_json::json!("coffee")),
            iss: Some("https://issuer.test/".to_string()),
            permissions: Some(vec!["get:drinks-detail".to_string()]),
        }
    }

    fn mint(claims: &JwtClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to encode jwt")
    }

    #[test]
    fn valid_token_yields_claims() {
        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        let token = mint(&claims(Duration::minutes(10)), SECRET);
        let decoded = validator.validate(&token).unwrap();
        assert_eq!(decoded.sub, "barista|1");
        assert!(decoded.has_permission("get:drinks-detail"));
    }

    #[test]
    fn wrong_secret_is_unparsable() {
        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        let token = mint(&claims(Duration::minutes(10)), "other-secret");
        assert_eq!(validator.validate(&token), Err(AuthError::UnparsableToken));
        assert_eq!(validator.validate("not-a-jwt"), Err(AuthError::UnparsableToken));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let validator = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        let token = mint(&claims(-Duration::hours(1)), SECRET);
        assert_eq!(validator.validate(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn audience_and_issuer_are_checked_when_configured() {
        let token = mint(&claims(Duration::minutes(10)), SECRET);

        let ok = Hs256JwtValidator::new(SECRET.as_bytes().to_vec())
            .with_audience("coffee")
            .with_issuer("https://issuer.test/");
        assert!(ok.validate(&token).is_ok());

        let wrong_aud = Hs256JwtValidator::new(SECRET.as_bytes().to_vec()).with_audience("tea");
        assert_eq!(wrong_aud.validate(&token), Err(AuthError::InvalidClaims));

        let wrong_iss =
            Hs256JwtValidator::new(SECRET.as_bytes().to_vec()).with_issuer("https://elsewhere/");
        assert_eq!(wrong_iss.validate(&token), Err(AuthError::InvalidClaims));
    }

    #[test]
    fn configured_audience_or_issuer_rejects_tokens_without_them() {
        let mut bare = claims(Duration::minutes(10));
        bare.aud = None;
        bare.iss = None;
        let token = mint(&bare, SECRET);

        let unchecked = Hs256JwtValidator::new(SECRET.as_bytes().to_vec());
        assert!(unchecked.validate(&token).is_ok());

        let aud = Hs256JwtValidator::new(SECRET.as_bytes().to_vec()).with_audience("coffee");
        assert_eq!(aud.validate(&token), Err(AuthError::InvalidClaims));

        let iss =
            Hs256JwtValidator::new(SECRET.as_bytes().to_vec()).with_issuer("https://issuer.test/");
        assert_eq!(iss.validate(&token), Err(AuthError::InvalidClaims));
    }
}
