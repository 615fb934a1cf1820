use thiserror::Error;

use crate::{JwtClaims, Permission};

/// Authentication/authorization failure.
///
/// Every variant is reported to clients as HTTP 401 with [`AuthError::code`]
/// and the display text as the description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    HeaderMissing,

    #[error("Authorization header must start with \"Bearer\".")]
    InvalidScheme,

    #[error("Token not found.")]
    TokenMissing,

    #[error("Authorization header must be bearer token.")]
    MalformedHeader,

    #[error("Unable to parse authentication token.")]
    UnparsableToken,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Permissions not included in JWT.")]
    PermissionsMissing,

    #[error("Permission not found.")]
    PermissionDenied(Permission),
}

impl AuthError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "authorization_header_missing",
            Self::InvalidScheme | Self::TokenMissing | Self::MalformedHeader | Self::UnparsableToken => {
                "invalid_header"
            }
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims | Self::PermissionsMissing => "invalid_claims",
            Self::PermissionDenied(_) => "unauthorized",
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Check that verified claims grant `required`.
///
/// - No IO
/// - No panics
pub fn check_permission(claims: &JwtClaims, required: &Permission) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::PermissionsMissing);
    }

    if claims.has_permission(required.as_str()) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied(required.clone()))
    }
}
