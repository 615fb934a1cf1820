use serde::{Deserialize, Serialize};

/// Claims the coffee-shop API reads from a verified bearer token.
///
/// Shaped like an identity-provider access token: standard registered claims
/// plus a flat `permissions` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / principal identifier.
    pub sub: String,

    /// Expiration (seconds since the epoch).
    pub exp: i64,

    /// Issued-at (seconds since the epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Audience; a string or an array of strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Granted scopes. Absent (not merely empty) means the token was not
    /// issued with RBAC enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl JwtClaims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}
