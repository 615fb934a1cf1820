//! `Authorization` header parsing.

use crate::AuthError;

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::HeaderMissing)?;
    let mut parts = header.split_whitespace();

    match parts.next() {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {}
        _ => return Err(AuthError::InvalidScheme),
    }

    let token = parts.next().ok_or(AuthError::TokenMissing)?;
    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_tokens() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(Some("bearer abc")), Ok("abc"));
    }

    #[test]
    fn rejects_each_malformed_shape() {
        assert_eq!(bearer_token(None), Err(AuthError::HeaderMissing));
        assert_eq!(bearer_token(Some("")), Err(AuthError::InvalidScheme));
        assert_eq!(bearer_token(Some("Basic dXNlcg==")), Err(AuthError::InvalidScheme));
        assert_eq!(bearer_token(Some("Bearer")), Err(AuthError::TokenMissing));
        assert_eq!(bearer_token(Some("Bearer a b")), Err(AuthError::MalformedHeader));
    }
}
