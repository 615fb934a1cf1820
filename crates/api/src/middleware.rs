use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use triad_auth::{AuthError, JwtClaims, JwtValidator, Permission, bearer_token, check_permission};

use crate::app::errors::{ApiError, auth_error_response};

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

impl AuthState {
    /// Guard state requiring `permission`.
    pub fn require(&self, permission: Permission) -> PermissionGuard {
        PermissionGuard {
            jwt: self.jwt.clone(),
            required: permission,
        }
    }
}

#[derive(Clone)]
pub struct PermissionGuard {
    jwt: Arc<dyn JwtValidator>,
    required: Permission,
}

/// Reject the request with a structured 401 unless it carries a valid
/// bearer token granting the guarded permission. Verified claims are made
/// available to handlers as `Extension<JwtClaims>`.
pub async fn require_permission(State(guard): State<PermissionGuard>, mut req: Request, next: Next) -> Response {
    match authorize(&guard, req.headers()) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                reason = %err,
                required = guard.required.as_str(),
                path = %req.uri().path(),
                "request not authorized"
            );
            auth_error_response(&err)
        }
    }
}

fn authorize(guard: &PermissionGuard, headers: &HeaderMap) -> Result<JwtClaims, AuthError> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()?;
    let token = bearer_token(raw)?;
    let claims = guard.jwt.validate(token)?;
    check_permission(&claims, &guard.required)?;
    Ok(claims)
}

/// One log line per request: method, path, status and latency.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), latency_ms, "request handled");
    }
    response
}

/// Wrap body-less framework responses (unmatched method, extractor
/// rejections without a JSON body) in the error envelope.
pub async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }
    match ApiError::from_status(status) {
        Some(err) => err.into_response(),
        None => response,
    }
}
