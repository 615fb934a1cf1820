//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage wiring (in-memory or PostgreSQL)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the `{success: false, ...}` error envelope

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use triad_auth::{Hs256JwtValidator, JwtValidator};
use triad_infra::{AppKind, JwtConfig};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the token validator described by the JWT settings.
pub fn jwt_validator(config: &JwtConfig) -> Arc<dyn JwtValidator> {
    let mut validator = Hs256JwtValidator::new(config.secret.clone().into_bytes());
    if let Some(audience) = &config.audience {
        validator = validator.with_audience(audience.clone());
    }
    if let Some(issuer) = &config.issuer {
        validator = validator.with_issuer(issuer.clone());
    }
    Arc::new(validator)
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). Only the listed applications are mounted.
pub fn build_app(services: Arc<AppServices>, jwt: Arc<dyn JwtValidator>, apps: &[AppKind]) -> Router {
    let auth_state = middleware::AuthState { jwt };

    let mut router = Router::new().route("/health", get(routes::system::health));
    for app in AppKind::ALL.iter().filter(|a| apps.contains(a)) {
        router = match app {
            AppKind::Trivia => router.merge(routes::trivia::router()),
            AppKind::Coffee => router.merge(routes::coffee::router(auth_state.clone())),
            AppKind::Fyyur => router
                .merge(routes::home::router())
                .nest("/venues", routes::venues::router())
                .nest("/artists", routes::artists::router())
                .nest("/shows", routes::shows::router()),
        };
    }

    router
        .fallback(routes::system::not_found)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(axum::middleware::map_response(middleware::envelope_bare_errors)),
        )
}
