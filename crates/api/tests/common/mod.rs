#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;

use triad_api::app::{self, services::AppServices};
use triad_auth::Hs256JwtValidator;
use triad_infra::AppKind;

pub const JWT_SECRET: &str = "test-secret";

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Every app mounted over fresh in-memory stores.
    pub async fn spawn() -> Self {
        Self::spawn_apps(&AppKind::ALL).await
    }

    pub async fn spawn_apps(apps: &[AppKind]) -> Self {
        Self::spawn_with_services(AppServices::in_memory(), apps).await
    }

    pub async fn spawn_with_services(services: AppServices, apps: &[AppKind]) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let services = Arc::new(services);
        let jwt = Arc::new(Hs256JwtValidator::new(JWT_SECRET.as_bytes().to_vec()));
        let router = app::build_app(services, jwt, apps);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// HS256 token carrying `permissions`, valid for ten minutes.
pub fn mint_jwt(permissions: Option<&[&str]>, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let mut claims = json!({
        "sub": "auth0|barista",
        "iat": now,
        "exp": now + exp_offset_secs,
    });
    if let Some(permissions) = permissions {
        claims["permissions"] = json!(permissions);
    }

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

pub fn token(permissions: &[&str]) -> String {
    mint_jwt(Some(permissions), 600)
}
