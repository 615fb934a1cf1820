use std::sync::Arc;

use anyhow::Context;

use triad_api::app::{self, services::AppServices};
use triad_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    triad_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let services = AppServices::from_config(&config)
        .await
        .context("failed to initialise storage")?;
    let jwt = app::jwt_validator(&config.jwt);
    let router = app::build_app(Arc::new(services), jwt, &config.apps);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        apps = ?config.apps.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
        "listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
