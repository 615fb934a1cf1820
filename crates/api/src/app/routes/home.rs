use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::app::dto::FlashQuery;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<FlashQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let latest_venue = services.fyyur.latest_venue().await?;
    Ok(Json(json!({
        "flash": query.flash,
        "latest_venue": latest_venue,
    })))
}
