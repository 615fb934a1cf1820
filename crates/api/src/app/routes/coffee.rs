use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde_json::json;

use triad_auth::JwtClaims;
use triad_auth::permissions::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};
use triad_coffee::{Drink, DrinkPatch, NewDrink, ShortDrink};
use triad_core::DrinkId;
use triad_infra::StoreError;

use crate::app::errors::{ApiError, parse_id};
use crate::app::services::AppServices;
use crate::middleware::{AuthState, require_permission};

/// Drink catalog routes. Everything except `GET /drinks` needs a scope.
pub fn router(auth: AuthState) -> Router {
    Router::new()
        .route(
            "/drinks",
            get(list_drinks).merge(
                post(create_drink)
                    .route_layer(from_fn_with_state(auth.require(POST_DRINKS), require_permission)),
            ),
        )
        .route(
            "/drinks-detail",
            get(list_drinks_detail)
                .route_layer(from_fn_with_state(auth.require(GET_DRINKS_DETAIL), require_permission)),
        )
        .route(
            "/drinks/:id",
            patch(update_drink)
                .route_layer(from_fn_with_state(auth.require(PATCH_DRINKS), require_permission))
                .merge(
                    delete(delete_drink)
                        .route_layer(from_fn_with_state(auth.require(DELETE_DRINKS), require_permission)),
                ),
        )
}

pub async fn list_drinks(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let drinks: Vec<ShortDrink> = services.coffee.drinks().await?.iter().map(Drink::short).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

pub async fn list_drinks_detail(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let drinks = services.coffee.drinks().await?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

pub async fn create_drink(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<JwtClaims>,
    body: Result<Json<NewDrink>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(cause = %e, "bad drink body");
        ApiError::Unprocessable
    })?;
    let drink = body.validate()?;
    let created = services
        .coffee
        .insert_drink(drink)
        .await
        .map_err(|e| ApiError::from_store(e, ApiError::Unprocessable))?;
    tracing::info!(drink_id = %created.id, sub = %claims.sub, "drink created");
    Ok(Json(json!({ "success": true, "drinks": [created.long()] })))
}

pub async fn update_drink(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
    body: Result<Json<DrinkPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: DrinkId = parse_id(&id)?;
    let Json(body) = body.map_err(|e| {
        tracing::warn!(cause = %e, "bad drink patch");
        ApiError::BadRequest
    })?;
    let patch = body.validate().map_err(|e| {
        tracing::warn!(cause = %e, "invalid drink patch");
        ApiError::BadRequest
    })?;
    let updated = services
        .coffee
        .update_drink(id, patch)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::from_store(other, ApiError::Unprocessable),
        })?;
    tracing::info!(drink_id = %id, sub = %claims.sub, "drink updated");
    Ok(Json(json!({ "success": true, "drinks": [updated.long()] })))
}

pub async fn delete_drink(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<JwtClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: DrinkId = parse_id(&id)?;
    services
        .coffee
        .delete_drink(id)
        .await
        .map_err(|e| ApiError::from_store(e, ApiError::NotFound))?;
    tracing::info!(drink_id = %id, sub = %claims.sub, "drink deleted");
    Ok(Json(json!({ "success": true, "delete": id })))
}
