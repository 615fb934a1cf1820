use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, rejection::FormRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use triad_fyyur::show::ShowListing;
use triad_fyyur::{ShowDraft, ShowFilter};
use triad_infra::StoreError;

use super::flash::{form_fields, redirect_with_flash};
use crate::app::dto::NamedRef;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_shows))
        .route("/create", get(create_show_form).post(create_show))
}

pub async fn list_shows(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let shows = services.fyyur.shows(ShowFilter::default()).await?;
    Ok(Json(shows.iter().map(ShowListing::from).collect::<Vec<_>>()))
}

/// The artists and venues a show can be booked between.
pub async fn create_show_form(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let artists = services.fyyur.artists().await?;
    let venues = services.fyyur.venues().await?;
    Ok(Json(json!({
        "artists": artists.iter().map(NamedRef::from).collect::<Vec<_>>(),
        "venues": venues.iter().map(NamedRef::from).collect::<Vec<_>>(),
    })))
}

pub async fn create_show(
    Extension(services): Extension<Arc<AppServices>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, ApiError> {
    let form = form_fields(form);

    let draft = match ShowDraft::from_form(&form) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(cause = %e, "show not listed");
            return Ok(redirect_with_flash("/", "Show could not be listed!"));
        }
    };

    match services.fyyur.insert_show(draft).await {
        Ok(show) => {
            tracing::info!(venue_id = %show.venue_id, artist_id = %show.artist_id, "show listed");
            Ok(redirect_with_flash("/", "Show was successfully listed!"))
        }
        Err(e @ (StoreError::Unavailable(_) | StoreError::Backend(_))) => Err(e.into()),
        Err(e) => {
            tracing::warn!(cause = %e, "show not listed");
            Ok(redirect_with_flash("/", "Show could not be listed!"))
        }
    }
}
