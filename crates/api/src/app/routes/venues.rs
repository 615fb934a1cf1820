use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, Path, Query, rejection::FormRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;

use triad_core::VenueId;
use triad_fyyur::choices::form_choices;
use triad_fyyur::view::{VenuePage, group_by_area, venue_search_results};
use triad_fyyur::{ShowFilter, VenueDraft};
use triad_infra::StoreError;

use super::flash::{form_fields, redirect_with_flash};
use crate::app::dto::{FlashQuery, WithFlash};
use crate::app::errors::{ApiError, parse_id};
use crate::app::services::AppServices;

type FormBody = Result<Form<Vec<(String, String)>>, FormRejection>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_venues))
        .route("/search", post(search_venues))
        .route("/create", get(create_venue_form).post(create_venue))
        .route("/:id", get(show_venue).delete(delete_venue))
        .route("/:id/edit", get(edit_venue_form).post(edit_venue))
        .route("/:id/delete", get(delete_venue))
}

pub async fn list_venues(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let venues = services.fyyur.venues().await?;
    let shows = services.fyyur.shows(ShowFilter::default()).await?;
    Ok(Json(group_by_area(&venues, &shows, Utc::now())))
}

pub async fn search_venues(
    Extension(services): Extension<Arc<AppServices>>,
    form: FormBody,
) -> Result<impl IntoResponse, ApiError> {
    let form = form_fields(form);
    let term = form.get("search_term").unwrap_or_default().to_string();
    let venues = services.fyyur.search_venues(&term).await?;
    let shows = services.fyyur.shows(ShowFilter::default()).await?;
    Ok(Json(json!({
        "search_term": term,
        "results": venue_search_results(&venues, &shows, Utc::now()),
    })))
}

pub async fn show_venue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<FlashQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id: VenueId = parse_id(&id)?;
    let venue = services.fyyur.venue(id).await?.ok_or(ApiError::NotFound)?;
    let shows = services.fyyur.shows(ShowFilter::venue(id)).await?;
    Ok(Json(WithFlash {
        flash: query.flash,
        page: VenuePage::new(venue, &shows, Utc::now()),
    }))
}

pub async fn create_venue_form() -> impl IntoResponse {
    Json(form_choices())
}

pub async fn create_venue(
    Extension(services): Extension<Arc<AppServices>>,
    form: FormBody,
) -> Result<Response, ApiError> {
    let form = form_fields(form);
    let name = form.name().to_string();
    let failed = || redirect_with_flash("/", &format!("Venue {name} could not be listed!"));

    let draft = match VenueDraft::from_form(&form) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(cause = %e, "venue not listed");
            return Ok(failed());
        }
    };

    match services.fyyur.insert_venue(draft).await {
        Ok(venue) => {
            tracing::info!(venue_id = %venue.id, "venue listed");
            Ok(redirect_with_flash(
                "/",
                &format!("Venue {} was successfully listed!", venue.name),
            ))
        }
        Err(e @ (StoreError::Unavailable(_) | StoreError::Backend(_))) => Err(e.into()),
        Err(e) => {
            tracing::warn!(cause = %e, "venue not listed");
            Ok(failed())
        }
    }
}

pub async fn edit_venue_form(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: VenueId = parse_id(&id)?;
    let venue = services.fyyur.venue(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "venue": venue, "choices": form_choices() })))
}

pub async fn edit_venue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    form: FormBody,
) -> Result<Response, ApiError> {
    let id: VenueId = parse_id(&id)?;
    let form = form_fields(form);
    let name = form.name().to_string();
    let target = format!("/venues/{id}");

    let result = match VenueDraft::from_form(&form) {
        Ok(draft) => services.fyyur.update_venue(id, draft).await,
        Err(e) => {
            tracing::warn!(cause = %e, venue_id = %id, "venue edit rejected");
            return Ok(redirect_with_flash(
                &target,
                &format!("Information for Venue {name} could not be edited!"),
            ));
        }
    };

    match result {
        Ok(venue) => Ok(redirect_with_flash(
            &target,
            &format!("Information for Venue {} was successfully edited!", venue.name),
        )),
        Err(StoreError::NotFound) => Err(ApiError::NotFound),
        Err(e @ (StoreError::Conflict(_) | StoreError::Reference(_))) => {
            tracing::warn!(cause = %e, venue_id = %id, "venue edit rejected");
            Ok(redirect_with_flash(
                &target,
                &format!("Information for Venue {name} could not be edited!"),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Serves both `DELETE /venues/{id}` and `GET /venues/{id}/delete`.
pub async fn delete_venue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: VenueId = parse_id(&id)?;
    match services.fyyur.delete_venue(id).await {
        Ok(()) => {
            tracing::info!(venue_id = %id, "venue deleted");
            Ok(redirect_with_flash("/", &format!("Venue {id} was deleted!")))
        }
        Err(e @ (StoreError::Unavailable(_) | StoreError::Backend(_))) => Err(e.into()),
        Err(e) => {
            tracing::warn!(cause = %e, venue_id = %id, "venue not deleted");
            Ok(redirect_with_flash("/", &format!("Venue {id} could not be deleted!")))
        }
    }
}
