use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, Path, Query, rejection::FormRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;

use triad_core::ArtistId;
use triad_fyyur::choices::form_choices;
use triad_fyyur::view::{ArtistPage, artist_search_results};
use triad_fyyur::{ArtistDraft, ShowFilter};
use triad_infra::StoreError;

use super::flash::{form_fields, redirect_with_flash};
use crate::app::dto::{FlashQuery, NamedRef, WithFlash};
use crate::app::errors::{ApiError, parse_id};
use crate::app::services::AppServices;

type FormBody = Result<Form<Vec<(String, String)>>, FormRejection>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_artists))
        .route("/search", post(search_artists))
        .route("/create", get(create_artist_form).post(create_artist))
        .route("/:id", get(show_artist))
        .route("/:id/edit", get(edit_artist_form).post(edit_artist))
}

pub async fn list_artists(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let artists = services.fyyur.artists().await?;
    Ok(Json(artists.iter().map(NamedRef::from).collect::<Vec<_>>()))
}

pub async fn search_artists(
    Extension(services): Extension<Arc<AppServices>>,
    form: FormBody,
) -> Result<impl IntoResponse, ApiError> {
    let form = form_fields(form);
    let term = form.get("search_term").unwrap_or_default().to_string();
    let artists = services.fyyur.search_artists(&term).await?;
    let shows = services.fyyur.shows(ShowFilter::default()).await?;
    Ok(Json(json!({
        "search_term": term,
        "results": artist_search_results(&artists, &shows, Utc::now()),
    })))
}

pub async fn show_artist(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<FlashQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ArtistId = parse_id(&id)?;
    let artist = services.fyyur.artist(id).await?.ok_or(ApiError::NotFound)?;
    let shows = services.fyyur.shows(ShowFilter::artist(id)).await?;
    Ok(Json(WithFlash {
        flash: query.flash,
        page: ArtistPage::new(artist, &shows, Utc::now()),
    }))
}

pub async fn create_artist_form() -> impl IntoResponse {
    Json(form_choices())
}

pub async fn create_artist(
    Extension(services): Extension<Arc<AppServices>>,
    form: FormBody,
) -> Result<Response, ApiError> {
    let form = form_fields(form);
    let name = form.name().to_string();
    let failed = || redirect_with_flash("/", &format!("Artist {name} could not be listed!"));

    let draft = match ArtistDraft::from_form(&form) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(cause = %e, "artist not listed");
            return Ok(failed());
        }
    };

    match services.fyyur.insert_artist(draft).await {
        Ok(artist) => {
            tracing::info!(artist_id = %artist.id, "artist listed");
            Ok(redirect_with_flash(
                "/",
                &format!("Artist {} was successfully listed!", artist.name),
            ))
        }
        Err(e @ (StoreError::Unavailable(_) | StoreError::Backend(_))) => Err(e.into()),
        Err(e) => {
            tracing::warn!(cause = %e, "artist not listed");
            Ok(failed())
        }
    }
}

pub async fn edit_artist_form(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ArtistId = parse_id(&id)?;
    let artist = services.fyyur.artist(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "artist": artist, "choices": form_choices() })))
}

pub async fn edit_artist(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    form: FormBody,
) -> Result<Response, ApiError> {
    let id: ArtistId = parse_id(&id)?;
    let form = form_fields(form);
    let name = form.name().to_string();
    let target = format!("/artists/{id}");
    let failed = || {
        redirect_with_flash(
            &target,
            &format!("Information for Artist {name} could not be edited!"),
        )
    };

    let draft = match ArtistDraft::from_form(&form) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(cause = %e, artist_id = %id, "artist edit rejected");
            return Ok(failed());
        }
    };

    match services.fyyur.update_artist(id, draft).await {
        Ok(artist) => Ok(redirect_with_flash(
            &target,
            &format!("Information for Artist {} was successfully edited!", artist.name),
        )),
        Err(StoreError::NotFound) => Err(ApiError::NotFound),
        Err(e @ (StoreError::Conflict(_) | StoreError::Reference(_))) => {
            tracing::warn!(cause = %e, artist_id = %id, "artist edit rejected");
            Ok(failed())
        }
        Err(e) => Err(e.into()),
    }
}
