use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::{JsonRejection, QueryRejection}},
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use triad_core::{CategoryId, Page, QuestionId};
use triad_trivia::{NewQuestion, QuizRequest, categories_to_map, pick_quiz_question};

use crate::app::dto::{QuestionsQuery, SearchRequest};
use crate::app::errors::{ApiError, parse_id};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:id/questions", get(questions_by_category))
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/:id", delete(delete_question))
        .route("/quizzes", post(next_quiz_question))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = services.trivia.categories().await?;
    Ok(Json(json!({
        "success": true,
        "categories": categories_to_map(&categories),
        "total_categories": categories.len(),
    })))
}

pub async fn list_questions(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<QuestionsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| {
        tracing::warn!(cause = %e, "bad questions query");
        ApiError::BadRequest
    })?;

    // 0 (the default) lists every category.
    let category = query
        .category
        .filter(|id| *id != 0)
        .map(CategoryId::new);

    let questions = services.trivia.questions(category).await?;
    let page = Page::new(query.page.unwrap_or(1));
    let current = page.slice(&questions).ok_or(ApiError::NotFound)?;
    let categories = services.trivia.categories().await?;

    Ok(Json(json!({
        "success": true,
        "questions": current,
        "total_questions": questions.len(),
        "categories": categories_to_map(&categories),
        "current_category": category,
    })))
}

pub async fn delete_question(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: QuestionId = parse_id(&id)?;
    services
        .trivia
        .delete_question(id)
        .await
        .map_err(|e| ApiError::from_store(e, ApiError::Unprocessable))?;
    tracing::info!(question_id = %id, "question deleted");
    Ok(Json(json!({ "success": true, "deleted": id })))
}

pub async fn create_question(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(cause = %e, "bad question body");
        ApiError::Unprocessable
    })?;
    let question = body.validate()?;
    let created = services
        .trivia
        .insert_question(question)
        .await
        .map_err(|e| ApiError::from_store(e, ApiError::Unprocessable))?;
    tracing::info!(question_id = %created.id, category = %created.category, "question created");
    Ok(Json(json!({ "success": true, "created": created.id })))
}

pub async fn search_questions(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(cause = %e, "bad search body");
        ApiError::Unprocessable
    })?;
    let hits = services.trivia.search_questions(&body.search_term).await?;
    let current_category: Vec<CategoryId> = hits.iter().map(|q| q.category).collect();
    Ok(Json(json!({
        "success": true,
        "questions": hits,
        "total_questions": hits.len(),
        "current_category": current_category,
    })))
}

pub async fn questions_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: CategoryId = parse_id(&id)?;
    services
        .trivia
        .category(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let questions = services.trivia.questions(Some(id)).await?;
    Ok(Json(json!({
        "success": true,
        "questions": questions,
        "total_questions": questions.len(),
        "current_category": id,
    })))
}

pub async fn next_quiz_question(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(cause = %e, "bad quiz body");
        ApiError::Unprocessable
    })?;

    let category = body.quiz_category.category_id();
    if let Some(id) = category {
        if services.trivia.category(id).await?.is_none() {
            tracing::warn!(category = %id, "quiz requested for unknown category");
            return Err(ApiError::Unprocessable);
        }
    }

    let candidates = services.trivia.questions(category).await?;
    let question = pick_quiz_question(&candidates, &body.previous_questions, &mut rand::thread_rng());
    Ok(Json(json!({ "success": true, "question": question })))
}
