use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use services::AppServices;
use words_core::model::{Word, WordDraft, WordId, WordPatch};

use super::ApiError;

#[derive(Debug, Serialize)]
pub struct Deleted {
    success: bool,
    deleted: Word,
}

pub async fn list(State(app): State<AppServices>) -> Result<Json<Vec<Word>>, ApiError> {
    Ok(Json(app.words().list_words().await?))
}

pub async fn fetch(
    State(app): State<AppServices>,
    Path(id): Path<WordId>,
) -> Result<Json<Word>, ApiError> {
    app.words()
        .get_word(id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

pub async fn create(
    State(app): State<AppServices>,
    Json(draft): Json<WordDraft>,
) -> Result<(StatusCode, Json<Word>), ApiError> {
    let word = app.words().create_word(draft).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

pub async fn update(
    State(app): State<AppServices>,
    Path(id): Path<WordId>,
    Json(patch): Json<WordPatch>,
) -> Result<Json<Word>, ApiError> {
    let word = app.words().update_word(id, patch).await?;
    app.game().lock().await.apply_word_update(&word);
    Ok(Json(word))
}

pub async fn remove(
    State(app): State<AppServices>,
    Path(id): Path<WordId>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = app.words().delete_word(id).await?;
    app.game().lock().await.remove_word(id);
    Ok(Json(Deleted {
        success: true,
        deleted,
    }))
}
