use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use services::{AppServices, Selection};
use words_core::model::WordId;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ByLearned {
    learned: bool,
}

#[derive(Debug, Deserialize)]
pub struct SampleSize {
    size: usize,
}

pub async fn show(State(app): State<AppServices>) -> Json<Selection> {
    Json(app.game().lock().await.selection().clone())
}

pub async fn select_all(State(app): State<AppServices>) -> Result<Json<Selection>, ApiError> {
    let words = app.words().list_words().await?;
    let game = app.game();
    let mut game = game.lock().await;
    game.selection_mut().select_all(&words);
    Ok(Json(game.selection().clone()))
}

pub async fn clear(State(app): State<AppServices>) -> Json<Selection> {
    let game = app.game();
    let mut game = game.lock().await;
    game.selection_mut().clear();
    Json(game.selection().clone())
}

pub async fn toggle(
    State(app): State<AppServices>,
    Path(id): Path<WordId>,
) -> Result<Json<Selection>, ApiError> {
    let word = app
        .words()
        .get_word(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    let game = app.game();
    let mut game = game.lock().await;
    game.selection_mut().toggle(&word);
    Ok(Json(game.selection().clone()))
}

pub async fn select_by_learned(
    State(app): State<AppServices>,
    Json(body): Json<ByLearned>,
) -> Result<Json<Selection>, ApiError> {
    let words = app.words().list_words().await?;
    let game = app.game();
    let mut game = game.lock().await;
    game.selection_mut().select_by_learned(&words, body.learned);
    Ok(Json(game.selection().clone()))
}

pub async fn set_sample_size(
    State(app): State<AppServices>,
    Json(body): Json<SampleSize>,
) -> Json<Selection> {
    let game = app.game();
    let mut game = game.lock().await;
    game.selection_mut().set_sample_size(body.size);
    Json(game.selection().clone())
}
