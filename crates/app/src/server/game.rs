use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use services::{AppServices, GameView};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct Mark {
    learned: bool,
}

pub async fn show(State(app): State<AppServices>) -> Json<GameView> {
    Json(app.game().lock().await.view())
}

pub async fn start(State(app): State<AppServices>) -> Result<Json<GameView>, ApiError> {
    Ok(Json(app.game().lock().await.start()?))
}

pub async fn toggle_unknown(State(app): State<AppServices>) -> Result<Json<GameView>, ApiError> {
    let game = app.game();
    let mut game = game.lock().await;
    game.toggle_unknown()?;
    Ok(Json(game.view()))
}

pub async fn advance(State(app): State<AppServices>) -> Result<Json<GameView>, ApiError> {
    let game = app.game();
    let mut game = game.lock().await;
    game.advance()?;
    Ok(Json(game.view()))
}

/// The lock is held across the store round trip, so no other game request
/// can slip in between the write and the advance.
pub async fn mark(
    State(app): State<AppServices>,
    Json(body): Json<Mark>,
) -> Result<Json<GameView>, ApiError> {
    let game = app.game();
    let mut game = game.lock().await;
    game.mark_current(app.quiz(), body.learned).await?;
    Ok(Json(game.view()))
}

pub async fn repeat(State(app): State<AppServices>) -> Result<Json<GameView>, ApiError> {
    let game = app.game();
    let mut game = game.lock().await;
    game.repeat()?;
    Ok(Json(game.view()))
}

pub async fn stop(State(app): State<AppServices>) -> Result<Json<GameView>, ApiError> {
    let game = app.game();
    let mut game = game.lock().await;
    game.stop()?;
    Ok(Json(game.view()))
}
