//! HTTP API over the word store and the shared game.

use axum::Router;
use axum::routing::{get, post, put};
use services::AppServices;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod error;
mod game;
mod selection;
mod words;

pub use error::ApiError;

/// Build the API router.
pub fn router(app: AppServices) -> Router {
    Router::new()
        .route("/api/words", get(words::list).post(words::create))
        .route(
            "/api/words/{id}",
            get(words::fetch).put(words::update).delete(words::remove),
        )
        .route("/api/selection", get(selection::show))
        .route("/api/selection/all", post(selection::select_all))
        .route("/api/selection/clear", post(selection::clear))
        .route("/api/selection/toggle/{id}", post(selection::toggle))
        .route("/api/selection/learned", post(selection::select_by_learned))
        .route("/api/selection/sample-size", put(selection::set_sample_size))
        .route("/api/game", get(game::show))
        .route("/api/game/start", post(game::start))
        .route("/api/game/unknown", post(game::toggle_unknown))
        .route("/api/game/next", post(game::advance))
        .route("/api/game/mark", post(game::mark))
        .route("/api/game/repeat", post(game::repeat))
        .route("/api/game/stop", post(game::stop))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app)
}
