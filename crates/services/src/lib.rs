#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod selection;
pub mod word_service;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizError, SessionError, WordServiceError};
pub use quiz::{
    GameController, GameView, MarkOutcome, QuizLoopService, QuizSession, QuizState, SessionEnd,
};
pub use selection::{DEFAULT_SAMPLE_SIZE, Selection};
pub use word_service::WordService;
