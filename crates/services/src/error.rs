//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use words_core::model::{WordError, WordId};

/// Errors emitted by the quiz engine itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no words selected for the game")]
    EmptySelection,
    #[error("no current word in this pass")]
    NoCurrentItem,
    #[error("a pass is still in progress")]
    PassInProgress,
    #[error("session already ended")]
    SessionEnded,
    #[error("update for word {received} does not match current word {expected}")]
    StaleUpdate { expected: WordId, received: WordId },
}

/// Errors emitted by `WordService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordServiceError {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by game orchestration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a game is already running")]
    AlreadyActive,
    #[error("no game is running")]
    NoActiveSession,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Words(#[from] WordServiceError),
}

/// Errors emitted while assembling `AppServices`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
