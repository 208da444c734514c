use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;
use tokio::sync::Mutex;

use crate::error::AppServicesError;
use crate::quiz::{GameController, QuizLoopService};
use crate::word_service::WordService;

/// Assembles the services a front end needs over one store.
///
/// Clones share the same store and the same game.
#[derive(Clone)]
pub struct AppServices {
    words: WordService,
    quiz: QuizLoopService,
    game: Arc<Mutex<GameController>>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        let words = WordService::new(Arc::clone(&storage.words));
        Self {
            quiz: QuizLoopService::from_service(words.clone()),
            words,
            game: Arc::new(Mutex::new(GameController::new())),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Sqlite` if connecting or migrating fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage))
    }

    /// Build services backed by a JSON data file.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if an existing file cannot be read.
    pub async fn new_json_file(path: impl Into<PathBuf>) -> Result<Self, AppServicesError> {
        let storage = Storage::json_file(path).await?;
        Ok(Self::from_storage(&storage))
    }

    /// Build services that keep words in another running server's store.
    #[must_use]
    pub fn new_remote(base_url: &str) -> Self {
        Self::from_storage(&Storage::remote(base_url))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory())
    }

    #[must_use]
    pub fn words(&self) -> &WordService {
        &self.words
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizLoopService {
        &self.quiz
    }

    /// The shared game. Hold the lock for a whole request so game steps never
    /// interleave.
    #[must_use]
    pub fn game(&self) -> Arc<Mutex<GameController>> {
        Arc::clone(&self.game)
    }
}
