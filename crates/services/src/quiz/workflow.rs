use std::sync::Arc;

use storage::repository::WordRepository;
use words_core::model::{Word, WordId};

use super::session::{QuizSession, QuizState};
use crate::error::{QuizError, SessionError};
use crate::word_service::WordService;

/// Result of marking the current word learned or unlearned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    /// The word as the store returned it.
    pub word: Word,
    /// Session state after advancing past the word.
    pub state: QuizState,
}

/// Runs the quiz steps that need the word store.
#[derive(Clone)]
pub struct QuizLoopService {
    words: WordService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(words: Arc<dyn WordRepository>) -> Self {
        Self {
            words: WordService::new(words),
        }
    }

    #[must_use]
    pub fn from_service(words: WordService) -> Self {
        Self { words }
    }

    /// Start a session over the stored copies of `ids`.
    ///
    /// Ids that no longer exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz(EmptySelection)` if none of the ids exist,
    /// or `SessionError::Words` if the store fails.
    pub async fn start_session(&self, ids: &[WordId]) -> Result<QuizSession, SessionError> {
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            match self.words.get_word(*id).await? {
                Some(word) => items.push(word),
                None => tracing::warn!(id = %id, "skipping missing word"),
            }
        }
        Ok(QuizSession::start(items)?)
    }

    /// Persist the learned flag for the current word, then advance.
    ///
    /// The session is only touched once the store has answered, so a failed
    /// write leaves pool, current word and unknown list as they were and the
    /// same word can be marked again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz` when there is no current word, or
    /// `SessionError::Words` if the store rejects the update.
    pub async fn mark_current(
        &self,
        session: &mut QuizSession,
        learned: bool,
    ) -> Result<MarkOutcome, SessionError> {
        if session.is_ended() {
            return Err(QuizError::SessionEnded.into());
        }
        let id = session.current().ok_or(QuizError::NoCurrentItem)?.id;

        let word = match self.words.set_learned(id, learned).await {
            Ok(word) => word,
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "mark failed; session unchanged");
                return Err(err.into());
            }
        };
        let state = session.complete_mark(word.clone())?;
        tracing::debug!(id = %id, learned, ?state, "word marked");
        Ok(MarkOutcome { word, state })
    }
}
