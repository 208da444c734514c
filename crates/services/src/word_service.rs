use std::sync::Arc;

use storage::repository::{StorageError, WordRepository};
use words_core::model::{Word, WordDraft, WordId, WordPatch};

use crate::error::WordServiceError;

/// Validates word edits and persists them through the configured store.
#[derive(Clone)]
pub struct WordService {
    words: Arc<dyn WordRepository>,
}

impl WordService {
    #[must_use]
    pub fn new(words: Arc<dyn WordRepository>) -> Self {
        Self { words }
    }

    /// All words, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` if the store cannot be read.
    pub async fn list_words(&self) -> Result<Vec<Word>, WordServiceError> {
        Ok(self.words.list_words().await?)
    }

    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` for backend failures.
    pub async fn get_word(&self, id: WordId) -> Result<Option<Word>, WordServiceError> {
        Ok(self.words.get_word(id).await?)
    }

    /// Validate a draft and store it under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Word` when the title or translation is blank.
    /// Returns `WordServiceError::Storage` if persistence fails.
    pub async fn create_word(&self, draft: WordDraft) -> Result<Word, WordServiceError> {
        let validated = draft.validate()?;
        let word = self.words.insert_new_word(validated).await?;
        tracing::info!(id = %word.id, title = %word.title, "word created");
        Ok(word)
    }

    /// Merge `patch` into the stored word and persist the result.
    ///
    /// The store applies the merge atomically, so a concurrent patch touching
    /// other fields of the same word is never lost.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` with `StorageError::NotFound` for an
    /// unknown id, `WordServiceError::Word` if the merged word is invalid.
    pub async fn update_word(&self, id: WordId, patch: WordPatch) -> Result<Word, WordServiceError> {
        let updated = match self.words.patch_word(id, &patch).await {
            Ok(word) => word,
            Err(StorageError::Invalid(e)) => return Err(e.into()),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(id = %id, "word updated");
        Ok(updated)
    }

    /// Set the learned flag and return the stored word.
    ///
    /// # Errors
    ///
    /// Same as [`WordService::update_word`].
    pub async fn set_learned(&self, id: WordId, learned: bool) -> Result<Word, WordServiceError> {
        self.update_word(id, WordPatch::learned(learned)).await
    }

    /// Remove a word and return what was removed.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Storage` with `StorageError::NotFound` for an
    /// unknown id.
    pub async fn delete_word(&self, id: WordId) -> Result<Word, WordServiceError> {
        let deleted = self.words.delete_word(id).await?;
        tracing::info!(id = %id, "word deleted");
        Ok(deleted)
    }

    /// Store a batch of drafts in order.
    ///
    /// Every draft is validated before anything is written. Inserting stops at
    /// the first storage failure; words stored before it stay stored.
    ///
    /// # Errors
    ///
    /// Returns `WordServiceError::Word` if any draft is invalid (nothing is
    /// written), or `WordServiceError::Storage` on the first failed insert.
    pub async fn import_words(&self, drafts: Vec<WordDraft>) -> Result<Vec<Word>, WordServiceError> {
        let validated = drafts
            .into_iter()
            .map(WordDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let mut stored = Vec::with_capacity(validated.len());
        for word in validated {
            stored.push(self.words.insert_new_word(word).await?);
        }
        tracing::info!(count = stored.len(), "words imported");
        Ok(stored)
    }
}
