use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use words_core::model::{ValidatedWord, Word, WordError, WordId, WordPatch};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("rejected by store: {0}")]
    Rejected(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),

    /// A patch would leave the stored word invalid. Nothing was written.
    #[error(transparent)]
    Invalid(#[from] WordError),

    #[error("word ids exhausted")]
    IdsExhausted,
}

/// Repository contract for word records.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// List every stored word ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_words(&self) -> Result<Vec<Word>, StorageError>;

    /// Fetch a word by ID.
    ///
    /// Returns `Ok(None)` when the word does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError>;

    /// Store a new word, assigning the next free id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the word cannot be stored.
    async fn insert_new_word(&self, word: ValidatedWord) -> Result<Word, StorageError>;

    /// Replace the stored record that has the same id as `word`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such id exists, or other storage errors.
    async fn update_word(&self, word: &Word) -> Result<(), StorageError>;

    /// Merge `patch` into the stored word as one atomic step and return the result.
    ///
    /// Concurrent patches of different fields of the same word must all survive.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such id exists, or
    /// `StorageError::Invalid` if the merged word would be invalid.
    async fn patch_word(&self, id: WordId, patch: &WordPatch) -> Result<Word, StorageError>;

    /// Remove a word and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such id exists, or other storage errors.
    async fn delete_word(&self, id: WordId) -> Result<Word, StorageError>;
}

/// Id-ordered word table with a high-water id counter.
///
/// Shared by the in-memory and JSON file backends. `next_id` only grows, so an
/// id is never handed out twice even after the highest word is deleted.
/// `u64::MAX` is never assigned; a counter stuck there means the ids ran out.
#[derive(Debug, Clone)]
pub(crate) struct WordTable {
    words: BTreeMap<WordId, Word>,
    next_id: WordId,
}

impl Default for WordTable {
    fn default() -> Self {
        Self {
            words: BTreeMap::new(),
            next_id: WordId::new(1),
        }
    }
}

impl WordTable {
    pub(crate) fn from_words(words: Vec<Word>, next_id: Option<WordId>) -> Self {
        let mut table = Self::default();
        for word in words {
            let id = word.id;
            if table.words.insert(id, word).is_some() {
                tracing::warn!(%id, "duplicate word id in stored data, keeping the last record");
            }
        }
        let after_max = match table.words.keys().next_back() {
            None => WordId::new(1),
            Some(max) => max.next().unwrap_or(*max),
        };
        table.next_id = next_id.map_or(after_max, |n| n.max(after_max));
        table
    }

    pub(crate) fn next_id(&self) -> WordId {
        self.next_id
    }

    pub(crate) fn list(&self) -> Vec<Word> {
        self.words.values().cloned().collect()
    }

    pub(crate) fn get(&self, id: WordId) -> Option<Word> {
        self.words.get(&id).cloned()
    }

    pub(crate) fn insert(&mut self, word: ValidatedWord) -> Result<Word, StorageError> {
        let id = self.next_id;
        let following = id.next().ok_or(StorageError::IdsExhausted)?;
        self.next_id = following;
        let word = word.assign_id(id);
        self.words.insert(id, word.clone());
        Ok(word)
    }

    pub(crate) fn replace(&mut self, word: &Word) -> Result<(), StorageError> {
        let slot = self.words.get_mut(&word.id).ok_or(StorageError::NotFound)?;
        *slot = word.clone();
        Ok(())
    }

    pub(crate) fn patch(&mut self, id: WordId, patch: &WordPatch) -> Result<Word, StorageError> {
        let slot = self.words.get_mut(&id).ok_or(StorageError::NotFound)?;
        let merged = patch.clone().apply(slot)?;
        *slot = merged.clone();
        Ok(merged)
    }

    pub(crate) fn remove(&mut self, id: WordId) -> Result<Word, StorageError> {
        self.words.remove(&id).ok_or(StorageError::NotFound)
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    table: Arc<Mutex<WordTable>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing records, keeping their ids.
    #[must_use]
    pub fn with_words(words: Vec<Word>) -> Self {
        Self {
            table: Arc::new(Mutex::new(WordTable::from_words(words, None))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, WordTable>, StorageError> {
        self.table
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl WordRepository for InMemoryRepository {
    async fn list_words(&self) -> Result<Vec<Word>, StorageError> {
        Ok(self.lock()?.list())
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError> {
        Ok(self.lock()?.get(id))
    }

    async fn insert_new_word(&self, word: ValidatedWord) -> Result<Word, StorageError> {
        self.lock()?.insert(word)
    }

    async fn update_word(&self, word: &Word) -> Result<(), StorageError> {
        self.lock()?.replace(word)
    }

    async fn patch_word(&self, id: WordId, patch: &WordPatch) -> Result<Word, StorageError> {
        self.lock()?.patch(id, patch)
    }

    async fn delete_word(&self, id: WordId) -> Result<Word, StorageError> {
        self.lock()?.remove(id)
    }
}

/// Holds the word repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub words: Arc<dyn WordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            words: Arc::new(InMemoryRepository::new()),
        }
    }
}
