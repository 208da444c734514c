//! File-backed word store.
//!
//! The whole table lives in memory and is rewritten to disk after every
//! mutation, via a temporary file and a rename so a crash never leaves a
//! half-written data file behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use words_core::model::{ValidatedWord, Word, WordId, WordPatch};

use crate::repository::{Storage, StorageError, WordRepository, WordTable};

#[derive(Serialize)]
struct DataFileRef<'a> {
    next_id: WordId,
    words: &'a [Word],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DataFile {
    Current { next_id: WordId, words: Vec<Word> },
    // Plain array of words, as written by earlier versions.
    Legacy(Vec<Word>),
}

#[derive(Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    table: Arc<Mutex<WordTable>>,
}

impl JsonFileRepository {
    /// Open the data file at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read, or
    /// `StorageError::Serialization` if it is not a valid word list.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let table = match tokio::fs::read(&path).await {
            Ok(raw) => parse_data_file(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "data file not found, starting empty");
                WordTable::default()
            }
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            words = table.list().len(),
            next_id = %table.next_id(),
            "loaded word data file"
        );
        Ok(Self {
            path,
            table: Arc::new(Mutex::new(table)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, table: &WordTable) -> Result<(), StorageError> {
        let words = table.list();
        let body = serde_json::to_vec_pretty(&DataFileRef {
            next_id: table.next_id(),
            words: &words,
        })
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }

    // Mutations run against a copy that only replaces the live table once the
    // file write succeeded.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut WordTable) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self.table.lock().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }
}

fn parse_data_file(raw: &[u8]) -> Result<WordTable, StorageError> {
    let file: DataFile =
        serde_json::from_slice(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(match file {
        DataFile::Current { next_id, words } => WordTable::from_words(words, Some(next_id)),
        DataFile::Legacy(words) => WordTable::from_words(words, None),
    })
}

#[async_trait]
impl WordRepository for JsonFileRepository {
    async fn list_words(&self) -> Result<Vec<Word>, StorageError> {
        Ok(self.table.lock().await.list())
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError> {
        Ok(self.table.lock().await.get(id))
    }

    async fn insert_new_word(&self, word: ValidatedWord) -> Result<Word, StorageError> {
        self.mutate(|table| table.insert(word)).await
    }

    async fn update_word(&self, word: &Word) -> Result<(), StorageError> {
        self.mutate(|table| table.replace(word)).await
    }

    async fn patch_word(&self, id: WordId, patch: &WordPatch) -> Result<Word, StorageError> {
        self.mutate(|table| table.patch(id, patch)).await
    }

    async fn delete_word(&self, id: WordId) -> Result<Word, StorageError> {
        self.mutate(|table| table.remove(id)).await
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON data file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if an existing data file cannot be loaded.
    pub async fn json_file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let repo = JsonFileRepository::open(path).await?;
        Ok(Self {
            words: Arc::new(repo),
        })
    }
}
