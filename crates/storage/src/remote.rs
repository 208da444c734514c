//! Word store client for a running words server.
//!
//! Speaks the `/api/words` REST surface, so a second process can share the
//! server's store instead of opening the data file itself.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use words_core::model::{ValidatedWord, Word, WordDraft, WordId, WordPatch};

use crate::repository::{Storage, StorageError, WordRepository};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct DeleteBody {
    deleted: Word,
}

#[derive(Clone)]
pub struct RemoteRepository {
    client: Client,
    base_url: String,
}

impl RemoteRepository {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:5000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    fn words_url(&self) -> String {
        format!("{}/api/words", self.base_url)
    }

    fn word_url(&self, id: WordId) -> String {
        format!("{}/api/words/{id}", self.base_url)
    }
}

fn conn(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

async fn check(resp: Response) -> Result<Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| status.to_string(), |body| body.error);
    Err(match status {
        StatusCode::NOT_FOUND => StorageError::NotFound,
        StatusCode::CONFLICT => StorageError::Conflict,
        s if s.is_client_error() => StorageError::Rejected(message),
        _ => StorageError::Connection(format!("{status}: {message}")),
    })
}

async fn body<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, StorageError> {
    resp.json::<T>()
        .await
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

#[async_trait]
impl WordRepository for RemoteRepository {
    async fn list_words(&self) -> Result<Vec<Word>, StorageError> {
        let resp = self.client.get(self.words_url()).send().await.map_err(conn)?;
        let mut words: Vec<Word> = body(check(resp).await?).await?;
        words.sort_by_key(|w| w.id);
        Ok(words)
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError> {
        let resp = self.client.get(self.word_url(id)).send().await.map_err(conn)?;
        match check(resp).await {
            Ok(resp) => body(resp).await.map(Some),
            Err(StorageError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn insert_new_word(&self, word: ValidatedWord) -> Result<Word, StorageError> {
        let draft = WordDraft::from(word);
        let resp = self
            .client
            .post(self.words_url())
            .json(&draft)
            .send()
            .await
            .map_err(conn)?;
        body(check(resp).await?).await
    }

    async fn update_word(&self, word: &Word) -> Result<(), StorageError> {
        let resp = self
            .client
            .put(self.word_url(word.id))
            .json(word)
            .send()
            .await
            .map_err(conn)?;
        check(resp).await?;
        Ok(())
    }

    // The server merges the patch under its own store's guarantees.
    async fn patch_word(&self, id: WordId, patch: &WordPatch) -> Result<Word, StorageError> {
        let resp = self
            .client
            .put(self.word_url(id))
            .json(patch)
            .send()
            .await
            .map_err(conn)?;
        body(check(resp).await?).await
    }

    async fn delete_word(&self, id: WordId) -> Result<Word, StorageError> {
        let resp = self
            .client
            .delete(self.word_url(id))
            .send()
            .await
            .map_err(conn)?;
        let deleted: DeleteBody = body(check(resp).await?).await?;
        Ok(deleted.deleted)
    }
}

impl Storage {
    /// Build a `Storage` that forwards to a words server.
    #[must_use]
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            words: Arc::new(RemoteRepository::new(base_url)),
        }
    }
}
