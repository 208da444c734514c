use sqlx::Row;
use words_core::model::{Example, Word, WordId};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn word_id_from_i64(v: i64) -> Result<WordId, StorageError> {
    u64::try_from(v)
        .map(WordId::new)
        .map_err(|_| StorageError::Serialization("word_id sign overflow".into()))
}

pub(crate) fn word_id_to_i64(id: WordId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("word_id overflow".into()))
}

pub(crate) fn examples_to_json(examples: &[Example]) -> Result<String, StorageError> {
    serde_json::to_string(examples).map_err(ser)
}

pub(crate) fn examples_from_json(raw: &str) -> Result<Vec<Example>, StorageError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_word_row(row: &sqlx::sqlite::SqliteRow) -> Result<Word, StorageError> {
    let examples: String = row.try_get("examples").map_err(ser)?;
    Ok(Word {
        id: word_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        title: row.try_get("title").map_err(ser)?,
        transcription: row.try_get("transcription").map_err(ser)?,
        translate: row.try_get("translate").map_err(ser)?,
        learned: row.try_get::<bool, _>("learned").map_err(ser)?,
        examples: examples_from_json(&examples)?,
    })
}
