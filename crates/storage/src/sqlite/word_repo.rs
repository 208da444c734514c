use words_core::model::{ValidatedWord, Word, WordId, WordPatch};

use super::SqliteRepository;
use super::mapping::{examples_to_json, map_word_row, word_id_from_i64, word_id_to_i64};
use crate::repository::{StorageError, WordRepository};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl WordRepository for SqliteRepository {
    async fn list_words(&self) -> Result<Vec<Word>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, transcription, translate, learned, examples
            FROM words
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut words = Vec::with_capacity(rows.len());
        for row in rows {
            words.push(map_word_row(&row)?);
        }
        Ok(words)
    }

    async fn get_word(&self, id: WordId) -> Result<Option<Word>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, title, transcription, translate, learned, examples
            FROM words
            WHERE id = ?1
            ",
        )
        .bind(word_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_word_row).transpose()
    }

    async fn insert_new_word(&self, word: ValidatedWord) -> Result<Word, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO words (title, transcription, translate, learned, examples)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(word.title())
        .bind(word.transcription())
        .bind(word.translate())
        .bind(word.learned())
        .bind(examples_to_json(word.examples())?)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        let id = word_id_from_i64(res.last_insert_rowid())?;
        Ok(word.assign_id(id))
    }

    async fn update_word(&self, word: &Word) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE words SET
                title = ?2,
                transcription = ?3,
                translate = ?4,
                learned = ?5,
                examples = ?6
            WHERE id = ?1
            ",
        )
        .bind(word_id_to_i64(word.id)?)
        .bind(word.title.as_str())
        .bind(word.transcription.as_str())
        .bind(word.translate.as_str())
        .bind(word.learned)
        .bind(examples_to_json(&word.examples)?)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn patch_word(&self, id: WordId, patch: &WordPatch) -> Result<Word, StorageError> {
        let examples = patch.examples.as_deref().map(examples_to_json).transpose()?;
        let mut tx = self.pool.begin().await.map_err(conn)?;

        // Writing first takes the write lock, so no other patch lands between
        // the merge and the read-back.
        let row = sqlx::query(
            r"
            UPDATE words SET
                title = COALESCE(?2, title),
                transcription = COALESCE(?3, transcription),
                translate = COALESCE(?4, translate),
                learned = COALESCE(?5, learned),
                examples = COALESCE(?6, examples)
            WHERE id = ?1
            RETURNING id, title, transcription, translate, learned, examples
            ",
        )
        .bind(word_id_to_i64(id)?)
        .bind(patch.title.as_deref())
        .bind(patch.transcription.as_deref())
        .bind(patch.translate.as_deref())
        .bind(patch.learned)
        .bind(examples)
        .fetch_optional(&mut *tx)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;
        let word = map_word_row(&row)?;

        // Dropping the transaction rolls the merge back.
        word.validate()?;
        tx.commit().await.map_err(conn)?;
        Ok(word)
    }

    async fn delete_word(&self, id: WordId) -> Result<Word, StorageError> {
        let raw_id = word_id_to_i64(id)?;
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let row = sqlx::query(
            r"
            SELECT id, title, transcription, translate, learned, examples
            FROM words
            WHERE id = ?1
            ",
        )
        .bind(raw_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;
        let word = map_word_row(&row)?;

        sqlx::query("DELETE FROM words WHERE id = ?1")
            .bind(raw_id)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        tx.commit().await.map_err(conn)?;
        Ok(word)
    }
}
