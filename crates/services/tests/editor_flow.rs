use std::sync::Arc;

use services::{WordService, WordServiceError};
use storage::repository::{Storage, StorageError};
use words_core::model::{Example, WordDraft, WordPatch};

#[tokio::test]
async fn editor_flow_create_edit_delete() {
    let storage = Storage::sqlite("sqlite:file:memdb_word_editor_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let words = WordService::new(Arc::clone(&storage.words));

    let created = words
        .create_word(
            WordDraft::new("run", "бежать")
                .with_transcription("rʌn")
                .with_example(Example::new("I run", "Я бегу")),
        )
        .await
        .expect("create word");
    assert!(!created.learned);

    let patch = WordPatch {
        translate: Some("бегать".into()),
        ..WordPatch::default()
    };
    let edited = words.update_word(created.id, patch).await.expect("edit word");
    assert_eq!(edited.translate, "бегать");
    assert_eq!(edited.examples, created.examples);

    let blank = WordPatch {
        title: Some(" ".into()),
        ..WordPatch::default()
    };
    assert!(matches!(
        words.update_word(created.id, blank).await,
        Err(WordServiceError::Word(_))
    ));
    let stored = words.get_word(created.id).await.unwrap().unwrap();
    assert_eq!(stored, edited);

    let deleted = words.delete_word(created.id).await.expect("delete word");
    assert_eq!(deleted, edited);
    assert!(matches!(
        words.update_word(created.id, WordPatch::learned(true)).await,
        Err(WordServiceError::Storage(StorageError::NotFound))
    ));
}
