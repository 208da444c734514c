use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Example, WordId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word title cannot be empty")]
    EmptyTitle,

    #[error("word translation cannot be empty")]
    EmptyTranslate,
}

//
// ─── WORD TYPES ────────────────────────────────────────────────────────────────
//

/// Creation payload for a word, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordDraft {
    pub title: String,
    #[serde(default)]
    pub transcription: String,
    pub translate: String,
    #[serde(default)]
    pub learned: bool,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl WordDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, translate: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            translate: translate.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = transcription.into();
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyTitle` or `WordError::EmptyTranslate` when the
    /// corresponding field is blank.
    pub fn validate(self) -> Result<ValidatedWord, WordError> {
        check_required(&self.title, &self.translate)?;
        Ok(ValidatedWord {
            title: self.title,
            transcription: self.transcription,
            translate: self.translate,
            learned: self.learned,
            examples: self.examples,
        })
    }
}

/// A draft that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWord {
    title: String,
    transcription: String,
    translate: String,
    learned: bool,
    examples: Vec<Example>,
}

impl ValidatedWord {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    #[must_use]
    pub fn translate(&self) -> &str {
        &self.translate
    }

    #[must_use]
    pub fn learned(&self) -> bool {
        self.learned
    }

    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    #[must_use]
    pub fn assign_id(self, id: WordId) -> Word {
        Word {
            id,
            title: self.title,
            transcription: self.transcription,
            translate: self.translate,
            learned: self.learned,
            examples: self.examples,
        }
    }
}

impl From<ValidatedWord> for WordDraft {
    fn from(word: ValidatedWord) -> Self {
        Self {
            title: word.title,
            transcription: word.transcription,
            translate: word.translate,
            learned: word.learned,
            examples: word.examples,
        }
    }
}

/// A stored vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub title: String,
    #[serde(default)]
    pub transcription: String,
    pub translate: String,
    #[serde(default)]
    pub learned: bool,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Word {
    /// Re-run the draft checks against a stored record.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if title or translation is blank.
    pub fn validate(&self) -> Result<(), WordError> {
        check_required(&self.title, &self.translate)
    }
}

fn check_required(title: &str, translate: &str) -> Result<(), WordError> {
    if title.trim().is_empty() {
        return Err(WordError::EmptyTitle);
    }
    if translate.trim().is_empty() {
        return Err(WordError::EmptyTranslate);
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_fails_if_title_blank() {
        let err = WordDraft::new("   ", "бежать").validate().unwrap_err();
        assert_eq!(err, WordError::EmptyTitle);
    }

    #[test]
    fn draft_fails_if_translate_blank() {
        let err = WordDraft::new("run", "").validate().unwrap_err();
        assert_eq!(err, WordError::EmptyTranslate);
    }

    #[test]
    fn valid_draft_assigns_id_and_defaults() {
        let word = WordDraft::new("run", "бежать")
            .with_transcription("rʌn")
            .with_example(Example::new("I run", "Я бегу"))
            .validate()
            .unwrap()
            .assign_id(WordId::new(3));

        assert_eq!(word.id, WordId::new(3));
        assert_eq!(word.transcription, "rʌn");
        assert!(!word.learned);
        assert_eq!(word.examples.len(), 1);
    }

    #[test]
    fn draft_json_fills_optional_fields() {
        let draft: WordDraft =
            serde_json::from_str(r#"{"title":"cat","translate":"кот"}"#).unwrap();
        assert_eq!(draft, WordDraft::new("cat", "кот"));
    }

    #[test]
    fn word_json_shape() {
        let word = WordDraft::new("cat", "кот")
            .validate()
            .unwrap()
            .assign_id(WordId::new(1));
        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "cat",
                "transcription": "",
                "translate": "кот",
                "learned": false,
                "examples": []
            })
        );
    }
}
