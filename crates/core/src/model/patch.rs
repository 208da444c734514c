use serde::{Deserialize, Serialize};

use crate::model::{Example, Word, WordError};

/// Partial update for a stored word. Absent fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
}

impl WordPatch {
    #[must_use]
    pub fn learned(learned: bool) -> Self {
        Self {
            learned: Some(learned),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch over `word`, returning the updated record.
    ///
    /// The id is never touched.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if the merged record has a blank title or translation.
    pub fn apply(self, word: &Word) -> Result<Word, WordError> {
        let merged = Word {
            id: word.id,
            title: self.title.unwrap_or_else(|| word.title.clone()),
            transcription: self
                .transcription
                .unwrap_or_else(|| word.transcription.clone()),
            translate: self.translate.unwrap_or_else(|| word.translate.clone()),
            learned: self.learned.unwrap_or(word.learned),
            examples: self.examples.unwrap_or_else(|| word.examples.clone()),
        };
        merged.validate()?;
        Ok(merged)
    }
}
