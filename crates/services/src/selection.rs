use rand::Rng;
use serde::Serialize;
use words_core::model::{Word, WordId};

use crate::error::QuizError;
use crate::quiz::shuffle::shuffled;

pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Words picked in browsing mode for the next game, plus how many of them a
/// game draws.
///
/// Keeps its own copy of each selected word in id order; callers push CRUD
/// changes in through `apply_update` and `remove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    words: Vec<Word>,
    sample_size: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn ids(&self) -> Vec<WordId> {
        self.words.iter().map(|w| w.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn contains(&self, id: WordId) -> bool {
        self.position(id).is_ok()
    }

    fn position(&self, id: WordId) -> Result<usize, usize> {
        self.words.binary_search_by_key(&id, |w| w.id)
    }

    pub fn select_all(&mut self, words: &[Word]) {
        self.replace(words.to_vec());
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Replace the selection with every word whose learned flag matches.
    pub fn select_by_learned(&mut self, words: &[Word], learned: bool) {
        self.replace(words.iter().filter(|w| w.learned == learned).cloned().collect());
        self.sample_size = self.sample_size.min(self.words.len());
    }

    /// Add the word if absent, remove it if present. Returns true when the
    /// word ends up selected.
    pub fn toggle(&mut self, word: &Word) -> bool {
        match self.position(word.id) {
            Ok(at) => {
                self.words.remove(at);
                false
            }
            Err(at) => {
                self.words.insert(at, word.clone());
                true
            }
        }
    }

    /// Set the sample size, clamped to the number of selected words.
    pub fn set_sample_size(&mut self, size: usize) -> usize {
        self.sample_size = size.min(self.words.len());
        self.sample_size
    }

    /// Draw a random sample of `min(sample_size, len)` selected words.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptySelection` when nothing is selected or the
    /// sample size is zero.
    pub fn pick_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Word>, QuizError> {
        let take = self.sample_size.min(self.words.len());
        if take == 0 {
            return Err(QuizError::EmptySelection);
        }
        let mut sample = shuffled(self.words.clone(), rng);
        sample.truncate(take);
        Ok(sample)
    }

    /// Drop every listed id.
    pub fn prune(&mut self, ids: &[WordId]) {
        self.words.retain(|w| !ids.contains(&w.id));
    }

    /// Refresh the cached copy of a selected word. Unselected words are
    /// ignored.
    pub fn apply_update(&mut self, word: &Word) -> bool {
        match self.position(word.id) {
            Ok(at) => {
                self.words[at].clone_from(word);
                true
            }
            Err(_) => false,
        }
    }

    pub fn remove(&mut self, id: WordId) -> Option<Word> {
        self.position(id).ok().map(|at| self.words.remove(at))
    }

    fn replace(&mut self, mut words: Vec<Word>) {
        words.sort_by_key(|w| w.id);
        words.dedup_by_key(|w| w.id);
        self.words = words;
    }
}
