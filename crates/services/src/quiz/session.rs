use std::collections::VecDeque;
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use words_core::model::{Word, WordId};

use super::shuffle::shuffled;
use crate::error::QuizError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a quiz session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    /// A pass is running and `current` is set.
    Playing,
    /// The primary pass is over and some words were flagged unknown.
    FinishedWithUnknown,
    /// A repeat pass is over with unknown words still pending.
    FinishedRepeatable,
    /// Terminal. The end notification has been delivered.
    Ended,
}

/// Outcome of a pass running dry.
///
/// A repeat pass never adds to the unknown list, so the primary pass is the
/// only place `FinishedWithUnknown` comes from.
pub(crate) fn completion_state(repeat_pass: bool, has_unknown: bool) -> QuizState {
    match (repeat_pass, has_unknown) {
        (true, true) => QuizState::FinishedRepeatable,
        (false, true) => QuizState::FinishedWithUnknown,
        (_, false) => QuizState::Ended,
    }
}

/// Delivered once when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEnd {
    /// Ids of every word the session was started with, in the order given.
    pub word_ids: Vec<WordId>,
    /// Passes started, the first one included.
    pub passes: u32,
    /// Words flagged unknown over the whole session.
    pub unknown_total: usize,
}

pub type SessionEndHook = Box<dyn FnOnce(SessionEnd) + Send>;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One game over a fixed set of words.
///
/// The pool is walked front to back. Words flagged unknown during the primary
/// pass are collected and can be replayed once the pass is over. Starting a
/// repeat pass moves the collected words into the pool, so the unknown list is
/// empty again and a repeat pass always runs out into `Ended`.
pub struct QuizSession {
    pool: VecDeque<Word>,
    repeat_pool: Vec<Word>,
    unknown: Vec<Word>,
    marked_unknown: bool,
    repeat_pass: bool,
    state: QuizState,
    word_ids: Vec<WordId>,
    passes: u32,
    unknown_total: usize,
    on_end: Option<SessionEndHook>,
    fired: bool,
    rng: StdRng,
}

impl QuizSession {
    /// Start a session over `items` in a random order.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptySelection` if `items` is empty.
    pub fn start(items: Vec<Word>) -> Result<Self, QuizError> {
        Self::start_with_rng(items, StdRng::from_os_rng())
    }

    /// Start a session drawing every shuffle from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptySelection` if `items` is empty.
    pub fn start_with_rng(items: Vec<Word>, mut rng: StdRng) -> Result<Self, QuizError> {
        if items.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        let word_ids = items.iter().map(|w| w.id).collect();
        let order = shuffled(items, &mut rng);
        let repeat_pool = order.clone();
        tracing::debug!(words = order.len(), "quiz session started");

        Ok(Self {
            pool: order.into(),
            repeat_pool,
            unknown: Vec::new(),
            marked_unknown: false,
            repeat_pass: false,
            state: QuizState::Playing,
            word_ids,
            passes: 1,
            unknown_total: 0,
            on_end: None,
            fired: false,
            rng,
        })
    }

    /// Register the end notification. It runs at most once.
    #[must_use]
    pub fn on_session_end(mut self, hook: impl FnOnce(SessionEnd) + Send + 'static) -> Self {
        self.on_end = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn current(&self) -> Option<&Word> {
        self.pool.front()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn is_pool_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// True when the caller should offer a repeat.
    #[must_use]
    pub fn repeat_available(&self) -> bool {
        matches!(
            self.state,
            QuizState::FinishedWithUnknown | QuizState::FinishedRepeatable
        )
    }

    #[must_use]
    pub fn is_repeat_pass(&self) -> bool {
        self.repeat_pass
    }

    #[must_use]
    pub fn is_marked_unknown(&self) -> bool {
        self.marked_unknown
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.state == QuizState::Ended
    }

    /// Words flagged unknown in the current primary pass.
    #[must_use]
    pub fn unknown(&self) -> &[Word] {
        &self.unknown
    }

    /// The shuffled order the session started with.
    #[must_use]
    pub fn repeat_pool(&self) -> &[Word] {
        &self.repeat_pool
    }

    #[must_use]
    pub fn session_word_ids(&self) -> &[WordId] {
        &self.word_ids
    }

    #[must_use]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    fn ensure_live(&self) -> Result<(), QuizError> {
        if self.is_ended() {
            return Err(QuizError::SessionEnded);
        }
        Ok(())
    }

    /// Flip the "unknown" flag on the current word and return the new value.
    ///
    /// Has no effect during a repeat pass.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionEnded` after the end, or
    /// `QuizError::NoCurrentItem` between passes.
    pub fn toggle_unknown(&mut self) -> Result<bool, QuizError> {
        self.ensure_live()?;
        if self.pool.is_empty() {
            return Err(QuizError::NoCurrentItem);
        }
        if !self.repeat_pass {
            self.marked_unknown = !self.marked_unknown;
        }
        Ok(self.marked_unknown)
    }

    /// Drop the current word and move to the next one.
    ///
    /// When the pool runs dry the session moves to its finished or ended
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionEnded` after the end, or
    /// `QuizError::NoCurrentItem` between passes.
    pub fn advance(&mut self) -> Result<QuizState, QuizError> {
        self.ensure_live()?;
        let word = self.pool.pop_front().ok_or(QuizError::NoCurrentItem)?;

        if self.marked_unknown && !self.repeat_pass {
            self.unknown.push(word);
            self.unknown_total += 1;
        }
        self.marked_unknown = false;

        if self.pool.is_empty() {
            self.complete_pass();
        }
        Ok(self.state)
    }

    /// Splice a fresh copy of a word into every session list holding its id.
    ///
    /// Order is untouched. Returns false when the word is not part of the
    /// session.
    pub fn apply_word_update(&mut self, updated: &Word) -> bool {
        let mut found = false;
        let lists = self
            .pool
            .iter_mut()
            .chain(self.repeat_pool.iter_mut())
            .chain(self.unknown.iter_mut());
        for slot in lists.filter(|w| w.id == updated.id) {
            slot.clone_from(updated);
            found = true;
        }
        found
    }

    /// Drop a deleted word from every session list.
    ///
    /// Removing the current word clears its unknown flag. Whenever the pool is
    /// empty afterwards the pass is re-evaluated, so losing the last unknown
    /// word between passes ends the session.
    pub fn forget_word(&mut self, id: WordId) -> bool {
        if self.is_ended() {
            return false;
        }
        let was_current = self.current().is_some_and(|w| w.id == id);
        let before = self.pool.len() + self.repeat_pool.len() + self.unknown.len();
        self.pool.retain(|w| w.id != id);
        self.repeat_pool.retain(|w| w.id != id);
        self.unknown.retain(|w| w.id != id);
        let removed = before != self.pool.len() + self.repeat_pool.len() + self.unknown.len();

        if was_current {
            self.marked_unknown = false;
        }
        // Between passes the unknown list may have just lost its last word.
        if removed && self.pool.is_empty() {
            self.complete_pass();
        }
        removed
    }

    /// Take the store's answer to a learned/unlearned mark for the current
    /// word, then advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleUpdate` if `updated` is not the current word;
    /// the session is left as it was.
    pub fn complete_mark(&mut self, updated: Word) -> Result<QuizState, QuizError> {
        self.ensure_live()?;
        let expected = self.current().ok_or(QuizError::NoCurrentItem)?.id;
        if expected != updated.id {
            return Err(QuizError::StaleUpdate {
                expected,
                received: updated.id,
            });
        }
        self.apply_word_update(&updated);
        self.advance()
    }

    /// Start another pass once the current one is over.
    ///
    /// With unknown words pending, they become the new pool and the pass is a
    /// repeat pass. Otherwise the original order is reshuffled and played
    /// again as a fresh primary pass. With nothing left to play the session
    /// ends instead.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::PassInProgress` while words remain in the pool, or
    /// `QuizError::SessionEnded` after the end.
    pub fn repeat_unknown(&mut self) -> Result<(), QuizError> {
        self.ensure_live()?;
        if !self.pool.is_empty() {
            return Err(QuizError::PassInProgress);
        }

        let (next, repeat_pass) = if self.unknown.is_empty() {
            (self.repeat_pool.clone(), false)
        } else {
            (std::mem::take(&mut self.unknown), true)
        };
        if next.is_empty() {
            // Every word of the session was deleted.
            self.end_session();
            return Ok(());
        }
        self.unknown.clear();
        self.pool = shuffled(next, &mut self.rng).into();
        self.repeat_pass = repeat_pass;
        self.marked_unknown = false;
        self.passes = self.passes.saturating_add(1);
        self.state = QuizState::Playing;
        tracing::debug!(
            words = self.pool.len(),
            repeat_pass,
            pass = self.passes,
            "quiz pass started"
        );
        Ok(())
    }

    /// End the session now, delivering the end notification if it has not
    /// been delivered yet. Calling it again does nothing.
    pub fn end_session(&mut self) {
        self.fire_end();
        self.pool.clear();
        self.repeat_pool.clear();
        self.unknown.clear();
        self.marked_unknown = false;
        self.repeat_pass = false;
        self.state = QuizState::Ended;
    }

    fn complete_pass(&mut self) {
        self.state = completion_state(self.repeat_pass, !self.unknown.is_empty());
        if self.state == QuizState::Ended {
            self.fire_end();
        }
    }

    fn fire_end(&mut self) {
        if self.fired {
            return;
        }
        self.fired = true;
        let end = SessionEnd {
            word_ids: self.word_ids.clone(),
            passes: self.passes,
            unknown_total: self.unknown_total,
        };
        tracing::info!(
            words = end.word_ids.len(),
            passes = end.passes,
            unknown = end.unknown_total,
            "quiz session ended"
        );
        if let Some(hook) = self.on_end.take() {
            hook(end);
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("pool_len", &self.pool.len())
            .field("unknown_len", &self.unknown.len())
            .field("marked_unknown", &self.marked_unknown)
            .field("repeat_pass", &self.repeat_pass)
            .field("passes", &self.passes)
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use words_core::model::WordDraft;

    fn word(id: u64) -> Word {
        WordDraft::new(format!("w{id}"), format!("t{id}"))
            .validate()
            .unwrap()
            .assign_id(WordId::new(id))
    }

    fn words(ids: &[u64]) -> Vec<Word> {
        ids.iter().copied().map(word).collect()
    }

    fn sorted_ids<'a>(items: impl IntoIterator<Item = &'a Word>) -> Vec<u64> {
        let mut ids: Vec<_> = items.into_iter().map(|w| w.id.value()).collect();
        ids.sort_unstable();
        ids
    }

    fn session(ids: &[u64], seed: u64) -> (QuizSession, Arc<Mutex<Vec<SessionEnd>>>) {
        let ends = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ends);
        let session = QuizSession::start_with_rng(words(ids), StdRng::seed_from_u64(seed))
            .unwrap()
            .on_session_end(move |end| sink.lock().unwrap().push(end));
        (session, ends)
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = QuizSession::start(Vec::new()).unwrap_err();
        assert_eq!(err, QuizError::EmptySelection);
    }

    #[test]
    fn start_yields_a_permutation_with_current_at_front() {
        for seed in 0..20 {
            let (s, _) = session(&[1, 2, 3, 4, 5], seed);
            assert_eq!(sorted_ids(s.pool.iter()), vec![1, 2, 3, 4, 5]);
            assert_eq!(s.current(), s.pool.front());
            assert_eq!(s.repeat_pool(), s.pool.iter().cloned().collect::<Vec<_>>());
            assert_eq!(s.state(), QuizState::Playing);
            assert!(s.unknown().is_empty());
            assert!(!s.is_marked_unknown());
            assert!(!s.is_repeat_pass());
        }
    }

    #[test]
    fn n_advances_empty_the_pool() {
        let (mut s, ends) = session(&[1, 2, 3, 4], 3);
        for _ in 0..4 {
            assert!(s.current().is_some());
            s.advance().unwrap();
        }
        assert!(s.is_pool_empty());
        assert!(s.current().is_none());
        assert_eq!(s.state(), QuizState::Ended);
        assert_eq!(ends.lock().unwrap().len(), 1);
        assert_eq!(s.advance().unwrap_err(), QuizError::SessionEnded);
    }

    #[test]
    fn flagged_word_joins_unknown_only_after_advance() {
        let (mut s, _) = session(&[1, 2, 3], 11);
        let flagged = s.current().unwrap().id;

        assert!(s.toggle_unknown().unwrap());
        assert!(s.unknown().is_empty());

        s.advance().unwrap();
        assert_eq!(s.unknown().len(), 1);
        assert_eq!(s.unknown()[0].id, flagged);
        assert!(!s.is_marked_unknown());

        s.advance().unwrap();
        assert_eq!(s.unknown().len(), 1);
    }

    #[test]
    fn double_toggle_leaves_unknown_untouched() {
        let (mut s, _) = session(&[1, 2], 5);
        assert!(s.toggle_unknown().unwrap());
        assert!(!s.toggle_unknown().unwrap());
        s.advance().unwrap();
        assert!(s.unknown().is_empty());
    }

    #[test]
    fn primary_pass_with_unknowns_waits_for_repeat() {
        let (mut s, ends) = session(&[1, 2, 3], 8);
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        let state = s.advance().unwrap();

        assert_eq!(state, QuizState::FinishedWithUnknown);
        assert!(s.repeat_available());
        assert_eq!(s.unknown().len(), 2);
        assert!(ends.lock().unwrap().is_empty());
    }

    #[test]
    fn repeat_plays_exactly_the_unknown_words() {
        let (mut s, _) = session(&[1, 2, 3, 4], 21);
        let mut flagged = Vec::new();
        for i in 0..4 {
            if i % 2 == 0 {
                flagged.push(s.current().unwrap().id.value());
                s.toggle_unknown().unwrap();
            }
            s.advance().unwrap();
        }
        flagged.sort_unstable();

        s.repeat_unknown().unwrap();
        assert!(s.is_repeat_pass());
        assert_eq!(s.state(), QuizState::Playing);
        assert_eq!(sorted_ids(s.pool.iter()), flagged);
        assert!(s.unknown().is_empty());
        assert_eq!(s.passes(), 2);
    }

    #[test]
    fn repeat_pass_ignores_unknown_flag_and_ends_once() {
        let (mut s, ends) = session(&[1, 2], 4);
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        s.advance().unwrap();
        s.repeat_unknown().unwrap();

        assert!(!s.toggle_unknown().unwrap());
        assert!(!s.is_marked_unknown());
        let state = s.advance().unwrap();

        assert_eq!(state, QuizState::Ended);
        assert!(s.unknown().is_empty());
        s.end_session();
        let ends = ends.lock().unwrap();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].passes, 2);
        assert_eq!(ends[0].unknown_total, 1);
    }

    #[test]
    fn three_word_scenario_ends_after_repeating_the_unknown_word() {
        let (mut s, ends) = session(&[1, 2, 3], 99);
        let first = s.current().unwrap().clone();

        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        assert_eq!(s.remaining(), 2);
        assert_eq!(s.unknown(), std::slice::from_ref(&first));

        s.advance().unwrap();
        assert_eq!(s.advance().unwrap(), QuizState::FinishedWithUnknown);

        s.repeat_unknown().unwrap();
        assert_eq!(s.pool.iter().cloned().collect::<Vec<_>>(), vec![first]);
        assert!(s.is_repeat_pass());

        assert_eq!(s.advance().unwrap(), QuizState::Ended);
        assert!(!s.repeat_available());
        let ends = ends.lock().unwrap();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].word_ids, vec![WordId::new(1), WordId::new(2), WordId::new(3)]);
    }

    #[test]
    fn repeat_mid_pass_is_rejected_without_change() {
        let (mut s, _) = session(&[1, 2, 3], 1);
        s.toggle_unknown().unwrap();
        let before = s.current().cloned();

        assert_eq!(s.repeat_unknown().unwrap_err(), QuizError::PassInProgress);
        assert_eq!(s.current().cloned(), before);
        assert!(s.is_marked_unknown());
        assert_eq!(s.remaining(), 3);
    }

    #[test]
    fn repeat_without_unknowns_replays_the_whole_pool() {
        let (mut s, ends) = session(&[1, 2, 3], 12);
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        s.advance().unwrap();
        s.advance().unwrap();
        // Finished state with nothing left to repeat; only reachable through
        // the fields directly.
        s.unknown.clear();

        s.repeat_unknown().unwrap();
        assert!(!s.is_repeat_pass());
        assert_eq!(sorted_ids(s.pool.iter()), vec![1, 2, 3]);
        assert!(s.unknown().is_empty());
        assert!(ends.lock().unwrap().is_empty());
    }

    #[test]
    fn completion_rule_covers_every_transition() {
        assert_eq!(completion_state(false, false), QuizState::Ended);
        assert_eq!(completion_state(false, true), QuizState::FinishedWithUnknown);
        assert_eq!(completion_state(true, true), QuizState::FinishedRepeatable);
        assert_eq!(completion_state(true, false), QuizState::Ended);
    }

    #[test]
    fn finished_repeatable_offers_repeat_without_firing() {
        let (mut s, ends) = session(&[1], 6);
        s.repeat_pass = true;
        s.unknown.push(word(1));
        s.advance().unwrap();

        assert_eq!(s.state(), QuizState::FinishedRepeatable);
        assert!(s.repeat_available());
        assert!(ends.lock().unwrap().is_empty());

        s.repeat_unknown().unwrap();
        assert_eq!(s.state(), QuizState::Playing);
        assert!(s.is_repeat_pass());
    }

    #[test]
    fn update_for_foreign_id_changes_nothing() {
        let (mut s, _) = session(&[1, 2, 3], 17);
        let before: Vec<_> = s.pool.iter().cloned().collect();

        assert!(!s.apply_word_update(&word(40)));
        assert_eq!(s.pool.iter().cloned().collect::<Vec<_>>(), before);
        assert_eq!(s.repeat_pool(), before.as_slice());
    }

    #[test]
    fn update_is_spliced_into_every_list_in_place() {
        let (mut s, _) = session(&[1, 2, 3], 2);
        let target = s.current().unwrap().clone();
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        let order: Vec<_> = s.repeat_pool().iter().map(|w| w.id).collect();

        let mut refreshed = target.clone();
        refreshed.learned = true;
        assert!(s.apply_word_update(&refreshed));

        assert!(s.unknown()[0].learned);
        assert_eq!(s.repeat_pool().iter().map(|w| w.id).collect::<Vec<_>>(), order);
        assert!(s.repeat_pool().iter().any(|w| w.id == target.id && w.learned));
    }

    #[test]
    fn forgetting_the_last_current_word_completes_the_pass() {
        let (mut s, ends) = session(&[1, 2], 13);
        s.advance().unwrap();
        let last = s.current().unwrap().id;
        s.toggle_unknown().unwrap();

        assert!(s.forget_word(last));
        assert!(!s.is_marked_unknown());
        assert_eq!(s.state(), QuizState::Ended);
        assert_eq!(ends.lock().unwrap().len(), 1);
    }

    #[test]
    fn forgetting_a_queued_word_keeps_current() {
        let (mut s, _) = session(&[1, 2, 3], 13);
        let current = s.current().unwrap().id;
        let queued = s.pool[2].id;

        assert!(s.forget_word(queued));
        assert_eq!(s.current().map(|w| w.id), Some(current));
        assert_eq!(s.remaining(), 2);
        assert!(s.repeat_pool().iter().all(|w| w.id != queued));
        assert!(!s.forget_word(WordId::new(50)));
    }

    #[test]
    fn forgetting_the_only_unknown_word_between_passes_ends() {
        let (mut s, ends) = session(&[1], 21);
        s.toggle_unknown().unwrap();
        assert_eq!(s.advance().unwrap(), QuizState::FinishedWithUnknown);

        assert!(s.forget_word(WordId::new(1)));
        assert_eq!(s.state(), QuizState::Ended);
        assert!(!s.repeat_available());
        assert_eq!(ends.lock().unwrap().len(), 1);
        assert_eq!(s.repeat_unknown().unwrap_err(), QuizError::SessionEnded);
    }

    #[test]
    fn forgetting_one_of_several_unknown_words_keeps_repeat() {
        let (mut s, ends) = session(&[1, 2], 21);
        let first = s.current().unwrap().id;
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        s.toggle_unknown().unwrap();
        s.advance().unwrap();

        assert!(s.forget_word(first));
        assert_eq!(s.state(), QuizState::FinishedWithUnknown);
        assert_eq!(s.unknown().len(), 1);
        assert!(ends.lock().unwrap().is_empty());
    }

    #[test]
    fn repeat_with_nothing_left_ends_the_session() {
        let (mut s, ends) = session(&[1], 3);
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        // Finished with both lists emptied underneath; only reachable through
        // the fields directly.
        s.unknown.clear();
        s.repeat_pool.clear();

        s.repeat_unknown().unwrap();
        assert!(s.is_ended());
        assert!(s.current().is_none());
        assert_eq!(ends.lock().unwrap().len(), 1);
        assert_eq!(s.advance().unwrap_err(), QuizError::SessionEnded);
    }

    #[test]
    fn complete_mark_refreshes_then_advances() {
        let (mut s, _) = session(&[1, 2], 30);
        let mut current = s.current().unwrap().clone();
        current.learned = true;

        s.complete_mark(current.clone()).unwrap();
        assert_eq!(s.remaining(), 1);
        assert!(s.repeat_pool().iter().any(|w| w.id == current.id && w.learned));
    }

    #[test]
    fn complete_mark_for_other_word_is_stale() {
        let (mut s, _) = session(&[1, 2], 30);
        let current = s.current().unwrap().id;
        let other = s.pool[1].clone();

        let err = s.complete_mark(other.clone()).unwrap_err();
        assert_eq!(
            err,
            QuizError::StaleUpdate {
                expected: current,
                received: other.id
            }
        );
        assert_eq!(s.remaining(), 2);
    }

    #[test]
    fn end_session_fires_once_and_clears() {
        let (mut s, ends) = session(&[1, 2, 3], 9);
        s.advance().unwrap();
        s.end_session();
        s.end_session();

        assert!(s.is_ended());
        assert!(s.is_pool_empty());
        assert!(s.repeat_pool().is_empty());
        assert_eq!(ends.lock().unwrap().len(), 1);
        assert_eq!(s.toggle_unknown().unwrap_err(), QuizError::SessionEnded);
        assert_eq!(s.repeat_unknown().unwrap_err(), QuizError::SessionEnded);
    }

    #[test]
    fn toggle_between_passes_has_no_current_word() {
        let (mut s, _) = session(&[1], 0);
        s.toggle_unknown().unwrap();
        s.advance().unwrap();
        assert_eq!(s.state(), QuizState::FinishedWithUnknown);
        assert_eq!(s.toggle_unknown().unwrap_err(), QuizError::NoCurrentItem);
        assert_eq!(s.advance().unwrap_err(), QuizError::NoCurrentItem);
    }
}
