use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::oneshot;
use words_core::model::{Word, WordId};

use super::session::{QuizSession, QuizState, SessionEnd};
use super::view::GameView;
use super::workflow::{MarkOutcome, QuizLoopService};
use crate::error::SessionError;
use crate::selection::Selection;

struct ActiveGame {
    session: QuizSession,
    ended: oneshot::Receiver<SessionEnd>,
}

/// Owns the selection and at most one running game.
///
/// Every operation drains the session's end channel afterwards. Once the end
/// notification has arrived the session's words are pruned from the selection
/// and the game is dropped.
#[derive(Default)]
pub struct GameController {
    selection: Selection,
    active: Option<ActiveGame>,
    last_end: Option<SessionEnd>,
}

impl GameController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_selection(selection: Selection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.active.as_ref().map(|g| &g.session)
    }

    /// The most recent end notification, if any game has finished.
    #[must_use]
    pub fn last_end(&self) -> Option<&SessionEnd> {
        self.last_end.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::build(self.session(), &self.selection, self.last_end.as_ref())
    }

    /// Start a game over a random sample of the selection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyActive` while a game runs, or
    /// `SessionError::Quiz(EmptySelection)` when there is nothing to draw.
    pub fn start(&mut self) -> Result<GameView, SessionError> {
        self.start_with_rng(StdRng::from_os_rng())
    }

    /// Start a game drawing the sample and every shuffle from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`GameController::start`].
    pub fn start_with_rng(&mut self, mut rng: StdRng) -> Result<GameView, SessionError> {
        if self.active.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        let sample = self.selection.pick_sample(&mut rng)?;
        let (tx, ended) = oneshot::channel();
        let session = QuizSession::start_with_rng(sample, rng)?.on_session_end(move |end| {
            // The receiver only goes away together with the session.
            let _ = tx.send(end);
        });
        tracing::info!(words = session.remaining(), "game started");
        self.active = Some(ActiveGame { session, ended });
        Ok(self.view())
    }

    fn game_mut(&mut self) -> Result<&mut QuizSession, SessionError> {
        self.active
            .as_mut()
            .map(|g| &mut g.session)
            .ok_or(SessionError::NoActiveSession)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without a game, or the engine's
    /// `QuizError`.
    pub fn toggle_unknown(&mut self) -> Result<bool, SessionError> {
        Ok(self.game_mut()?.toggle_unknown()?)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without a game, or the engine's
    /// `QuizError`.
    pub fn advance(&mut self) -> Result<QuizState, SessionError> {
        let state = self.game_mut()?.advance()?;
        self.settle();
        Ok(state)
    }

    /// Start the next pass.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without a game, or
    /// `QuizError::PassInProgress` mid-pass.
    pub fn repeat(&mut self) -> Result<(), SessionError> {
        self.game_mut()?.repeat_unknown()?;
        self.settle();
        Ok(())
    }

    /// Mark the current word through the store, then advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without a game. Store failures
    /// are returned with the game untouched.
    pub async fn mark_current(
        &mut self,
        quiz: &QuizLoopService,
        learned: bool,
    ) -> Result<MarkOutcome, SessionError> {
        let session = self.game_mut()?;
        let outcome = quiz.mark_current(session, learned).await?;
        self.selection.apply_update(&outcome.word);
        self.settle();
        Ok(outcome)
    }

    /// End the running game.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without a game.
    pub fn stop(&mut self) -> Result<SessionEnd, SessionError> {
        self.game_mut()?.end_session();
        self.settle();
        self.last_end.clone().ok_or(SessionError::NoActiveSession)
    }

    /// Push a stored word's new content into the selection and the game.
    pub fn apply_word_update(&mut self, word: &Word) {
        self.selection.apply_update(word);
        if let Some(game) = self.active.as_mut() {
            game.session.apply_word_update(word);
        }
    }

    /// Forget a deleted word everywhere.
    pub fn remove_word(&mut self, id: WordId) {
        self.selection.remove(id);
        if let Some(game) = self.active.as_mut() {
            game.session.forget_word(id);
        }
        self.settle();
    }

    fn settle(&mut self) {
        let Some(end) = self
            .active
            .as_mut()
            .and_then(|g| g.ended.try_recv().ok())
        else {
            return;
        };
        self.selection.prune(&end.word_ids);
        self.active = None;
        tracing::info!(
            pruned = end.word_ids.len(),
            selected = self.selection.len(),
            "game over"
        );
        self.last_end = Some(end);
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("selection", &self.selection.len())
            .field("session", &self.session())
            .field("last_end", &self.last_end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use words_core::model::WordDraft;

    fn word(id: u64) -> Word {
        WordDraft::new(format!("w{id}"), "t")
            .validate()
            .unwrap()
            .assign_id(WordId::new(id))
    }

    fn controller(ids: &[u64]) -> GameController {
        let words: Vec<_> = ids.iter().copied().map(word).collect();
        let mut selection = Selection::new();
        selection.select_all(&words);
        GameController::with_selection(selection)
    }

    #[test]
    fn start_without_selection_fails() {
        let mut game = GameController::new();
        let err = game.start().unwrap_err();
        assert!(matches!(err, SessionError::Quiz(QuizError::EmptySelection)));
        assert!(!game.is_active());
    }

    #[test]
    fn second_start_is_rejected() {
        let mut game = controller(&[1, 2]);
        game.start_with_rng(StdRng::seed_from_u64(1)).unwrap();
        assert!(matches!(game.start().unwrap_err(), SessionError::AlreadyActive));
    }

    #[test]
    fn finished_game_prunes_the_played_words() {
        let mut game = controller(&[1, 2, 3, 4]);
        game.selection_mut().set_sample_size(2);
        game.start_with_rng(StdRng::seed_from_u64(4)).unwrap();
        let played: Vec<_> = game.session().unwrap().session_word_ids().to_vec();

        game.advance().unwrap();
        assert!(game.is_active());
        assert_eq!(game.advance().unwrap(), QuizState::Ended);

        assert!(!game.is_active());
        assert_eq!(game.selection().len(), 2);
        assert!(played.iter().all(|id| !game.selection().contains(*id)));
        assert_eq!(game.last_end().unwrap().word_ids, played);
    }

    #[test]
    fn unknown_words_keep_the_game_alive_until_repeated() {
        let mut game = controller(&[1, 2]);
        game.start_with_rng(StdRng::seed_from_u64(8)).unwrap();

        assert!(game.toggle_unknown().unwrap());
        game.advance().unwrap();
        assert_eq!(game.advance().unwrap(), QuizState::FinishedWithUnknown);
        assert!(game.view().repeat_available);

        game.repeat().unwrap();
        assert!(game.view().repeat_pass);
        assert_eq!(game.advance().unwrap(), QuizState::Ended);
        assert!(!game.is_active());
        assert_eq!(game.last_end().unwrap().unknown_total, 1);
    }

    #[test]
    fn stop_ends_and_prunes() {
        let mut game = controller(&[1, 2, 3]);
        game.start_with_rng(StdRng::seed_from_u64(2)).unwrap();

        let end = game.stop().unwrap();
        assert_eq!(end.word_ids.len(), 3);
        assert!(game.selection().is_empty());
        assert!(matches!(game.stop().unwrap_err(), SessionError::NoActiveSession));
        assert!(matches!(game.advance().unwrap_err(), SessionError::NoActiveSession));
    }

    #[test]
    fn crud_changes_reach_selection_and_session() {
        let mut game = controller(&[1, 2]);
        game.start_with_rng(StdRng::seed_from_u64(5)).unwrap();
        let mut current = game.session().unwrap().current().unwrap().clone();
        current.translate = "changed".into();

        game.apply_word_update(&current);
        assert_eq!(game.view().current.unwrap().translate, "changed");
        assert!(game.selection().words().iter().any(|w| w.translate == "changed"));

        game.remove_word(current.id);
        assert!(!game.selection().contains(current.id));
        assert_eq!(game.view().remaining, 1);
    }

    #[test]
    fn deleting_the_last_unknown_word_ends_the_game() {
        let mut game = controller(&[1, 2]);
        game.start_with_rng(StdRng::seed_from_u64(6)).unwrap();
        let flagged = game.session().unwrap().current().unwrap().id;
        game.toggle_unknown().unwrap();
        game.advance().unwrap();
        assert_eq!(game.advance().unwrap(), QuizState::FinishedWithUnknown);

        game.remove_word(flagged);
        assert!(!game.is_active());
        assert!(game.selection().is_empty());
        assert_eq!(game.last_end().unwrap().word_ids.len(), 2);
    }

    #[test]
    fn view_without_game_reports_selection() {
        let game = controller(&[1, 2, 3]);
        let view = game.view();
        assert!(!view.active);
        assert_eq!(view.state, None);
        assert_eq!(view.selected, 3);
        assert_eq!(view.sample_size, crate::selection::DEFAULT_SAMPLE_SIZE);
    }
}
