use serde::Serialize;
use words_core::model::Word;

use super::session::{QuizSession, QuizState, SessionEnd};
use crate::selection::Selection;

/// Serializable snapshot of the game for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub active: bool,
    pub state: Option<QuizState>,
    pub current: Option<Word>,
    pub remaining: usize,
    pub unknown: Vec<Word>,
    pub marked_unknown: bool,
    pub repeat_pass: bool,
    pub repeat_available: bool,
    pub selected: usize,
    pub sample_size: usize,
    pub last_session: Option<SessionEnd>,
}

impl GameView {
    pub(crate) fn build(
        session: Option<&QuizSession>,
        selection: &Selection,
        last_session: Option<&SessionEnd>,
    ) -> Self {
        let base = Self {
            active: false,
            state: None,
            current: None,
            remaining: 0,
            unknown: Vec::new(),
            marked_unknown: false,
            repeat_pass: false,
            repeat_available: false,
            selected: selection.len(),
            sample_size: selection.sample_size(),
            last_session: last_session.cloned(),
        };
        match session {
            None => base,
            Some(s) => Self {
                active: true,
                state: Some(s.state()),
                current: s.current().cloned(),
                remaining: s.remaining(),
                unknown: s.unknown().to_vec(),
                marked_unknown: s.is_marked_unknown(),
                repeat_pass: s.is_repeat_pass(),
                repeat_available: s.repeat_available(),
                ..base
            },
        }
    }
}
