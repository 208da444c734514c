mod game;
mod session;
pub(crate) mod shuffle;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::{QuizError, SessionError};
pub use game::GameController;
pub use session::{QuizSession, QuizState, SessionEnd, SessionEndHook};
pub use shuffle::shuffled;
pub use view::GameView;
pub use workflow::{MarkOutcome, QuizLoopService};
