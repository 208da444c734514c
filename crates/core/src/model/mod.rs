mod example;
mod ids;
mod patch;
mod word;

pub use example::Example;
pub use ids::{ParseIdError, WordId};
pub use patch::WordPatch;
pub use word::{ValidatedWord, Word, WordDraft, WordError};
