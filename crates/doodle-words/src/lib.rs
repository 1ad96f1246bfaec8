//! Word vocabularies for Doodle.
//!
//! The scheduler asks a [`WordSource`] for one secret word per draw
//! turn. [`WordBank`] is the stock implementation: an in-memory table of
//! words per [`Difficulty`], loaded from `<tier>mode.txt` files.

mod bank;
mod difficulty;
mod error;

pub use bank::{parse_word_list, WordBank};
pub use difficulty::Difficulty;
pub use error::WordError;

/// Supplies random words for a difficulty tier.
pub trait WordSource: Send + 'static {
    /// Returns one word from the tier, or `None` if the tier has no
    /// loaded vocabulary.
    fn get_word(&mut self, difficulty: Difficulty) -> Option<String>;

    /// Returns `true` if [`get_word`](Self::get_word) can succeed for
    /// this tier.
    fn has_vocabulary(&self, difficulty: Difficulty) -> bool;
}

impl<W: WordSource + ?Sized> WordSource for Box<W> {
    fn get_word(&mut self, difficulty: Difficulty) -> Option<String> {
        (**self).get_word(difficulty)
    }

    fn has_vocabulary(&self, difficulty: Difficulty) -> bool {
        (**self).has_vocabulary(difficulty)
    }
}
