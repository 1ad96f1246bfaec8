//! Error types for the turn scheduler.

use doodle_words::Difficulty;

/// Errors that can occur while driving a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The command is not allowed in the current phase, e.g. starting a
    /// game while one is running or skipping while idle. Nothing changed.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Player roles are out of range or equal. This is a bug, not a user
    /// error; the scheduler stops after reporting it.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The word source has no vocabulary for the requested tier.
    #[error("no vocabulary loaded for {0} difficulty")]
    MissingVocabulary(Difficulty),

    /// The game options contain a zero round count or time limit.
    #[error("invalid game options: {0}")]
    InvalidOptions(String),

    /// An answer was submitted while no answer window was open.
    #[error("no answer window is open")]
    NoAnswerWindow,

    /// An answer was submitted by the player who is not guessing.
    #[error("player {0} is not the guessing player")]
    NotAnswerPlayer(usize),

    /// The scheduler task is gone or its command channel is closed.
    #[error("turn scheduler is unavailable")]
    Unavailable,
}

impl TurnError {
    /// Returns `true` for errors that stop the scheduler.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
