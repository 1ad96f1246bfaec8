//! Per-game options.

use std::time::Duration;

use doodle_words::Difficulty;
use serde::{Deserialize, Serialize};

use crate::TurnError;

/// Settings for one game, supplied to `start_game` and fixed for the
/// whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Number of rounds to play. Each round is two turns.
    pub max_rounds: u32,

    /// Seconds the drawing player gets. The draw phase always runs for
    /// its full length unless the turn is skipped.
    pub draw_time_limit_secs: u64,

    /// Seconds the guessing player gets to answer.
    pub answer_time_limit_secs: u64,

    /// Vocabulary tier words are drawn from.
    pub difficulty: Difficulty,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            draw_time_limit_secs: 60,
            answer_time_limit_secs: 30,
            difficulty: Difficulty::Easy,
        }
    }
}

impl GameOptions {
    /// Rejects zero round counts and zero time limits.
    pub fn validate(&self) -> Result<(), TurnError> {
        if self.max_rounds == 0 {
            return Err(TurnError::InvalidOptions("max_rounds must be positive".into()));
        }
        if self.draw_time_limit_secs == 0 {
            return Err(TurnError::InvalidOptions(
                "draw_time_limit_secs must be positive".into(),
            ));
        }
        if self.answer_time_limit_secs == 0 {
            return Err(TurnError::InvalidOptions(
                "answer_time_limit_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn draw_time_limit(&self) -> Duration {
        Duration::from_secs(self.draw_time_limit_secs)
    }

    pub fn answer_time_limit(&self) -> Duration {
        Duration::from_secs(self.answer_time_limit_secs)
    }
}
