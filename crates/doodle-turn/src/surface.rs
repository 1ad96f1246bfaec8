//! Presentation collaborators.
//!
//! These are the two traits a front-end implements. The scheduler calls
//! them from its own task, in transition order; implementations should
//! return quickly (forward to a channel, repaint, etc.).

use std::time::Duration;

use crate::{PlayerIndex, TurnPhase};

/// Shows prompts to the players.
///
/// Answer text does not come back through this trait: the front-end
/// forwards what the guessing player types with
/// [`SchedulerHandle::submit_answer`](crate::SchedulerHandle::submit_answer).
pub trait DisplaySurface: Send + 'static {
    /// Clears the shared drawing canvas. Called at the start of every
    /// draw turn.
    fn clear_canvas(&mut self);

    /// Reveals the secret word to the drawing player only.
    fn show_word_prompt(&mut self, player: PlayerIndex, word: &str, duration: Duration);

    /// Opens the answer-entry prompt for the guessing player.
    fn show_answer_prompt(&mut self, player: PlayerIndex, duration: Duration);

    /// Closes the answer-entry prompt, after a match or when time is up.
    fn close_answer_prompt(&mut self, player: PlayerIndex);

    /// Called for each wrong guess. The prompt stays open. Default: no-op.
    fn answer_rejected(&mut self, _player: PlayerIndex, _guess: &str) {}

    /// Called once per countdown tick with the seconds left in the
    /// phase. Default: no-op.
    fn show_countdown(&mut self, _phase: TurnPhase, _remaining_secs: u64) {}

    /// Shows a user-facing notice, e.g. a rejected command.
    fn notice(&mut self, text: &str);
}

/// Shows the scores, the round counter and the final result.
pub trait ScoreBoard: Send + 'static {
    /// Called at game start and after every turn.
    fn update(&mut self, round_number: u32, draw_player: PlayerIndex, scores: [u32; 2]);

    /// Called once when the game finishes.
    fn show_result(&mut self, winner_text: &str, scores: [u32; 2]);
}
