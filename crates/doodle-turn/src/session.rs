//! The record of one played game.
//!
//! A `GameSession` is created when a game starts and is owned by the
//! scheduler actor for the rest of the game. Front-ends never hold it;
//! they read a [`SessionSnapshot`](crate::SessionSnapshot) instead.

use std::time::Duration;

use doodle_words::Difficulty;
use serde::{Deserialize, Serialize};

use crate::{GameOptions, TurnError};

/// Index of a player: `0` or `1`.
pub type PlayerIndex = usize;

/// Points for a correct guess.
const GUESSER_POINTS: u32 = 1;
/// Points for the player whose drawing was guessed.
const DRAWER_POINTS: u32 = 2;

/// The final comparison of a game's scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(PlayerIndex),
    Tie,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(player) => write!(f, "Player {} wins!", player + 1),
            Self::Tie => write!(f, "It's a tie!"),
        }
    }
}

/// Scores, round counter and roles of a single game.
///
/// Invariants held by every mutation:
/// - `draw_player` and `answer_player` are `0` and `1` in some order.
/// - Scores only ever increase.
/// - `round_number` starts at 1 and grows by exactly 1 per finished round.
#[derive(Debug, Clone)]
pub struct GameSession {
    round_number: u32,
    max_rounds: u32,
    scores: [u32; 2],
    draw_player: PlayerIndex,
    answer_player: PlayerIndex,
    current_word: String,
    draw_time_limit: Duration,
    answer_time_limit: Duration,
    difficulty: Difficulty,
    is_active: bool,
    stop_requested: bool,
}

impl GameSession {
    /// Starts a fresh session: scores (0, 0), round 1, player 0 draws.
    pub fn new(options: &GameOptions) -> Self {
        Self {
            round_number: 1,
            max_rounds: options.max_rounds,
            scores: [0, 0],
            draw_player: 0,
            answer_player: 1,
            current_word: String::new(),
            draw_time_limit: options.draw_time_limit(),
            answer_time_limit: options.answer_time_limit(),
            difficulty: options.difficulty,
            is_active: true,
            stop_requested: false,
        }
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn draw_player(&self) -> PlayerIndex {
        self.draw_player
    }

    pub fn answer_player(&self) -> PlayerIndex {
        self.answer_player
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn draw_time_limit(&self) -> Duration {
        self.draw_time_limit
    }

    pub fn answer_time_limit(&self) -> Duration {
        self.answer_time_limit
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// `true` during the first turn of a round, when player 0 draws.
    pub fn is_first_turn(&self) -> bool {
        self.draw_player == 0
    }

    /// `true` once every configured round has been played.
    pub fn is_exhausted(&self) -> bool {
        self.round_number > self.max_rounds
    }

    /// `true` if the game should end at this round boundary.
    pub fn should_finish(&self) -> bool {
        self.is_exhausted() || self.stop_requested
    }

    /// Case-insensitive comparison of a guess with the secret word.
    /// Surrounding whitespace is ignored.
    pub fn is_correct_guess(&self, guess: &str) -> bool {
        !self.current_word.is_empty()
            && guess.trim().to_lowercase() == self.current_word.trim().to_lowercase()
    }

    /// Compares the two scores.
    pub fn outcome(&self) -> Outcome {
        match self.scores[0].cmp(&self.scores[1]) {
            std::cmp::Ordering::Greater => Outcome::Winner(0),
            std::cmp::Ordering::Less => Outcome::Winner(1),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// Checks that the roles are `0` and `1` in some order.
    pub fn check_roles(&self) -> Result<(), TurnError> {
        let (draw, answer) = (self.draw_player, self.answer_player);
        if draw > 1 || answer > 1 {
            return Err(TurnError::InvariantViolation(format!(
                "player role out of range (draw {draw}, answer {answer})"
            )));
        }
        if draw == answer {
            return Err(TurnError::InvariantViolation(format!(
                "both roles held by player {draw}"
            )));
        }
        Ok(())
    }

    pub(crate) fn set_word(&mut self, word: String) {
        self.current_word = word;
    }

    pub(crate) fn swap_roles(&mut self) {
        std::mem::swap(&mut self.draw_player, &mut self.answer_player);
    }

    /// +1 to the guesser, +2 to the drawer.
    pub(crate) fn award_correct_guess(&mut self) {
        self.scores[self.answer_player] += GUESSER_POINTS;
        self.scores[self.draw_player] += DRAWER_POINTS;
    }

    pub(crate) fn advance_round(&mut self) {
        self.round_number += 1;
    }

    pub(crate) fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(max_rounds: u32) -> GameSession {
        GameSession::new(&GameOptions {
            max_rounds,
            draw_time_limit_secs: 5,
            answer_time_limit_secs: 5,
            difficulty: Difficulty::Easy,
        })
    }

    #[test]
    fn test_new_session_initial_state() {
        let s = session(2);
        assert_eq!(s.round_number(), 1);
        assert_eq!(s.scores(), [0, 0]);
        assert_eq!(s.draw_player(), 0);
        assert_eq!(s.answer_player(), 1);
        assert!(s.is_active());
        assert!(!s.stop_requested());
        assert!(s.is_first_turn());
        assert!(s.check_roles().is_ok());
    }

    #[test]
    fn test_award_correct_guess_first_turn() {
        let mut s = session(1);
        s.award_correct_guess();
        assert_eq!(s.scores(), [2, 1]);
    }

    #[test]
    fn test_award_correct_guess_second_turn() {
        let mut s = session(1);
        s.swap_roles();
        s.award_correct_guess();
        assert_eq!(s.scores(), [1, 2]);
    }

    #[test]
    fn test_swap_roles_twice_restores() {
        let mut s = session(1);
        s.swap_roles();
        assert_eq!((s.draw_player(), s.answer_player()), (1, 0));
        assert!(!s.is_first_turn());
        s.swap_roles();
        assert_eq!((s.draw_player(), s.answer_player()), (0, 1));
        assert_eq!(s.draw_player() + s.answer_player(), 1);
    }

    #[test]
    fn test_exhausted_after_last_round() {
        let mut s = session(2);
        assert!(!s.is_exhausted());
        s.advance_round();
        assert!(!s.is_exhausted());
        s.advance_round();
        assert!(s.is_exhausted());
        assert!(s.should_finish());
    }

    #[test]
    fn test_stop_request_finishes_at_boundary() {
        let mut s = session(5);
        s.request_stop();
        assert!(!s.is_exhausted());
        assert!(s.should_finish());
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        let mut s = session(1);
        s.set_word("Cat".into());
        assert!(s.is_correct_guess("cat"));
        assert!(s.is_correct_guess("  CAT "));
        assert!(!s.is_correct_guess("cats"));
    }

    #[test]
    fn test_empty_word_never_matches() {
        let s = session(1);
        assert!(!s.is_correct_guess(""));
    }

    #[test]
    fn test_outcome() {
        let mut s = session(1);
        assert_eq!(s.outcome(), Outcome::Tie);
        s.award_correct_guess();
        assert_eq!(s.outcome(), Outcome::Winner(0));
        s.swap_roles();
        s.award_correct_guess();
        assert_eq!(s.outcome(), Outcome::Tie);
        s.award_correct_guess();
        assert_eq!(s.outcome(), Outcome::Winner(1));
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(Outcome::Winner(0).to_string(), "Player 1 wins!");
        assert_eq!(Outcome::Winner(1).to_string(), "Player 2 wins!");
        assert_eq!(Outcome::Tie.to_string(), "It's a tie!");
    }

    #[test]
    fn test_check_roles_rejects_equal_roles() {
        let mut s = session(1);
        s.answer_player = 0;
        assert!(matches!(s.check_roles(), Err(TurnError::InvariantViolation(_))));
    }

    #[test]
    fn test_check_roles_rejects_out_of_range() {
        let mut s = session(1);
        s.draw_player = 2;
        assert!(matches!(s.check_roles(), Err(TurnError::InvariantViolation(_))));
    }
}
