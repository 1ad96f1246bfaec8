//! Turn and round scheduling for Doodle.
//!
//! A game is played by two players over a configured number of rounds.
//! Each round has two turns: one player draws a secret word while the
//! other guesses, then the roles swap. The scheduler runs as an isolated
//! Tokio task (actor model) that owns the [`GameSession`], a single
//! phase countdown and the presentation collaborators.
//!
//! # Key types
//!
//! - [`SchedulerHandle`] — send commands to a running scheduler
//! - [`GameOptions`] — per-game settings (rounds, time limits, difficulty)
//! - [`GameSession`] — scores, round counter and roles of one game
//! - [`TurnPhase`] — the scheduler state machine
//! - [`DisplaySurface`] / [`ScoreBoard`] — what the front-end implements

mod error;
mod options;
mod phase;
mod scheduler;
mod session;
mod surface;

pub use doodle_words::{Difficulty, WordSource};
pub use error::TurnError;
pub use options::GameOptions;
pub use phase::TurnPhase;
pub use scheduler::{spawn_scheduler, AnswerVerdict, SchedulerConfig, SchedulerHandle, SessionSnapshot};
pub use session::{GameSession, Outcome, PlayerIndex};
pub use surface::{DisplaySurface, ScoreBoard};
