//! # Doodle
//!
//! A two-player draw-and-guess game engine. One player draws a secret
//! word while the other guesses; roles swap every turn, and after the
//! configured number of rounds the higher score wins.
//!
//! The engine owns the timing and scoring. A front-end implements
//! [`DisplaySurface`] and [`ScoreBoard`] and forwards player input
//! through a [`SchedulerHandle`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use doodle::prelude::*;
//!
//! let config = DoodleConfig::default().apply_env()?;
//! init_tracing(&config.log_filter);
//! let options = config.options.clone();
//! let handle = DoodleBuilder::new().config(config).build(display, scoreboard)?;
//! handle.start_game(options).await?;
//! ```

mod builder;
mod config;
mod error;
mod logging;

pub use builder::DoodleBuilder;
pub use config::{ClockSettings, DoodleConfig};
pub use error::{ConfigError, DoodleError};
pub use logging::init_tracing;

pub mod prelude {
    pub use crate::{init_tracing, DoodleBuilder, DoodleConfig, DoodleError};
    pub use doodle_turn::{
        AnswerVerdict, Difficulty, DisplaySurface, GameOptions, Outcome, PlayerIndex,
        SchedulerHandle, ScoreBoard, SessionSnapshot, TurnError, TurnPhase,
    };
    pub use doodle_words::{WordBank, WordSource};
}
