//! `DoodleBuilder`: wires config, vocabulary and front-end into a
//! running scheduler.

use doodle_turn::{spawn_scheduler, DisplaySurface, GameOptions, SchedulerHandle, ScoreBoard};
use doodle_words::{WordBank, WordSource};
use tracing::{info, warn};

use crate::{DoodleConfig, DoodleError};

/// Builder for a running game.
///
/// # Example
///
/// ```rust,ignore
/// let handle = DoodleBuilder::new()
///     .config(DoodleConfig::default().apply_env()?)
///     .build(my_display, my_scoreboard)?;
/// handle.start_game(options).await?;
/// ```
pub struct DoodleBuilder {
    config: DoodleConfig,
    words: Option<Box<dyn WordSource>>,
}

impl DoodleBuilder {
    /// Creates a builder with the default config.
    pub fn new() -> Self {
        Self {
            config: DoodleConfig::default(),
            words: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: DoodleConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `words` instead of loading word files from `words_dir`.
    pub fn word_source(mut self, words: impl WordSource) -> Self {
        self.words = Some(Box::new(words));
        self
    }

    /// The game options new games should start with.
    pub fn options(&self) -> &GameOptions {
        &self.config.options
    }

    /// Loads the vocabulary (unless one was supplied) and spawns the
    /// scheduler task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(
        self,
        display: impl DisplaySurface,
        scoreboard: impl ScoreBoard,
    ) -> Result<SchedulerHandle, DoodleError> {
        let words: Box<dyn WordSource> = match self.words {
            Some(words) => words,
            None => {
                let bank = WordBank::load_dir(&self.config.words_dir)?;
                if bank.is_empty() {
                    warn!(
                        dir = %self.config.words_dir.display(),
                        "no word files found, games cannot start"
                    );
                }
                Box::new(bank)
            }
        };

        let handle = spawn_scheduler(words, display, scoreboard, self.config.scheduler_config());
        info!(
            max_rounds = self.config.options.max_rounds,
            difficulty = %self.config.options.difficulty,
            "doodle scheduler ready"
        );
        Ok(handle)
    }
}

impl Default for DoodleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
