//! Application configuration.
//!
//! Loaded from an optional JSON file, then overridden from environment
//! variables:
//!
//! - `DOODLE_WORDS_DIR`: directory holding `easymode.txt` / `hardmode.txt`
//! - `DOODLE_MAX_ROUNDS`: rounds per game
//! - `DOODLE_DRAW_SECS`: draw time limit in seconds
//! - `DOODLE_ANSWER_SECS`: answer time limit in seconds
//! - `DOODLE_DIFFICULTY`: `easy` or `hard`
//! - `DOODLE_LOG`: default log filter (`RUST_LOG` still wins)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use doodle_clock::ClockConfig;
use doodle_turn::{GameOptions, SchedulerConfig};
use doodle_words::Difficulty;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Countdown settings as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Milliseconds between countdown ticks. Default: 1000.
    pub tick_interval_ms: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
        }
    }
}

/// Everything needed to build a running game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoodleConfig {
    /// Directory the word files are loaded from.
    pub words_dir: PathBuf,
    /// Options for new games.
    pub options: GameOptions,
    pub clock: ClockSettings,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Scheduler command channel capacity.
    pub channel_size: usize,
}

impl Default for DoodleConfig {
    fn default() -> Self {
        Self {
            words_dir: PathBuf::from("words"),
            options: GameOptions::default(),
            clock: ClockSettings::default(),
            log_filter: "doodle=info,doodle_turn=info,doodle_words=info".to_string(),
            channel_size: 64,
        }
    }
}

impl DoodleConfig {
    /// Parses a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to
    /// its value.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DOODLE_WORDS_DIR") {
            self.words_dir = PathBuf::from(dir);
        }
        if let Some(v) = lookup("DOODLE_MAX_ROUNDS") {
            self.options.max_rounds = parse_env("DOODLE_MAX_ROUNDS", v)?;
        }
        if let Some(v) = lookup("DOODLE_DRAW_SECS") {
            self.options.draw_time_limit_secs = parse_env("DOODLE_DRAW_SECS", v)?;
        }
        if let Some(v) = lookup("DOODLE_ANSWER_SECS") {
            self.options.answer_time_limit_secs = parse_env("DOODLE_ANSWER_SECS", v)?;
        }
        if let Some(v) = lookup("DOODLE_DIFFICULTY") {
            self.options.difficulty = parse_env::<Difficulty>("DOODLE_DIFFICULTY", v)?;
        }
        if let Some(filter) = lookup("DOODLE_LOG") {
            self.log_filter = filter;
        }
        Ok(self)
    }

    /// Scheduler task settings derived from this config.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            clock: ClockConfig::with_interval(Duration::from_millis(self.clock.tick_interval_ms)),
            channel_size: self.channel_size,
        }
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let cfg = DoodleConfig::default();
        assert_eq!(cfg.words_dir, PathBuf::from("words"));
        assert_eq!(cfg.options, GameOptions::default());
        assert_eq!(cfg.clock.tick_interval_ms, 1_000);
        assert_eq!(cfg.channel_size, 64);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = DoodleConfig::from_json_str(
            r#"{ "words_dir": "/srv/words", "options": { "max_rounds": 5 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.words_dir, PathBuf::from("/srv/words"));
        assert_eq!(cfg.options.max_rounds, 5);
        assert_eq!(cfg.options.answer_time_limit_secs, 30);
        assert_eq!(cfg.clock, ClockSettings::default());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = DoodleConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DoodleConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let cfg = DoodleConfig::default()
            .apply_env_from(env(&[
                ("DOODLE_WORDS_DIR", "assets"),
                ("DOODLE_MAX_ROUNDS", "4"),
                ("DOODLE_DRAW_SECS", " 45 "),
                ("DOODLE_ANSWER_SECS", "20"),
                ("DOODLE_DIFFICULTY", "Hard"),
                ("DOODLE_LOG", "debug"),
            ]))
            .unwrap();
        assert_eq!(cfg.words_dir, PathBuf::from("assets"));
        assert_eq!(cfg.options.max_rounds, 4);
        assert_eq!(cfg.options.draw_time_limit_secs, 45);
        assert_eq!(cfg.options.answer_time_limit_secs, 20);
        assert_eq!(cfg.options.difficulty, Difficulty::Hard);
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_invalid_env_value() {
        let err = DoodleConfig::default()
            .apply_env_from(env(&[("DOODLE_MAX_ROUNDS", "lots")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, value } => {
                assert_eq!(var, "DOODLE_MAX_ROUNDS");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidEnv, got {other:?}"),
        }
    }

    #[test]
    fn test_scheduler_config_uses_clock_settings() {
        let cfg = DoodleConfig {
            clock: ClockSettings {
                tick_interval_ms: 250,
            },
            channel_size: 8,
            ..DoodleConfig::default()
        };
        let sched = cfg.scheduler_config();
        assert_eq!(sched.clock.tick_interval, Duration::from_millis(250));
        assert_eq!(sched.channel_size, 8);
    }
}
