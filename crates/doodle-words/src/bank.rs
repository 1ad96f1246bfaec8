//! In-memory word table loaded from word files.

use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::{Difficulty, WordError, WordSource};

/// Parses a comma separated word list.
///
/// Word files hold one comma separated row; if a file has several
/// non-empty rows, the last one is the vocabulary. Entries are trimmed
/// and empty entries dropped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .last()
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Words per difficulty tier, with its own random number generator.
pub struct WordBank {
    words: HashMap<Difficulty, Vec<String>>,
    rng: StdRng,
}

impl WordBank {
    /// Creates an empty bank seeded from the OS.
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an empty bank with a fixed seed, for reproducible picks.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            words: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replaces the vocabulary of a tier.
    pub fn insert_words<I, S>(&mut self, difficulty: Difficulty, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list: Vec<String> = words.into_iter().map(Into::into).collect();
        debug!(%difficulty, count = list.len(), "vocabulary set");
        self.words.insert(difficulty, list);
    }

    /// Builder-style variant of [`insert_words`](Self::insert_words).
    pub fn with_words<I, S>(mut self, difficulty: Difficulty, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_words(difficulty, words);
        self
    }

    /// Loads `dir/<tier>mode.txt` into the bank.
    ///
    /// Returns the number of words loaded.
    pub fn load_tier(&mut self, dir: &Path, difficulty: Difficulty) -> Result<usize, WordError> {
        let path = dir.join(difficulty.file_name());
        let text = std::fs::read_to_string(&path).map_err(|source| WordError::Io {
            path: path.clone(),
            source,
        })?;
        let list = parse_word_list(&text);
        if list.is_empty() {
            return Err(WordError::EmptyList(difficulty));
        }
        let count = list.len();
        self.words.insert(difficulty, list);
        info!(%difficulty, count, path = %path.display(), "word file loaded");
        Ok(count)
    }

    /// Loads every tier whose word file exists in `dir`.
    ///
    /// Missing files are skipped; unreadable or empty files are errors.
    pub fn load_dir(dir: &Path) -> Result<Self, WordError> {
        let mut bank = Self::new();
        for difficulty in Difficulty::ALL {
            if !dir.join(difficulty.file_name()).exists() {
                debug!(%difficulty, dir = %dir.display(), "no word file for tier");
                continue;
            }
            bank.load_tier(dir, difficulty)?;
        }
        Ok(bank)
    }

    /// The vocabulary of a tier (empty if none is loaded).
    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        self.words
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of words loaded for a tier.
    pub fn len(&self, difficulty: Difficulty) -> usize {
        self.words(difficulty).len()
    }

    /// Returns `true` if no tier has any words.
    pub fn is_empty(&self) -> bool {
        self.words.values().all(Vec::is_empty)
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSource for WordBank {
    fn get_word(&mut self, difficulty: Difficulty) -> Option<String> {
        let list = self.words.get(&difficulty)?;
        let word = list.choose(&mut self.rng).cloned();
        if let Some(w) = &word {
            debug!(%difficulty, len = w.len(), "word picked");
        }
        word
    }

    fn has_vocabulary(&self, difficulty: Difficulty) -> bool {
        !self.words(difficulty).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_row() {
        assert_eq!(
            parse_word_list("cat, dog ,house"),
            vec!["cat", "dog", "house"]
        );
    }

    #[test]
    fn test_parse_last_row_wins() {
        let text = "apple,pear\n\nsun,moon\n\n";
        assert_eq!(parse_word_list(text), vec!["sun", "moon"]);
    }

    #[test]
    fn test_parse_drops_empty_entries() {
        assert_eq!(parse_word_list("a,,b,"), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_word_list("").is_empty());
        assert!(parse_word_list("\n  \n").is_empty());
    }

    #[test]
    fn test_get_word_from_tier() {
        let mut bank = WordBank::with_seed(7).with_words(Difficulty::Easy, ["cat", "dog"]);
        for _ in 0..20 {
            let w = bank.get_word(Difficulty::Easy).unwrap();
            assert!(w == "cat" || w == "dog");
        }
    }

    #[test]
    fn test_get_word_missing_tier() {
        let mut bank = WordBank::with_seed(1).with_words(Difficulty::Easy, ["cat"]);
        assert_eq!(bank.get_word(Difficulty::Hard), None);
        assert!(!bank.has_vocabulary(Difficulty::Hard));
        assert!(bank.has_vocabulary(Difficulty::Easy));
    }

    #[test]
    fn test_empty_tier_has_no_vocabulary() {
        let mut bank = WordBank::with_seed(1).with_words(Difficulty::Hard, Vec::<String>::new());
        assert!(!bank.has_vocabulary(Difficulty::Hard));
        assert_eq!(bank.get_word(Difficulty::Hard), None);
    }

    #[test]
    fn test_same_seed_same_picks() {
        let words = ["a", "b", "c", "d", "e", "f"];
        let mut one = WordBank::with_seed(42).with_words(Difficulty::Easy, words);
        let mut two = WordBank::with_seed(42).with_words(Difficulty::Easy, words);
        for _ in 0..10 {
            assert_eq!(one.get_word(Difficulty::Easy), two.get_word(Difficulty::Easy));
        }
    }
}
