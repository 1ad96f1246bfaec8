//! Loading word banks from `<tier>mode.txt` files on disk.

use std::path::PathBuf;

use doodle_words::{Difficulty, WordBank, WordError, WordSource};

// =========================================================================
// Helper
// =========================================================================

/// Creates a fresh, empty scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("doodle-words-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_load_dir_reads_both_tiers() {
    let dir = scratch_dir("both");
    std::fs::write(dir.join("easymode.txt"), "cat,dog,sun\n").unwrap();
    std::fs::write(dir.join("hardmode.txt"), "lighthouse,saxophone").unwrap();

    let bank = WordBank::load_dir(&dir).unwrap();
    assert_eq!(bank.len(Difficulty::Easy), 3);
    assert_eq!(bank.len(Difficulty::Hard), 2);
    assert_eq!(bank.words(Difficulty::Hard), ["lighthouse", "saxophone"]);
}

#[test]
fn test_load_dir_skips_missing_tier() {
    let dir = scratch_dir("missing");
    std::fs::write(dir.join("easymode.txt"), "cat").unwrap();

    let mut bank = WordBank::load_dir(&dir).unwrap();
    assert!(bank.has_vocabulary(Difficulty::Easy));
    assert!(!bank.has_vocabulary(Difficulty::Hard));
    assert_eq!(bank.get_word(Difficulty::Hard), None);
}

#[test]
fn test_load_dir_empty_directory() {
    let dir = scratch_dir("empty");
    let bank = WordBank::load_dir(&dir).unwrap();
    assert!(bank.is_empty());
}

#[test]
fn test_load_tier_empty_file_is_error() {
    let dir = scratch_dir("blank");
    std::fs::write(dir.join("hardmode.txt"), "\n , ,\n").unwrap();

    let mut bank = WordBank::new();
    let err = bank.load_tier(&dir, Difficulty::Hard).unwrap_err();
    assert!(matches!(err, WordError::EmptyList(Difficulty::Hard)));
}

#[test]
fn test_load_tier_missing_file_is_io_error() {
    let dir = scratch_dir("nofile");
    let mut bank = WordBank::new();
    let err = bank.load_tier(&dir, Difficulty::Easy).unwrap_err();
    match err {
        WordError::Io { path, .. } => assert!(path.ends_with("easymode.txt")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_difficulty_serde_lowercase() {
    let json = serde_json::to_string(&Difficulty::Hard).unwrap();
    assert_eq!(json, "\"hard\"");
    let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
    assert_eq!(back, Difficulty::Easy);
}
