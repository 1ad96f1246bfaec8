//! End-to-end tests through the `doodle` meta crate.

use std::path::PathBuf;
use std::time::Duration;

use doodle::prelude::*;
use doodle::ClockSettings;
use tokio::sync::mpsc;

// =========================================================================
// Minimal front-end
// =========================================================================

#[derive(Debug, PartialEq)]
enum Shown {
    Word(PlayerIndex, String),
    Answer(PlayerIndex),
    Notice(String),
    Result(String, [u32; 2]),
}

struct Display(mpsc::UnboundedSender<Shown>);

impl DisplaySurface for Display {
    fn clear_canvas(&mut self) {}

    fn show_word_prompt(&mut self, player: PlayerIndex, word: &str, _duration: Duration) {
        let _ = self.0.send(Shown::Word(player, word.to_string()));
    }

    fn show_answer_prompt(&mut self, player: PlayerIndex, _duration: Duration) {
        let _ = self.0.send(Shown::Answer(player));
    }

    fn close_answer_prompt(&mut self, _player: PlayerIndex) {}

    fn notice(&mut self, text: &str) {
        let _ = self.0.send(Shown::Notice(text.to_string()));
    }
}

struct Board(mpsc::UnboundedSender<Shown>);

impl ScoreBoard for Board {
    fn update(&mut self, _round: u32, _draw_player: PlayerIndex, _scores: [u32; 2]) {}

    fn show_result(&mut self, winner_text: &str, scores: [u32; 2]) {
        let _ = self.0.send(Shown::Result(winner_text.to_string(), scores));
    }
}

fn front_end() -> (Display, Board, mpsc::UnboundedReceiver<Shown>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Display(tx.clone()), Board(tx), rx)
}

fn words_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("doodle-builder-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn quick_config(dir: PathBuf) -> DoodleConfig {
    DoodleConfig {
        words_dir: dir,
        options: GameOptions {
            max_rounds: 1,
            draw_time_limit_secs: 2,
            answer_time_limit_secs: 2,
            difficulty: Difficulty::Easy,
        },
        clock: ClockSettings {
            tick_interval_ms: 500,
        },
        ..DoodleConfig::default()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_build_loads_word_files_and_plays() {
    let dir = words_dir("plays");
    std::fs::write(dir.join("easymode.txt"), "kite").unwrap();

    let builder = DoodleBuilder::new().config(quick_config(dir));
    let options = builder.options().clone();
    let (display, board, mut rx) = front_end();
    let handle = builder.build(display, board).unwrap();

    handle.start_game(options).await.unwrap();
    assert_eq!(rx.recv().await.unwrap(), Shown::Word(0, "kite".into()));
    assert_eq!(rx.recv().await.unwrap(), Shown::Answer(1));
    assert_eq!(
        handle.submit_answer(1, "KITE").await.unwrap(),
        AnswerVerdict::Correct
    );
    assert_eq!(rx.recv().await.unwrap(), Shown::Word(1, "kite".into()));
    assert_eq!(rx.recv().await.unwrap(), Shown::Answer(0));
    assert_eq!(
        rx.recv().await.unwrap(),
        Shown::Result("Player 1 wins!".into(), [2, 1])
    );
}

#[tokio::test(start_paused = true)]
async fn test_build_without_word_files_cannot_start() {
    let dir = words_dir("empty");
    let builder = DoodleBuilder::new().config(quick_config(dir));
    let options = builder.options().clone();
    let (display, board, mut rx) = front_end();
    let handle = builder.build(display, board).unwrap();

    let err = handle.start_game(options).await.unwrap_err();
    assert_eq!(err, TurnError::MissingVocabulary(Difficulty::Easy));
    assert!(matches!(rx.recv().await.unwrap(), Shown::Notice(_)));
}

#[tokio::test(start_paused = true)]
async fn test_supplied_word_source_skips_file_loading() {
    let config = quick_config(PathBuf::from("/no/such/dir"));
    let bank = WordBank::with_seed(3).with_words(Difficulty::Easy, ["boat"]);
    let (display, board, mut rx) = front_end();
    let handle = DoodleBuilder::new()
        .config(config.clone())
        .word_source(bank)
        .build(display, board)
        .unwrap();

    handle.start_game(config.options).await.unwrap();
    assert_eq!(rx.recv().await.unwrap(), Shown::Word(0, "boat".into()));
}

#[tokio::test(start_paused = true)]
async fn test_unreadable_words_dir_entry_is_error() {
    let dir = words_dir("broken");
    // A directory where a word file is expected cannot be read as text.
    std::fs::create_dir_all(dir.join("hardmode.txt")).unwrap();

    let (display, board, _rx) = front_end();
    let err = DoodleBuilder::new()
        .config(quick_config(dir))
        .build(display, board)
        .err()
        .expect("loading should fail");
    assert!(matches!(err, DoodleError::Words(_)));
}
