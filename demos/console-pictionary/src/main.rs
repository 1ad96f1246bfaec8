use std::path::Path;
use std::time::Duration;

use doodle::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

// ---------------------------------------------------------------------------
// Console front-end
// ---------------------------------------------------------------------------

/// Players are numbered from 1 on screen.
fn label(player: PlayerIndex) -> usize {
    player + 1
}

struct ConsoleDisplay;

impl DisplaySurface for ConsoleDisplay {
    fn clear_canvas(&mut self) {
        println!("---------------- new canvas ----------------");
    }

    fn show_word_prompt(&mut self, player: PlayerIndex, word: &str, duration: Duration) {
        // A shared terminal can't hide the word from the guesser.
        println!(
            "Player {}: draw \"{word}\" ({}s). Player {}, look away!",
            label(player),
            duration.as_secs(),
            label(1 - player),
        );
    }

    fn show_answer_prompt(&mut self, player: PlayerIndex, duration: Duration) {
        println!(
            "Player {}: type `{}: <guess>` ({}s)",
            label(player),
            label(player),
            duration.as_secs()
        );
    }

    fn close_answer_prompt(&mut self, player: PlayerIndex) {
        println!("Answer window for player {} closed.", label(player));
    }

    fn answer_rejected(&mut self, player: PlayerIndex, guess: &str) {
        println!("Player {}: \"{guess}\" is wrong, try again.", label(player));
    }

    fn show_countdown(&mut self, phase: TurnPhase, remaining_secs: u64) {
        if remaining_secs <= 3 || remaining_secs % 10 == 0 {
            println!("  [{phase}] {remaining_secs}s left");
        }
    }

    fn notice(&mut self, text: &str) {
        println!("! {text}");
    }
}

struct ConsoleBoard;

impl ScoreBoard for ConsoleBoard {
    fn update(&mut self, round_number: u32, draw_player: PlayerIndex, scores: [u32; 2]) {
        println!(
            "Round {round_number} | drawing: player {} | scores {} - {}",
            label(draw_player),
            scores[0],
            scores[1]
        );
    }

    fn show_result(&mut self, winner_text: &str, scores: [u32; 2]) {
        println!("Game over: {winner_text} (final {} - {})", scores[0], scores[1]);
        println!("Type `start` to play again or `quit` to leave.");
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum Command {
    Start,
    Skip,
    Stop,
    Status,
    Help,
    Quit,
    Guess { player: PlayerIndex, text: String },
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "start" => return Ok(Command::Start),
        "skip" => return Ok(Command::Skip),
        "stop" => return Ok(Command::Stop),
        "status" => return Ok(Command::Status),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let (who, guess) = line
        .split_once(':')
        .ok_or_else(|| format!("unknown command: {line}"))?;
    let player = match who.trim() {
        "1" => 0,
        "2" => 1,
        other => return Err(format!("unknown player: {other}")),
    };
    let text = guess.trim();
    if text.is_empty() {
        return Err("empty guess".into());
    }
    Ok(Command::Guess {
        player,
        text: text.to_string(),
    })
}

const HELP: &str = "commands: start | skip | stop | status | quit | <player>: <guess>";

fn print_status(snap: &SessionSnapshot) {
    println!(
        "{} | round {}/{} | scores {} - {} | drawing: player {}{}",
        snap.phase,
        snap.round_number,
        snap.max_rounds,
        snap.scores[0],
        snap.scores[1],
        label(snap.draw_player),
        snap.remaining_secs
            .map(|s| format!(" | {s}s left"))
            .unwrap_or_default(),
    );
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// Defaults with the bundled word lists, wherever the demo is run from.
fn default_config() -> DoodleConfig {
    DoodleConfig {
        words_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("words"),
        ..DoodleConfig::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => DoodleConfig::from_file(Path::new(&path))?,
        None => default_config(),
    }
    .apply_env()?;
    init_tracing(&config.log_filter);

    let options = config.options.clone();
    let handle = DoodleBuilder::new()
        .config(config)
        .build(ConsoleDisplay, ConsoleBoard)?;

    println!("Doodle: a two-player drawing and guessing game.");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(reason) => {
                println!("? {reason}");
                continue;
            }
        };

        let result = match cmd {
            Command::Start => handle.start_game(options.clone()).await,
            Command::Skip => handle.skip_turn().await,
            Command::Stop => handle.request_stop().await,
            Command::Status => handle.snapshot().await.map(|snap| print_status(&snap)),
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
            Command::Guess { player, text } => {
                handle.submit_answer(player, text).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => {}
            // Already shown by the display as a notice.
            Err(TurnError::InvalidStateTransition(_)) | Err(TurnError::MissingVocabulary(_)) => {}
            Err(err) => {
                tracing::debug!(%err, "command failed");
                println!("? {err}");
            }
        }
    }

    let _ = handle.shutdown().await;
    Ok(())
}
