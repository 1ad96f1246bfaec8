//! Scheduler actor: an isolated Tokio task that owns one game at a time.
//!
//! The task communicates with the outside world through an mpsc channel
//! and waits on a single phase countdown. Commands and countdown ticks
//! are handled one at a time, so every transition sees a consistent
//! session and cancels the countdown it replaces.

use doodle_clock::{ClockConfig, Countdown, CountdownTick};
use doodle_words::WordSource;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::{
    DisplaySurface, GameOptions, GameSession, Outcome, PlayerIndex, ScoreBoard, TurnError,
    TurnPhase,
};

/// Default command channel size for scheduler actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Settings for the scheduler task itself (not the game).
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Countdown settings. The tick interval drives `show_countdown`.
    pub clock: ClockConfig,
    /// Command channel capacity; senders wait when it is full.
    pub channel_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}

/// Result of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerVerdict {
    /// The guess matched. Points were awarded and the turn ended.
    Correct,
    /// The guess did not match. The answer window stays open.
    Incorrect,
}

/// A read-only view of the scheduler, safe to show to both players.
///
/// The secret word is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: TurnPhase,
    pub round_number: u32,
    pub max_rounds: u32,
    pub scores: [u32; 2],
    pub draw_player: PlayerIndex,
    pub answer_player: PlayerIndex,
    pub is_active: bool,
    pub stop_requested: bool,
    /// Whole seconds left in the current timed phase.
    pub remaining_secs: Option<u64>,
    /// Result of the most recent finished game.
    pub outcome: Option<Outcome>,
}

/// Commands sent to the scheduler actor through its channel.
pub(crate) enum SchedulerCommand {
    StartGame {
        options: GameOptions,
        reply: oneshot::Sender<Result<(), TurnError>>,
    },
    SubmitAnswer {
        player: PlayerIndex,
        text: String,
        reply: oneshot::Sender<Result<AnswerVerdict, TurnError>>,
    },
    SkipTurn {
        reply: oneshot::Sender<Result<(), TurnError>>,
    },
    RequestStop {
        reply: oneshot::Sender<Result<(), TurnError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// Handle to a running scheduler. Cheap to clone.
#[derive(Clone)]
pub struct SchedulerHandle {
    sender: mpsc::Sender<SchedulerCommand>,
}

impl SchedulerHandle {
    /// Starts a new game with the given options.
    pub async fn start_game(&self, options: GameOptions) -> Result<(), TurnError> {
        let (reply, rx) = oneshot::channel();
        self.send(SchedulerCommand::StartGame { options, reply }).await?;
        rx.await.map_err(|_| TurnError::Unavailable)?
    }

    /// Submits a guess on behalf of `player`.
    pub async fn submit_answer(
        &self,
        player: PlayerIndex,
        text: impl Into<String>,
    ) -> Result<AnswerVerdict, TurnError> {
        let (reply, rx) = oneshot::channel();
        self.send(SchedulerCommand::SubmitAnswer {
            player,
            text: text.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| TurnError::Unavailable)?
    }

    /// Ends the current draw turn early, as if its time had run out.
    pub async fn skip_turn(&self) -> Result<(), TurnError> {
        let (reply, rx) = oneshot::channel();
        self.send(SchedulerCommand::SkipTurn { reply }).await?;
        rx.await.map_err(|_| TurnError::Unavailable)?
    }

    /// Asks the game to finish once the current round completes.
    pub async fn request_stop(&self) -> Result<(), TurnError> {
        let (reply, rx) = oneshot::channel();
        self.send(SchedulerCommand::RequestStop { reply }).await?;
        rx.await.map_err(|_| TurnError::Unavailable)?
    }

    /// Returns a snapshot of the scheduler state.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, TurnError> {
        let (reply, rx) = oneshot::channel();
        self.send(SchedulerCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| TurnError::Unavailable)
    }

    /// Tells the scheduler task to stop.
    pub async fn shutdown(&self) -> Result<(), TurnError> {
        self.send(SchedulerCommand::Shutdown).await
    }

    /// Returns `true` once the scheduler task has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn send(&self, cmd: SchedulerCommand) -> Result<(), TurnError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| TurnError::Unavailable)
    }
}

/// Forwards a command result to its caller. Fatal errors are handed
/// back so the run loop can stop.
fn settle<T>(
    reply: oneshot::Sender<Result<T, TurnError>>,
    result: Result<T, TurnError>,
) -> Result<(), TurnError> {
    match result {
        Err(err) if err.is_fatal() => {
            let _ = reply.send(Err(err.clone()));
            Err(err)
        }
        other => {
            let _ = reply.send(other);
            Ok(())
        }
    }
}

fn no_session(phase: TurnPhase) -> TurnError {
    TurnError::InvariantViolation(format!("no session while {phase}"))
}

/// The internal scheduler state. Runs inside a Tokio task.
struct TurnScheduler<W, D, S> {
    phase: TurnPhase,
    session: Option<GameSession>,
    last_outcome: Option<Outcome>,
    countdown: Countdown,
    words: W,
    display: D,
    scoreboard: S,
    receiver: mpsc::Receiver<SchedulerCommand>,
}

impl<W, D, S> TurnScheduler<W, D, S>
where
    W: WordSource,
    D: DisplaySurface,
    S: ScoreBoard,
{
    /// Runs the actor loop until shutdown, a closed channel, or a fatal
    /// error.
    async fn run(mut self) {
        info!("turn scheduler started");

        loop {
            // Commands queued before a deadline are handled before its expiry.
            let result = tokio::select! {
                biased;

                cmd = self.receiver.recv() => match cmd {
                    Some(SchedulerCommand::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                tick = self.countdown.wait_for_tick() => self.handle_tick(tick),
            };

            if let Err(err) = result {
                self.abort(&err);
                break;
            }
        }

        self.countdown.cancel();
        info!(phase = %self.phase, "turn scheduler stopped");
    }

    fn handle_command(&mut self, cmd: SchedulerCommand) -> Result<(), TurnError> {
        match cmd {
            SchedulerCommand::StartGame { options, reply } => {
                let result = self.handle_start(options);
                settle(reply, result)
            }
            SchedulerCommand::SubmitAnswer {
                player,
                text,
                reply,
            } => {
                let result = self.handle_answer(player, &text);
                settle(reply, result)
            }
            SchedulerCommand::SkipTurn { reply } => {
                let result = self.handle_skip();
                settle(reply, result)
            }
            SchedulerCommand::RequestStop { reply } => {
                let result = self.handle_stop();
                settle(reply, result)
            }
            SchedulerCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
                Ok(())
            }
            // Handled by the run loop.
            SchedulerCommand::Shutdown => Ok(()),
        }
    }

    fn handle_tick(&mut self, tick: CountdownTick) -> Result<(), TurnError> {
        if !tick.expired {
            self.display.show_countdown(self.phase, tick.remaining_secs());
            return Ok(());
        }

        match self.phase {
            TurnPhase::Drawing => self.enter_answering(),
            TurnPhase::Answering => {
                let session = self.session.as_ref().ok_or_else(|| no_session(self.phase))?;
                let guesser = session.answer_player();
                debug!(player = guesser, "answer time is up");
                self.display.close_answer_prompt(guesser);
                self.end_turn()
            }
            phase => {
                warn!(%phase, "countdown expired outside a timed phase, ignoring");
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    fn handle_start(&mut self, options: GameOptions) -> Result<(), TurnError> {
        if !self.phase.can_start() {
            return Err(self.reject("a game is already in progress"));
        }
        options.validate()?;
        if !self.words.has_vocabulary(options.difficulty) {
            warn!(difficulty = %options.difficulty, "cannot start game without vocabulary");
            self.display.notice(&format!(
                "No words are loaded for {} difficulty.",
                options.difficulty
            ));
            return Err(TurnError::MissingVocabulary(options.difficulty));
        }
        let Some(word) = self.words.get_word(options.difficulty) else {
            warn!(difficulty = %options.difficulty, "word source returned nothing at start");
            self.display.notice(&format!(
                "No words are available for {} difficulty.",
                options.difficulty
            ));
            return Err(TurnError::MissingVocabulary(options.difficulty));
        };

        let session = GameSession::new(&options);
        info!(
            max_rounds = options.max_rounds,
            draw_secs = options.draw_time_limit_secs,
            answer_secs = options.answer_time_limit_secs,
            difficulty = %options.difficulty,
            "game started"
        );
        self.scoreboard
            .update(session.round_number(), session.draw_player(), session.scores());
        self.session = Some(session);
        self.last_outcome = None;
        self.start_drawing(word)
    }

    fn handle_answer(&mut self, player: PlayerIndex, text: &str) -> Result<AnswerVerdict, TurnError> {
        if self.phase != TurnPhase::Answering {
            debug!(player, phase = %self.phase, "answer outside answer window");
            return Err(TurnError::NoAnswerWindow);
        }
        let session = self.session.as_mut().ok_or_else(|| no_session(self.phase))?;
        if player != session.answer_player() {
            debug!(player, "answer from the drawing player, ignoring");
            return Err(TurnError::NotAnswerPlayer(player));
        }

        if !session.is_correct_guess(text) {
            debug!(player, "incorrect guess");
            self.display.answer_rejected(player, text);
            return Ok(AnswerVerdict::Incorrect);
        }

        session.award_correct_guess();
        info!(
            round = session.round_number(),
            guesser = player,
            drawer = session.draw_player(),
            scores = ?session.scores(),
            "correct guess"
        );
        self.countdown.cancel();
        self.display.close_answer_prompt(player);
        self.end_turn()?;
        Ok(AnswerVerdict::Correct)
    }

    fn handle_skip(&mut self) -> Result<(), TurnError> {
        if !self.phase.is_active() {
            return Err(self.reject("no game is in progress"));
        }
        if self.phase == TurnPhase::Answering {
            return Err(self.reject("cannot skip while the answer window is open"));
        }
        info!(phase = %self.phase, "turn skipped");
        self.countdown.cancel();
        self.end_turn()
    }

    fn handle_stop(&mut self) -> Result<(), TurnError> {
        if !self.phase.is_active() {
            return Err(self.reject("no game is in progress"));
        }
        let session = self.session.as_mut().ok_or_else(|| no_session(self.phase))?;
        if !session.stop_requested() {
            session.request_stop();
            info!(round = session.round_number(), "stop requested, finishing after this round");
            self.display
                .notice("The game will end when this round is over.");
        }
        Ok(())
    }

    /// Shows a notice for a rejected command and builds its error.
    fn reject(&mut self, reason: &str) -> TurnError {
        warn!(phase = %self.phase, reason, "command rejected");
        self.display.notice(reason);
        TurnError::InvalidStateTransition(reason.to_string())
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn enter_drawing(&mut self) -> Result<(), TurnError> {
        let session = self.session.as_ref().ok_or_else(|| no_session(self.phase))?;
        let difficulty = session.difficulty();
        let Some(word) = self.words.get_word(difficulty) else {
            warn!(%difficulty, "word source returned nothing, ending game");
            self.display
                .notice(&format!("No words are available for {difficulty} difficulty."));
            return self.finish();
        };
        self.start_drawing(word)
    }

    fn start_drawing(&mut self, word: String) -> Result<(), TurnError> {
        let session = self.session.as_mut().ok_or_else(|| no_session(self.phase))?;
        session.check_roles()?;
        session.set_word(word);

        let drawer = session.draw_player();
        let limit = session.draw_time_limit();
        self.phase = TurnPhase::Drawing;
        self.display.clear_canvas();
        self.countdown.start(limit);
        self.display
            .show_word_prompt(drawer, session.current_word(), limit);
        debug!(round = session.round_number(), drawer, "drawing");
        Ok(())
    }

    fn enter_answering(&mut self) -> Result<(), TurnError> {
        let session = self.session.as_ref().ok_or_else(|| no_session(self.phase))?;
        session.check_roles()?;

        let guesser = session.answer_player();
        let limit = session.answer_time_limit();
        self.phase = TurnPhase::Answering;
        self.countdown.start(limit);
        self.display.show_answer_prompt(guesser, limit);
        debug!(round = session.round_number(), guesser, "answering");
        Ok(())
    }

    /// Ends the current turn: swaps roles and either starts the second
    /// turn of the round or closes the round.
    fn end_turn(&mut self) -> Result<(), TurnError> {
        self.countdown.cancel();
        let session = self.session.as_mut().ok_or_else(|| no_session(self.phase))?;
        session.check_roles()?;

        let first_turn = session.is_first_turn();
        session.swap_roles();

        if first_turn {
            self.scoreboard
                .update(session.round_number(), session.draw_player(), session.scores());
            return self.enter_drawing();
        }

        session.advance_round();
        self.phase = TurnPhase::RoundEnd;
        debug!(next_round = session.round_number(), scores = ?session.scores(), "round ended");
        self.scoreboard
            .update(session.round_number(), session.draw_player(), session.scores());

        if session.should_finish() {
            self.finish()
        } else {
            self.enter_drawing()
        }
    }

    fn finish(&mut self) -> Result<(), TurnError> {
        self.countdown.cancel();
        let session = self.session.as_mut().ok_or_else(|| no_session(self.phase))?;
        let outcome = session.outcome();
        let scores = session.scores();
        session.deactivate();

        self.phase = TurnPhase::Finished;
        self.last_outcome = Some(outcome);
        info!(
            rounds_played = session.round_number() - 1,
            stopped = session.stop_requested(),
            ?scores,
            %outcome,
            "game finished"
        );
        self.scoreboard.show_result(&outcome.to_string(), scores);
        Ok(())
    }

    /// Stops the game without a result after a fatal error.
    fn abort(&mut self, err: &TurnError) {
        error!(%err, phase = %self.phase, "fatal scheduler error, stopping");
        self.countdown.cancel();
        if let Some(session) = &mut self.session {
            session.deactivate();
        }
        self.phase = TurnPhase::Finished;
    }

    fn snapshot(&self) -> SessionSnapshot {
        let remaining_secs = if self.phase.is_timed() {
            self.countdown
                .remaining()
                .map(|d| d.as_secs() + u64::from(d.subsec_nanos() > 0))
        } else {
            None
        };

        match &self.session {
            Some(s) => SessionSnapshot {
                phase: self.phase,
                round_number: s.round_number(),
                max_rounds: s.max_rounds(),
                scores: s.scores(),
                draw_player: s.draw_player(),
                answer_player: s.answer_player(),
                is_active: s.is_active(),
                stop_requested: s.stop_requested(),
                remaining_secs,
                outcome: self.last_outcome,
            },
            None => SessionSnapshot {
                phase: self.phase,
                round_number: 0,
                max_rounds: 0,
                scores: [0, 0],
                draw_player: 0,
                answer_player: 1,
                is_active: false,
                stop_requested: false,
                remaining_secs: None,
                outcome: self.last_outcome,
            },
        }
    }
}

/// Spawns a scheduler task and returns a handle to communicate with it.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_scheduler<W, D, S>(
    words: W,
    display: D,
    scoreboard: S,
    config: SchedulerConfig,
) -> SchedulerHandle
where
    W: WordSource,
    D: DisplaySurface,
    S: ScoreBoard,
{
    let (tx, rx) = mpsc::channel(config.channel_size.max(1));

    let actor = TurnScheduler {
        phase: TurnPhase::Idle,
        session: None,
        last_outcome: None,
        countdown: Countdown::new(config.clock),
        words,
        display,
        scoreboard,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    SchedulerHandle { sender: tx }
}
