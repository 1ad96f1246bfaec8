//! Scheduler state machine.

use serde::{Deserialize, Serialize};

/// The phase the scheduler is in.
///
/// ```text
/// Idle → Drawing → Answering → Drawing → Answering → RoundEnd ─┬→ Drawing …
///          ↑                                                   └→ Finished
///          └──────────────────── start_game ───────────────────────┘
/// ```
///
/// - **Idle**: No game has been started yet.
/// - **Drawing**: The drawing player sees the word; the countdown runs
///   for the draw limit.
/// - **Answering**: The guessing player may submit answers until a match
///   or the answer limit elapses.
/// - **RoundEnd**: Both turns of a round are done. Transient: the
///   scheduler resolves it to `Drawing` or `Finished` immediately.
/// - **Finished**: The game is over and a result was reported. A new
///   game may be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    Drawing,
    Answering,
    RoundEnd,
    Finished,
}

impl TurnPhase {
    /// Returns `true` while a game is being played.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Drawing | Self::Answering | Self::RoundEnd)
    }

    /// Returns `true` if a new game may be started from this phase.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Finished)
    }

    /// Returns `true` for phases that run a countdown.
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Drawing | Self::Answering)
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Drawing => write!(f, "Drawing"),
            Self::Answering => write!(f, "Answering"),
            Self::RoundEnd => write!(f, "RoundEnd"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}
