//! Per-phase countdown clock for Doodle.
//!
//! A [`Countdown`] owns at most one armed deadline at a time and fires a
//! tick once per `tick_interval` until the deadline passes. Arming a new
//! phase replaces the old deadline, so a stale expiry from a previous
//! phase can never fire.
//!
//! # Integration
//!
//! The countdown is designed to sit inside the scheduler actor's
//! `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         tick = countdown.wait_for_tick() => {
//!             if tick.expired { /* advance the phase */ }
//!         }
//!     }
//! }
//! ```
//!
//! [`Countdown::wait_for_tick`] only touches `self` after its sleep
//! completes, so it is cancel-safe when another `select!` branch wins.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`Countdown`].
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Time between two display ticks. Default: one second.
    pub tick_interval: Duration,
    /// A wake-up later than this fraction of `tick_interval` is reported
    /// as late (0.0–1.0). Default: 0.10.
    pub late_warn_fraction: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            late_warn_fraction: 0.10,
        }
    }
}

impl ClockConfig {
    /// Smallest accepted tick interval.
    pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a config with a specific tick interval.
    pub fn with_interval(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`Countdown::new`].
    pub fn validated(mut self) -> Self {
        if self.tick_interval < Self::MIN_TICK_INTERVAL {
            warn!(
                interval_ms = self.tick_interval.as_secs_f64() * 1000.0,
                "tick_interval below minimum, clamping"
            );
            self.tick_interval = Self::MIN_TICK_INTERVAL;
        }
        self.late_warn_fraction = self.late_warn_fraction.clamp(0.0, 1.0);
        self
    }
}

// ---------------------------------------------------------------------------
// Tick info
// ---------------------------------------------------------------------------

/// A single countdown tick, returned by [`Countdown::wait_for_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    /// Tick number within the current phase (starts at 1).
    pub tick: u64,
    /// Time left until the deadline, measured from the deadline itself.
    pub remaining: Duration,
    /// `true` when the deadline has been reached. The countdown is
    /// disarmed once this is returned.
    pub expired: bool,
    /// `true` if the tick woke up noticeably later than scheduled.
    pub late: bool,
}

impl CountdownTick {
    /// Remaining time rounded up to whole seconds, for display.
    pub fn remaining_secs(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// One-deadline-at-a-time countdown.
pub struct Countdown {
    config: ClockConfig,
    deadline: Option<Instant>,
    next_tick: Option<Instant>,
    tick_count: u64,
}

impl Countdown {
    /// Create a disarmed countdown.
    pub fn new(config: ClockConfig) -> Self {
        let config = config.validated();
        debug!(
            interval_ms = config.tick_interval.as_secs_f64() * 1000.0,
            "countdown created"
        );
        Self {
            config,
            deadline: None,
            next_tick: None,
            tick_count: 0,
        }
    }

    /// A disarmed countdown that ticks once per second.
    pub fn per_second() -> Self {
        Self::new(ClockConfig::default())
    }

    /// Arm the countdown for `duration`, replacing any previous deadline.
    pub fn start(&mut self, duration: Duration) {
        let now = Instant::now();
        let deadline = now + duration;
        if self.deadline.is_some() {
            debug!("countdown re-armed before expiry, previous deadline dropped");
        }
        self.deadline = Some(deadline);
        self.next_tick = Some((now + self.config.tick_interval).min(deadline));
        self.tick_count = 0;
        debug!(secs = duration.as_secs_f64(), "countdown armed");
    }

    /// Disarm the countdown. Idempotent.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            self.next_tick = None;
            debug!(tick = self.tick_count, "countdown cancelled");
        }
    }

    /// Wait until the next tick or the deadline, whichever comes first.
    ///
    /// While disarmed this future pends forever, which lets
    /// `tokio::select!` keep servicing its other branches.
    pub async fn wait_for_tick(&mut self) -> CountdownTick {
        let (next, deadline) = match (self.next_tick, self.deadline) {
            (Some(next), Some(deadline)) => (next, deadline),
            _ => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(next);
        let late = late_by > self.config.tick_interval.mul_f64(self.config.late_warn_fraction);

        if now >= deadline {
            self.deadline = None;
            self.next_tick = None;
            trace!(tick = self.tick_count, late, "countdown expired");
            return CountdownTick {
                tick: self.tick_count,
                remaining: Duration::ZERO,
                expired: true,
                late,
            };
        }

        // Schedule from now after a late wake so ticks don't bunch up.
        let after = if late {
            warn!(
                tick = self.tick_count,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "countdown tick late, skipping ahead"
            );
            now + self.config.tick_interval
        } else {
            next + self.config.tick_interval
        };
        self.next_tick = Some(after.min(deadline));

        let remaining = deadline - now;
        trace!(tick = self.tick_count, remaining_ms = remaining.as_millis() as u64, "countdown tick");

        CountdownTick {
            tick: self.tick_count,
            remaining,
            expired: false,
            late,
        }
    }

    /// Whether a deadline is currently armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the armed deadline, or `None` when disarmed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Ticks fired since the last [`start`](Self::start).
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The configured tick interval.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::per_second()
    }
}
