//! Guided-breathing session state machine.
//!
//! Advances a fixed four-phase cycle on a wall-clock schedule and derives
//! render-ready progress values for presentation collaborators. All
//! arithmetic is driven by the delta between caller-supplied timestamps, so
//! total session duration stays accurate no matter how irregularly the tick
//! source fires.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SessionConfig};
use crate::phase::Phase;
use crate::timebase;

/// Read-only copy of session state, taken after a transition.
///
/// Collaborators (rendering, audio cues, haptics) consume snapshots and diff
/// consecutive ones to detect phase changes; the machine never hands out
/// references into its own storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session is actively advancing
    pub running: bool,
    /// Session is suspended but retains position
    pub paused: bool,
    /// Current breathing phase
    pub phase: Phase,
    /// Seconds left in the whole session, clamped to [0, total]
    pub session_remaining_sec: f32,
    /// Seconds left in the current phase, clamped to [0, phase duration]
    pub phase_remaining_sec: f32,
    /// Fraction of the current phase elapsed, in [0, 1]
    pub cycle_progress: f32,
    /// Fraction of the session elapsed, in [0, 1]
    pub total_progress: f32,
    /// Full four-phase cycles completed since the session started
    pub cycles_completed: u64,
}

/// Outcome of one `update` tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    /// State changed enough to warrant a redraw
    pub dirty: bool,
    /// Present exactly once per session, on the tick that exhausts the
    /// session clock. Carries the final pre-reset snapshot; the machine
    /// itself is already reset when the caller sees this.
    pub completed: Option<SessionSnapshot>,
}

impl TickResult {
    fn idle() -> Self {
        Self {
            dirty: false,
            completed: None,
        }
    }
}

/// The session state machine. Owns all timing state privately; external
/// observers only ever see [`SessionSnapshot`] values.
///
/// Single-threaded and tick-driven: exactly one scheduler context calls
/// `update` with monotonically increasing timestamps. A timestamp that goes
/// backwards is treated as a zero-length tick.
#[derive(Debug, Clone)]
pub struct SessionMachine {
    config: SessionConfig,
    running: bool,
    paused: bool,
    phase: Phase,
    session_remaining_sec: f32,
    elapsed_in_phase_sec: f32,
    last_tick_us: Option<i64>,
    cycles_completed: u64,
}

impl SessionMachine {
    /// Build a machine in the stopped state. Fails if the configuration is
    /// invalid; after this point no operation can fail.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            running: false,
            paused: false,
            phase: Phase::Inhale,
            session_remaining_sec: config.total_session_sec,
            elapsed_in_phase_sec: 0.0,
            last_tick_us: None,
            cycles_completed: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start or resume the session.
    ///
    /// From a paused state this resumes exactly where the session left off;
    /// from a stopped state it restarts fresh. `now_us` becomes the
    /// last-tick reference so the first `update` after a resume does not
    /// charge the pause gap against the session clock.
    pub fn start(&mut self, now_us: i64) {
        if !self.paused {
            self.reset_session();
        }
        self.running = true;
        self.paused = false;
        self.last_tick_us = Some(now_us);
    }

    /// Suspend the session without losing position. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
        self.paused = true;
    }

    /// Stop and fully reset the session. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.reset_session();
    }

    /// Advance the session to `now_us`.
    ///
    /// No-op while not running. Otherwise consumes the wall-clock delta
    /// since the previous tick, advancing at most one positive-length phase
    /// per call; time elapsed past a phase boundary within a single tick is
    /// dropped, not carried into the next phase. Zero-length phases are
    /// skipped within the same tick.
    pub fn update(&mut self, now_us: i64) -> TickResult {
        if !self.running {
            return TickResult::idle();
        }

        let last = self.last_tick_us.unwrap_or(now_us);
        let dt = timebase::dt_sec(now_us, last);
        self.last_tick_us = Some(now_us);

        self.session_remaining_sec = (self.session_remaining_sec - dt).max(0.0);
        self.elapsed_in_phase_sec += dt;

        // Phase advance. The loop only re-enters for zero-length phases:
        // after a transition elapsed is 0, which is below any positive
        // duration. Config validation guarantees inhale and exhale are
        // positive, so this terminates within one cycle.
        while self.elapsed_in_phase_sec >= self.config.phase_duration(self.phase) {
            if self.phase.is_cycle_end() {
                self.cycles_completed += 1;
            }
            self.phase = self.phase.next();
            self.elapsed_in_phase_sec = 0.0;
        }

        if self.session_remaining_sec <= 0.0 {
            self.running = false;
            self.paused = false;
            let finished = self.snapshot();
            log::debug!(
                "session complete: {} cycles, last phase {:?}",
                finished.cycles_completed,
                finished.phase
            );
            self.reset_session();
            return TickResult {
                dirty: true,
                completed: Some(finished),
            };
        }

        TickResult {
            dirty: true,
            completed: None,
        }
    }

    /// Take an immutable snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let duration = self.config.phase_duration(self.phase);
        let cycle_progress = if duration > 0.0 {
            (self.elapsed_in_phase_sec / duration).min(1.0)
        } else {
            1.0
        };
        let total = self.config.total_session_sec;
        let total_progress = if total > 0.0 {
            (1.0 - self.session_remaining_sec / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        SessionSnapshot {
            running: self.running,
            paused: self.paused,
            phase: self.phase,
            session_remaining_sec: self.session_remaining_sec,
            phase_remaining_sec: (duration - self.elapsed_in_phase_sec).max(0.0),
            cycle_progress,
            total_progress,
            cycles_completed: self.cycles_completed,
        }
    }

    /// Position within the full four-phase cycle, in [0, 1).
    pub fn cycle_phase_norm(&self) -> f32 {
        let total = self.config.cycle_sec();
        if total <= 0.0 {
            return 0.0;
        }
        let before = match self.phase {
            Phase::Inhale => 0.0,
            Phase::HoldIn => self.config.inhale_sec,
            Phase::Exhale => self.config.inhale_sec + self.config.hold_in_sec,
            Phase::HoldOut => {
                self.config.inhale_sec + self.config.hold_in_sec + self.config.exhale_sec
            }
        };
        (before + self.elapsed_in_phase_sec).min(total) / total
    }

    fn reset_session(&mut self) {
        self.session_remaining_sec = self.config.total_session_sec;
        self.phase = Phase::Inhale;
        self.elapsed_in_phase_sec = 0.0;
        self.cycles_completed = 0;
        self.last_tick_us = None;
    }
}
