//! breathbox-core: drift-resistant guided-breathing session timing.
//!
//! The crate is a single deterministic state machine plus its configuration
//! surface. An external scheduler (display-refresh callback, terminal tick
//! loop) supplies wall-clock timestamps; the machine advances the fixed
//! Inhale -> HoldIn -> Exhale -> HoldOut cycle by elapsed time, not frame
//! count, and exposes immutable [`SessionSnapshot`] values for presentation
//! collaborators to diff.
//!
//! The machine performs no I/O, never blocks, and has no fallible operation
//! after construction; the one recognized anomaly, a timestamp earlier than
//! the previous tick, is absorbed as a zero-length tick.

pub mod config;
pub mod patterns;
pub mod phase;
pub mod session;
pub mod timebase;

#[cfg(test)]
mod tests_proptest;

pub use config::{ConfigError, SessionConfig};
pub use patterns::{builtin_patterns, get_pattern, BreathPattern, PhaseTimings};
pub use phase::Phase;
pub use session::{SessionMachine, SessionSnapshot, TickResult};
pub use timebase::{dt_sec, dt_us};
