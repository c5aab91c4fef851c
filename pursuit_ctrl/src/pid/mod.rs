//! # PID controller module
//!
//! This module provides a single-input/single-output discrete PID controller
//! with four selectable control laws:
//!
//! - [`PidMode::Positional`] - the standard form, all terms computed on the
//!   error.
//! - [`PidMode::Velocity`] - the incremental form, producing a delta added on
//!   top of the previous process value.
//! - [`PidMode::DerivativeFirst`] - derivative computed on the process value
//!   rather than the error, avoiding derivative kick on setpoint changes.
//! - [`PidMode::ProportionalDerivativeFirst`] - both proportional and
//!   derivative computed on the process value, integral on the error.
//!
//! All four modes share a single trapezoidally-accumulated integral, so the
//! mode can be switched between steps without resetting the controller.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use params::{Gain, PidMode, PidParams, Saturation};
pub use state::Pid;
