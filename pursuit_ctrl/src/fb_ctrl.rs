//! # Feedback controller interface
//!
//! This module defines the capability every feedback controller in the stack
//! provides: it can be reset, it can be stepped, and its last output can be
//! read back. The pure pursuit controller is generic over this trait so any
//! controller with these capabilities can be plugged in, not just PID.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur while stepping a feedback controller.
#[derive(Debug, Error)]
pub enum FbCtrlError {
    /// The timestep passed to `step` was zero or negative. Derivative and
    /// integral terms are undefined for such timesteps, so the step is
    /// rejected before any internal state is mutated.
    #[error("Invalid timestep: {0} s, timesteps must be positive")]
    InvalidTimestep(f64)
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Trait for discrete feedback controllers.
///
/// A feedback controller drives a single process value towards a single
/// target. Each call to [`FeedbackController::step`] is one control cycle:
/// the caller owns the scheduling and supplies the elapsed time since the
/// previous step.
pub trait FeedbackController {
    /// Zero all internal history. Configuration (gains, limits) is kept.
    fn reset(&mut self);

    /// Perform one control step, returning the new control output.
    ///
    /// A failed step leaves the controller's internal history unchanged.
    fn step(
        &mut self,
        target: f64,
        process_val: f64,
        dt_s: f64
    ) -> Result<f64, FbCtrlError>;

    /// Get the last computed control output without recomputation.
    ///
    /// Before any step has been made this is the reset value, zero.
    fn output(&self) -> f64;
}
