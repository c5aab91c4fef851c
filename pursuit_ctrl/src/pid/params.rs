//! PID controller parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The gains of a PID controller.
///
/// No validation is applied to gains, negative or zero gains are legal and
/// simply change the behaviour of the loop.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize)]
pub struct Gain {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64
}

/// Saturation limits applied to the controller output.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Saturation {
    /// Minimum output value
    pub min: f64,

    /// Maximum output value
    pub max: f64
}

/// Parameters for a PID controller
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct PidParams {
    /// The control law used by the controller
    #[serde(default)]
    pub mode: PidMode,

    /// The controller gains
    pub gain: Gain,

    /// Optional saturation limits. If `None` the output is unclamped.
    #[serde(default)]
    pub saturation: Option<Saturation>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The control law used by a PID controller.
///
/// Exactly one mode is active at a time. Switching mode between steps does
/// not reset the controller's history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PidMode {
    /// Standard positional form: all terms computed on the error.
    Positional,

    /// Incremental (velocity) form: the computed delta is added on top of the
    /// previous process value.
    Velocity,

    /// Derivative-first form: the derivative is computed on the process value
    /// rather than the error, which avoids derivative kick when the target
    /// changes.
    DerivativeFirst,

    /// Proportional-and-derivative-first form: both the proportional and
    /// derivative terms are computed on the process value, only the integral
    /// acts on the error.
    ProportionalDerivativeFirst
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Gain {
    /// Create a new set of gains.
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self { k_p, k_i, k_d }
    }
}

impl Default for PidMode {
    fn default() -> Self {
        PidMode::Positional
    }
}

impl Default for PidParams {
    fn default() -> Self {
        Self {
            mode: PidMode::default(),
            gain: Gain::default(),
            saturation: None
        }
    }
}
