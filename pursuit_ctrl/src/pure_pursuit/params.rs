//! Pure pursuit control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::pid::PidParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for pure pursuit control
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Parameters for the linear (distance error) controller
    pub linear: PidParams,

    /// Parameters for the angular (bearing error) controller
    pub angular: PidParams
}
