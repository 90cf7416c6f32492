//! Parameters structure for the avoidance controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for obstacle avoidance.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Params {
    /// Ultrasonic range below which an obstacle is considered imminent.
    ///
    /// Units: centimetres
    pub safe_distance_cm: f64,
}
