//! # Localisation module
//!
//! Placeholder pose model for the vehicle. There is no localisation source
//! yet, so the pose stays at its default; it is shown to the operator but
//! never consulted for control decisions.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Pose of the vehicle in the room frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pose {
    /// Units: centimetres
    pub x_cm: f64,

    /// Units: centimetres
    pub y_cm: f64,

    /// Heading measured clockwise from the room frame's y axis.
    ///
    /// Units: degrees
    pub heading_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}) cm @ {:.1}°",
            self.x_cm, self.y_cm, self.heading_deg
        )
    }
}
