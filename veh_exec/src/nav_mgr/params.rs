//! Parameters structure for the navigation manager

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the navigation manager.
#[derive(Clone, Debug, Deserialize)]
pub struct Params {
    // ---- PACING ----

    /// Pause between nominal cycles.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Pause before retrying after a failed telemetry fetch.
    ///
    /// Units: seconds
    pub telem_retry_wait_s: f64,

    /// Pause while the hardware-side manual override is active.
    ///
    /// Units: seconds
    pub manual_wait_s: f64,

    /// Pause after a cycle in which the safety monitor forbade movement.
    ///
    /// Units: seconds
    pub unsafe_wait_s: f64,

    /// Pause after an anti-stall backward manoeuvre.
    ///
    /// Units: seconds
    pub recovery_wait_s: f64,

    /// Pause after a failed command dispatch.
    ///
    /// Units: seconds
    pub cycle_fail_wait_s: f64,

    // ---- ANTI-STALL ----

    /// Consecutive turn commands after which the anti-stall recovery
    /// engages.
    pub max_consec_turns: u32,

    // ---- MAP ----

    /// Path of the room map file, relative to the software root.
    pub map_file: String,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            cycle_period_s: 0.3,
            telem_retry_wait_s: 0.5,
            manual_wait_s: 1.0,
            unsafe_wait_s: 2.0,
            recovery_wait_s: 1.0,
            cycle_fail_wait_s: 1.0,
            max_consec_turns: 8,
            map_file: String::from("room_map.json"),
        }
    }
}
