//! Safety monitor module
//!
//! Pure evaluation of a telemetry snapshot against the environmental,
//! orientation and intrusion rules. The monitor never touches the command
//! channel itself: an unsafe verdict instructs the caller to dispatch a stop
//! before pacing the cycle.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;
