//! Obstacle avoidance module
//!
//! Maps one telemetry snapshot to a movement decision. Invoked only on
//! cycles the safety monitor has passed as safe.

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
