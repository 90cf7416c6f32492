//! # Vehicle library.
//!
//! This library allows other crates in the workspace to access items defined
//! inside the vehicle control crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Obstacle avoidance controller - chooses the next movement from sensor readings
pub mod avoid_ctrl;

/// Localisation module - placeholder pose model for the vehicle
pub mod loc;

/// Navigation manager - owns the autonomous navigation loop
pub mod nav_mgr;

/// Room map - room bounds and obstacle rectangles authored by the mapping tool
pub mod room_map;

/// Safety monitor - evaluates telemetry against environmental and orientation limits
pub mod safety_mon;

/// Vehicle client - fetches telemetry from and dispatches commands to the vehicle firmware
pub mod veh_client;
