//! # Vehicle interface crate.
//!
//! Provides the wire-level interfaces between the control software and the
//! vehicle firmware.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Movement command verbs accepted by the vehicle firmware
pub mod cmd;

/// Network parameters
pub mod net;

/// Telemetry wire format and decoded snapshot
pub mod telem;
