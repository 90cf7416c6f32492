//! # Network parameters module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Network parameters for reaching the vehicle firmware.
#[derive(Clone, Debug, Deserialize)]
pub struct NetParams {
    /// Address (host or host:port) of the vehicle firmware.
    pub vehicle_addr: String,

    /// Timeout on telemetry fetches.
    ///
    /// Units: seconds
    pub telem_timeout_s: f64,

    /// Timeout on command dispatches.
    ///
    /// Units: seconds
    pub cmd_timeout_s: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl NetParams {
    /// Get the base URL of the vehicle firmware.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.vehicle_addr)
    }
}
