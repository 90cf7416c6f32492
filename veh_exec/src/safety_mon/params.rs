//! Parameters structure for the safety monitor

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for safety monitoring.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Params {
    // ---- ENVIRONMENTAL LIMITS ----

    /// Lowest ambient temperature considered nominal.
    ///
    /// Units: degrees Celsius
    pub temp_min_c: f64,

    /// Highest ambient temperature considered nominal.
    ///
    /// Units: degrees Celsius
    pub temp_max_c: f64,

    /// Highest relative humidity considered nominal.
    ///
    /// Units: percent
    pub humidity_max_pc: f64,

    // ---- ORIENTATION LIMITS ----

    /// Z acceleration below which the vehicle is suspected to be inverted.
    ///
    /// Z acceleration is positive when the vehicle is upright.
    ///
    /// Units: metres/second²
    pub inversion_accel_z_ms2: f64,

    /// Absolute tilt angle above which a warning is raised.
    ///
    /// Units: degrees
    pub tilt_warn_deg: f64,

    /// Acceleration magnitude above which a warning is raised.
    ///
    /// Units: metres/second²
    pub accel_warn_ms2: f64,
}
