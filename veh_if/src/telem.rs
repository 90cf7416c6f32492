//! # Telemetry module
//!
//! This module provides the wire format of the vehicle firmware's telemetry
//! endpoint and its decoded form.
//!
//! The firmware replies to a telemetry request with a flat JSON object. Any
//! missing or unparseable field falls back to a documented default rather
//! than failing the decode - a vehicle with a dead sensor still navigates on
//! the remaining ones. The accelerometer and gyro readings arrive as a
//! single `X=<v> Y=<v> Z=<v>` string which is decomposed by
//! [`AxisTriplet::from_wire`], the one place in the software that knows
//! about that encoding.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde_json::{self, Value};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Default ultrasonic range reported when the field is absent.
///
/// Units: centimetres
const DEFAULT_DISTANCE_CM: f64 = 20.0;

/// Default ambient temperature reported when the field is absent.
///
/// Units: degrees Celsius
const DEFAULT_TEMPERATURE_C: f64 = 25.0;

/// Default relative humidity reported when the field is absent.
///
/// Units: percent
const DEFAULT_HUMIDITY_PC: f64 = 50.0;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Raw telemetry packet as sent by the vehicle firmware.
///
/// Status fields keep the firmware's string encoding; lowering to the typed
/// [`TelemetrySnapshot`] happens in one step via `From`.
#[derive(Clone, Debug)]
pub struct TelemPacket {
    pub distance: f64,
    pub ir: String,
    pub motion: String,
    pub temperature: f64,
    pub humidity: f64,
    pub flame: String,
    pub accel: String,
    pub gyro: String,
    pub autonomous: String,
}

/// A triplet of axis readings decoded from the firmware's `X=.. Y=.. Z=..`
/// string encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisTriplet {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A decoded snapshot of the vehicle's sensors for one polling cycle.
///
/// Snapshots are immutable once constructed.
#[derive(Clone, Copy, Debug)]
pub struct TelemetrySnapshot {
    /// Ultrasonic range to the nearest obstacle.
    ///
    /// Units: centimetres
    pub distance_cm: f64,

    /// Infrared obstacle sensor status
    pub ir: IrStatus,

    /// PIR motion sensor status
    pub motion: MotionStatus,

    /// Ambient temperature.
    ///
    /// Units: degrees Celsius
    pub temperature_c: f64,

    /// Relative humidity.
    ///
    /// Units: percent
    pub humidity_pc: f64,

    /// Flame sensor status
    pub flame: FlameStatus,

    /// Linear acceleration.
    ///
    /// Units: metres/second²
    pub accel_ms2: AxisTriplet,

    /// Angular velocity.
    ///
    /// Units: degrees/second
    pub gyro_dps: AxisTriplet,

    /// True if the hardware-side autonomous mode toggle is enabled
    pub autonomous_mode: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Infrared obstacle sensor status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrStatus {
    Clear,
    ObjectDetected,
}

/// PIR motion sensor status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MotionStatus {
    NoMotion,
    MotionDetected,
}

/// Flame sensor status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlameStatus {
    NoFlame,
    FlameDetected,
}

/// Possible telemetry decode errors.
#[derive(Debug, Error)]
pub enum TelemDecodeError {
    #[error("Telemetry packet contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Expected the telemetry packet to be a JSON object")]
    NotAnObject,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TelemPacket {
    /// Parse a new telemetry packet from a JSON body.
    ///
    /// Only a body which is not a JSON object at all is an error. Individual
    /// fields which are missing or of the wrong type take their defaults.
    pub fn from_json(json_str: &str) -> Result<Self, TelemDecodeError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TelemDecodeError::InvalidJson(e)),
        };

        if !val.is_object() {
            return Err(TelemDecodeError::NotAnObject);
        }

        Ok(TelemPacket {
            distance: val["distance"].as_f64().unwrap_or(DEFAULT_DISTANCE_CM),
            ir: str_or(&val["ir"], "Clear"),
            motion: str_or(&val["motion"], "No Motion"),
            temperature: val["temperature"].as_f64().unwrap_or(DEFAULT_TEMPERATURE_C),
            humidity: val["humidity"].as_f64().unwrap_or(DEFAULT_HUMIDITY_PC),
            flame: str_or(&val["flame"], "No Flame"),
            accel: str_or(&val["accel"], "X=0 Y=0 Z=0"),
            gyro: str_or(&val["gyro"], "X=0 Y=0 Z=0"),
            autonomous: str_or(&val["autonomous"], "DISABLED"),
        })
    }
}

impl Default for TelemPacket {
    fn default() -> Self {
        TelemPacket {
            distance: DEFAULT_DISTANCE_CM,
            ir: String::from("Clear"),
            motion: String::from("No Motion"),
            temperature: DEFAULT_TEMPERATURE_C,
            humidity: DEFAULT_HUMIDITY_PC,
            flame: String::from("No Flame"),
            accel: String::from("X=0 Y=0 Z=0"),
            gyro: String::from("X=0 Y=0 Z=0"),
            autonomous: String::from("DISABLED"),
        }
    }
}

impl AxisTriplet {
    /// Decode a triplet from the wire encoding.
    ///
    /// The `X=`/`Y=`/`Z=` labels are stripped and the remaining
    /// whitespace-separated components parsed in order. Missing or
    /// unparseable components default to 0.
    pub fn from_wire(s: &str) -> Self {
        let stripped = s.replace("X=", "").replace("Y=", "").replace("Z=", "");

        let mut components = stripped
            .split_whitespace()
            .map(|c| c.parse::<f64>().unwrap_or(0.0));

        AxisTriplet {
            x: components.next().unwrap_or(0.0),
            y: components.next().unwrap_or(0.0),
            z: components.next().unwrap_or(0.0),
        }
    }
}

impl IrStatus {
    fn from_wire(s: &str) -> Self {
        if s.contains("Object Detected") {
            IrStatus::ObjectDetected
        } else {
            IrStatus::Clear
        }
    }
}

impl MotionStatus {
    fn from_wire(s: &str) -> Self {
        if s.contains("Motion Detected") {
            MotionStatus::MotionDetected
        } else {
            MotionStatus::NoMotion
        }
    }
}

impl FlameStatus {
    fn from_wire(s: &str) -> Self {
        if s.contains("Flame Detected") {
            FlameStatus::FlameDetected
        } else {
            FlameStatus::NoFlame
        }
    }
}

impl From<TelemPacket> for TelemetrySnapshot {
    fn from(packet: TelemPacket) -> Self {
        TelemetrySnapshot {
            distance_cm: packet.distance,
            ir: IrStatus::from_wire(&packet.ir),
            motion: MotionStatus::from_wire(&packet.motion),
            temperature_c: packet.temperature,
            humidity_pc: packet.humidity,
            flame: FlameStatus::from_wire(&packet.flame),
            accel_ms2: AxisTriplet::from_wire(&packet.accel),
            gyro_dps: AxisTriplet::from_wire(&packet.gyro),
            autonomous_mode: packet.autonomous == "ENABLED",
        }
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        TelemetrySnapshot::from(TelemPacket::default())
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Get a string field of the packet, or the default if absent or not a string
fn str_or(val: &Value, default: &str) -> String {
    match val.as_str() {
        Some(s) => String::from(s),
        None => String::from(default),
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_axis_triplet_decode() {
        assert_eq!(
            AxisTriplet::from_wire("X=0.12 Y=-0.50 Z=9.81"),
            AxisTriplet {
                x: 0.12,
                y: -0.50,
                z: 9.81
            }
        );

        // Missing components zero-fill
        assert_eq!(
            AxisTriplet::from_wire("X=1.0"),
            AxisTriplet {
                x: 1.0,
                y: 0.0,
                z: 0.0
            }
        );
        assert_eq!(AxisTriplet::from_wire(""), AxisTriplet::default());

        // Unparseable components degrade to zero without affecting the rest
        assert_eq!(
            AxisTriplet::from_wire("X=nan? Y=2.0 Z=3.0"),
            AxisTriplet {
                x: 0.0,
                y: 2.0,
                z: 3.0
            }
        );

        // Unlabelled components are accepted
        assert_eq!(
            AxisTriplet::from_wire("1 2 3"),
            AxisTriplet {
                x: 1.0,
                y: 2.0,
                z: 3.0
            }
        );
    }

    #[test]
    fn test_full_packet_decode() {
        let telem: TelemetrySnapshot = TelemPacket::from_json(
            r#"{
                "distance": 7.5,
                "ir": "Object Detected",
                "motion": "Motion Detected",
                "temperature": 21.0,
                "humidity": 55.0,
                "flame": "Flame Detected",
                "accel": "X=0.1 Y=0.2 Z=9.8",
                "gyro": "X=0 Y=0 Z=0",
                "autonomous": "ENABLED"
            }"#,
        )
        .unwrap()
        .into();

        assert_eq!(telem.distance_cm, 7.5);
        assert_eq!(telem.ir, IrStatus::ObjectDetected);
        assert_eq!(telem.motion, MotionStatus::MotionDetected);
        assert_eq!(telem.flame, FlameStatus::FlameDetected);
        assert_eq!(telem.accel_ms2.z, 9.8);
        assert!(telem.autonomous_mode);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let telem: TelemetrySnapshot = TelemPacket::from_json("{}").unwrap().into();

        assert_eq!(telem.distance_cm, 20.0);
        assert_eq!(telem.ir, IrStatus::Clear);
        assert_eq!(telem.motion, MotionStatus::NoMotion);
        assert_eq!(telem.temperature_c, 25.0);
        assert_eq!(telem.humidity_pc, 50.0);
        assert_eq!(telem.flame, FlameStatus::NoFlame);
        assert_eq!(telem.accel_ms2, AxisTriplet::default());
        assert!(!telem.autonomous_mode);
    }

    #[test]
    fn test_wrong_typed_fields_take_defaults() {
        let telem: TelemetrySnapshot =
            TelemPacket::from_json(r#"{"distance": "close", "ir": 1, "autonomous": true}"#)
                .unwrap()
                .into();

        assert_eq!(telem.distance_cm, 20.0);
        assert_eq!(telem.ir, IrStatus::Clear);
        assert!(!telem.autonomous_mode);
    }

    #[test]
    fn test_invalid_body_is_an_error() {
        assert!(TelemPacket::from_json("not json").is_err());
        assert!(TelemPacket::from_json("[1, 2, 3]").is_err());
    }
}
