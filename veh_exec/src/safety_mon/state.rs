//! Implementations for the safety monitor state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{error, info, warn};

// Internal
use super::Params;
use util::{maths, module::State, params, session::Session};
use veh_if::telem::{FlameStatus, MotionStatus, TelemetrySnapshot};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Safety monitor module state
#[derive(Clone, Default)]
pub struct SafetyMon {
    pub(crate) params: Params,
}

/// Status report for safety monitor processing.
///
/// Everything in the report is advisory: none of these items block movement
/// on their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusReport {
    /// Ambient temperature outside the nominal band
    pub temp_abnormal: bool,

    /// Relative humidity above the nominal limit
    pub humidity_abnormal: bool,

    /// Tilt angle beyond the warning limit, in degrees
    pub tilt_warning_deg: Option<f64>,

    /// Acceleration magnitude beyond the warning limit, in m/s²
    pub high_accel_ms2: Option<f64>,

    /// Motion detected by the intrusion sensor
    pub motion_detected: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Overall verdict of one safety evaluation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SafetyVerdict {
    /// Conditions permit movement this cycle.
    Safe,

    /// Conditions forbid movement. The caller shall dispatch a stop command
    /// before pacing the cycle.
    Unsafe(UnsafeCause),
}

/// Cause of an unsafe verdict.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnsafeCause {
    /// The flame sensor has detected a fire.
    FlameDetected,

    /// The vehicle is suspected to be upside down.
    PossibleInversion,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for SafetyMon {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = TelemetrySnapshot;
    type OutputData = SafetyVerdict;
    type StatusReport = StatusReport;

    /// Initialise the safety monitor.
    ///
    /// Expected init data is the path to the parameter file
    fn init(
        &mut self,
        init_data: Self::InitData,
        _session: &Session,
    ) -> Result<(), Self::InitError> {
        self.params = params::load(init_data)?;

        Ok(())
    }

    /// Evaluate one telemetry snapshot against the safety rules.
    ///
    /// Rules run in a fixed order: environmental limits, flame, orientation,
    /// intrusion. Only flame and suspected inversion make the verdict
    /// unsafe; everything else is advisory. Evaluation stops at the first
    /// unsafe rule.
    fn proc(&mut self, telem: &TelemetrySnapshot) -> (SafetyVerdict, StatusReport) {
        let mut report = StatusReport::default();

        // Environmental limits are advisory only
        if telem.temperature_c < self.params.temp_min_c
            || telem.temperature_c > self.params.temp_max_c
        {
            warn!("Abnormal temperature: {:.1} °C", telem.temperature_c);
            report.temp_abnormal = true;
        }

        if telem.humidity_pc > self.params.humidity_max_pc {
            warn!("Abnormal humidity: {:.1}%", telem.humidity_pc);
            report.humidity_abnormal = true;
        }

        // Fire forbids movement immediately
        if telem.flame == FlameStatus::FlameDetected {
            error!("Fire detected, emergency stop required");
            return (SafetyVerdict::Unsafe(UnsafeCause::FlameDetected), report);
        }

        // Z acceleration should be positive when the vehicle is upright
        if telem.accel_ms2.z < self.params.inversion_accel_z_ms2 {
            error!(
                "Vehicle may be upside down (accel z = {:.2} m/s²), emergency stop required",
                telem.accel_ms2.z
            );
            return (SafetyVerdict::Unsafe(UnsafeCause::PossibleInversion), report);
        }

        let tilt_deg = telem.accel_ms2.x.atan2(telem.accel_ms2.z).to_degrees();
        if tilt_deg.abs() > self.params.tilt_warn_deg {
            warn!("Dangerous tilt angle: {:.1}°", tilt_deg);
            report.tilt_warning_deg = Some(tilt_deg);
        }

        let accel_mag = maths::norm(
            &[telem.accel_ms2.x, telem.accel_ms2.y, telem.accel_ms2.z],
            &[0.0, 0.0, 0.0],
        )
        .unwrap_or(0.0);
        if accel_mag > self.params.accel_warn_ms2 {
            warn!("High acceleration detected: {:.2} m/s²", accel_mag);
            report.high_accel_ms2 = Some(accel_mag);
        }

        // Intrusion signalling never affects the verdict
        if telem.motion == MotionStatus::MotionDetected {
            info!("Motion detected, possible intruder");
            report.motion_detected = true;
        }

        (SafetyVerdict::Safe, report)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use veh_if::telem::AxisTriplet;

    fn monitor() -> SafetyMon {
        SafetyMon {
            params: Params {
                temp_min_c: 15.0,
                temp_max_c: 35.0,
                humidity_max_pc: 80.0,
                inversion_accel_z_ms2: -5.0,
                tilt_warn_deg: 45.0,
                accel_warn_ms2: 2.0,
            },
        }
    }

    #[test]
    fn test_nominal_conditions_are_safe() {
        let (verdict, report) = monitor().proc(&TelemetrySnapshot::default());

        assert_eq!(verdict, SafetyVerdict::Safe);
        assert!(!report.temp_abnormal);
        assert!(!report.humidity_abnormal);
        assert!(report.tilt_warning_deg.is_none());
        assert!(report.high_accel_ms2.is_none());
        assert!(!report.motion_detected);
    }

    #[test]
    fn test_environmental_limits_are_advisory() {
        let telem = TelemetrySnapshot {
            temperature_c: 40.0,
            humidity_pc: 90.0,
            ..TelemetrySnapshot::default()
        };

        let (verdict, report) = monitor().proc(&telem);

        // Movement is still permitted this cycle
        assert_eq!(verdict, SafetyVerdict::Safe);
        assert!(report.temp_abnormal);
        assert!(report.humidity_abnormal);

        let cold = TelemetrySnapshot {
            temperature_c: 10.0,
            ..TelemetrySnapshot::default()
        };
        let (verdict, report) = monitor().proc(&cold);
        assert_eq!(verdict, SafetyVerdict::Safe);
        assert!(report.temp_abnormal);
    }

    #[test]
    fn test_flame_is_unsafe() {
        let telem = TelemetrySnapshot {
            flame: FlameStatus::FlameDetected,
            ..TelemetrySnapshot::default()
        };

        let (verdict, _) = monitor().proc(&telem);

        assert_eq!(verdict, SafetyVerdict::Unsafe(UnsafeCause::FlameDetected));
    }

    #[test]
    fn test_inversion_is_unsafe() {
        let telem = TelemetrySnapshot {
            accel_ms2: AxisTriplet {
                x: 0.0,
                y: 0.0,
                z: -9.8,
            },
            ..TelemetrySnapshot::default()
        };

        let (verdict, _) = monitor().proc(&telem);

        assert_eq!(
            verdict,
            SafetyVerdict::Unsafe(UnsafeCause::PossibleInversion)
        );
    }

    #[test]
    fn test_tilt_and_acceleration_are_advisory() {
        // Steep tilt, well above the magnitude limit too
        let telem = TelemetrySnapshot {
            accel_ms2: AxisTriplet {
                x: 9.0,
                y: 0.0,
                z: 1.0,
            },
            ..TelemetrySnapshot::default()
        };

        let (verdict, report) = monitor().proc(&telem);

        assert_eq!(verdict, SafetyVerdict::Safe);
        assert!(report.tilt_warning_deg.unwrap() > 45.0);
        assert!(report.high_accel_ms2.unwrap() > 2.0);
    }

    #[test]
    fn test_motion_is_informational() {
        let telem = TelemetrySnapshot {
            motion: MotionStatus::MotionDetected,
            ..TelemetrySnapshot::default()
        };

        let (verdict, report) = monitor().proc(&telem);

        assert_eq!(verdict, SafetyVerdict::Safe);
        assert!(report.motion_detected);
    }
}
