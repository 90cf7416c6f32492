//! Implementations for the avoidance controller state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::Params;
use util::{module::State, params, session::Session};
use veh_if::{
    cmd::MoveCommand,
    telem::{IrStatus, TelemetrySnapshot},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Obstacle avoidance module state
#[derive(Clone)]
pub struct AvoidCtrl {
    pub(crate) params: Params,

    /// Direction the next range-triggered turn will take.
    ///
    /// Toggled on every such turn, so a stuck vehicle never turns the same
    /// way on consecutive cycles.
    pub(crate) next_turn: MoveCommand,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Status report for avoidance processing: the cause of the decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecisionCause {
    /// The ultrasonic range dropped below the safe distance. Value: the
    /// measured range in centimetres.
    RangeObstacle(f64),

    /// The infrared sensor reports an object.
    IrObstacle,

    /// No obstacle in sight.
    Clear,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for AvoidCtrl {
    fn default() -> Self {
        Self {
            params: Params::default(),
            next_turn: MoveCommand::Left,
        }
    }
}

impl State for AvoidCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = TelemetrySnapshot;
    type OutputData = MoveCommand;
    type StatusReport = DecisionCause;

    /// Initialise the avoidance controller.
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

    /// Choose the next movement from the snapshot.
    ///
    /// Never blocks and never fails; always one of forward, left or right.
    /// The ultrasonic range has priority over the IR sensor.
    fn proc(&mut self, telem: &TelemetrySnapshot) -> (MoveCommand, DecisionCause) {
        if telem.distance_cm < self.params.safe_distance_cm {
            let turn = self.next_turn;
            self.next_turn = match turn {
                MoveCommand::Left => MoveCommand::Right,
                _ => MoveCommand::Left,
            };

            info!("Obstacle at {:.1} cm, turning {}", telem.distance_cm, turn);
            return (turn, DecisionCause::RangeObstacle(telem.distance_cm));
        }

        if telem.ir == IrStatus::ObjectDetected {
            info!("IR obstacle detected, turning right");
            return (MoveCommand::Right, DecisionCause::IrObstacle);
        }

        (MoveCommand::Forward, DecisionCause::Clear)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn controller() -> AvoidCtrl {
        AvoidCtrl {
            params: Params {
                safe_distance_cm: 15.0,
            },
            ..AvoidCtrl::default()
        }
    }

    #[test]
    fn test_clear_path_goes_forward() {
        let telem = TelemetrySnapshot {
            distance_cm: 20.0,
            ..TelemetrySnapshot::default()
        };

        let (movement, cause) = controller().proc(&telem);

        assert_eq!(movement, MoveCommand::Forward);
        assert_eq!(cause, DecisionCause::Clear);
    }

    #[test]
    fn test_ir_obstacle_turns_right() {
        let telem = TelemetrySnapshot {
            distance_cm: 20.0,
            ir: IrStatus::ObjectDetected,
            ..TelemetrySnapshot::default()
        };

        let (movement, cause) = controller().proc(&telem);

        assert_eq!(movement, MoveCommand::Right);
        assert_eq!(cause, DecisionCause::IrObstacle);
    }

    #[test]
    fn test_close_range_never_goes_forward() {
        let telem = TelemetrySnapshot {
            distance_cm: 10.0,
            ..TelemetrySnapshot::default()
        };

        let mut ctrl = controller();

        for _ in 0..4 {
            let (movement, cause) = ctrl.proc(&telem);
            assert!(movement == MoveCommand::Left || movement == MoveCommand::Right);
            assert_eq!(cause, DecisionCause::RangeObstacle(10.0));
        }
    }

    #[test]
    fn test_stuck_turns_alternate() {
        let telem = TelemetrySnapshot {
            distance_cm: 10.0,
            ..TelemetrySnapshot::default()
        };

        let mut ctrl = controller();

        let (first, _) = ctrl.proc(&telem);
        let (second, _) = ctrl.proc(&telem);
        let (third, _) = ctrl.proc(&telem);

        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_range_has_priority_over_ir() {
        let telem = TelemetrySnapshot {
            distance_cm: 10.0,
            ir: IrStatus::ObjectDetected,
            ..TelemetrySnapshot::default()
        };

        let (_, cause) = controller().proc(&telem);

        assert_eq!(cause, DecisionCause::RangeObstacle(10.0));
    }
}
