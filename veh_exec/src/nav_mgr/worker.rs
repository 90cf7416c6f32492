//! Navigation worker thread
//!
//! One dedicated thread runs the navigation cycle until the run flag is
//! cleared. Within a cycle the steps execute strictly in order: telemetry
//! fetch, mode arbitration, safety checks, movement decision, dispatch.
//! Every failure is recovered locally with a pause; nothing here terminates
//! the loop except the run flag.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{error, info, warn};
use std::sync::{atomic::Ordering, Arc};
use std::thread;
use std::time::Duration;

// Internal
use super::{Params, SharedFlags};
use crate::{
    avoid_ctrl::AvoidCtrl,
    safety_mon::{SafetyMon, SafetyVerdict},
    veh_client::VehChannel,
};
use util::module::State;
use veh_if::cmd::MoveCommand;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Outcome of one navigation cycle, determining the pause before the next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CycleOutcome {
    /// Movement was dispatched.
    Nominal,

    /// Telemetry could not be fetched; retry shortly.
    TelemUnavailable,

    /// The hardware-side toggle has suspended autonomous control.
    ManualOverride,

    /// The safety monitor forbade movement; a stop was dispatched.
    UnsafeConditions,

    /// The anti-stall recovery backed the vehicle up.
    StallRecovery,

    /// A command dispatch failed; movement state unknown.
    DispatchFailed,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Navigation worker entry point.
pub(crate) fn nav_worker(
    shared: Arc<SharedFlags>,
    channel: Arc<dyn VehChannel>,
    mut safety_mon: SafetyMon,
    mut avoid_ctrl: AvoidCtrl,
    params: Params,
) {
    let mut consec_turns = 0u32;

    while shared.running.load(Ordering::SeqCst) {
        let outcome = exec_cycle(
            channel.as_ref(),
            &shared,
            &mut safety_mon,
            &mut avoid_ctrl,
            &mut consec_turns,
            params.max_consec_turns,
        );

        let wait_s = match outcome {
            CycleOutcome::Nominal => params.cycle_period_s,
            CycleOutcome::TelemUnavailable => params.telem_retry_wait_s,
            CycleOutcome::ManualOverride => params.manual_wait_s,
            CycleOutcome::UnsafeConditions => params.unsafe_wait_s,
            // The recovery wait precedes the normal inter-cycle pause
            CycleOutcome::StallRecovery => params.recovery_wait_s + params.cycle_period_s,
            CycleOutcome::DispatchFailed => params.cycle_fail_wait_s,
        };

        thread::sleep(Duration::from_secs_f64(wait_s));
    }

    info!("Navigation worker exited");
}

/// Execute one navigation cycle.
///
/// The returned outcome tells the worker how long to pace before the next
/// cycle.
pub(crate) fn exec_cycle(
    channel: &dyn VehChannel,
    shared: &SharedFlags,
    safety_mon: &mut SafetyMon,
    avoid_ctrl: &mut AvoidCtrl,
    consec_turns: &mut u32,
    max_consec_turns: u32,
) -> CycleOutcome {
    // ---- TELEMETRY ACQUISITION ----

    let telem = match channel.fetch_telem() {
        Ok(t) => t,
        Err(e) => {
            warn!("Could not fetch telemetry: {}", e);
            return CycleOutcome::TelemUnavailable;
        }
    };

    // ---- MODE ARBITRATION ----

    // The hardware-side toggle takes precedence over software state
    if !telem.autonomous_mode {
        if !shared.manual_override.swap(true, Ordering::SeqCst) {
            info!("Manual override active, suspending autonomous control");
        }
        return CycleOutcome::ManualOverride;
    }

    shared.manual_override.store(false, Ordering::SeqCst);

    // ---- SAFETY CHECKS ----

    let (verdict, _) = safety_mon.proc(&telem);

    if let SafetyVerdict::Unsafe(cause) = verdict {
        warn!("Unsafe conditions ({:?}), skipping movement", cause);

        if let Err(e) = channel.send_cmd(MoveCommand::Stop) {
            error!("Could not dispatch emergency stop: {}", e);
        }

        return CycleOutcome::UnsafeConditions;
    }

    // ---- MOVEMENT DECISION AND DISPATCH ----

    let (movement, _) = avoid_ctrl.proc(&telem);

    match movement {
        MoveCommand::Forward => {
            *consec_turns = 0;

            if let Err(e) = channel.send_cmd(MoveCommand::Forward) {
                error!("Could not dispatch forward command: {}", e);
                return CycleOutcome::DispatchFailed;
            }

            info!("Moving forward");
        }
        MoveCommand::Left | MoveCommand::Right => {
            if let Err(e) = channel.send_cmd(movement) {
                error!("Could not dispatch {} command: {}", movement, e);
                return CycleOutcome::DispatchFailed;
            }

            *consec_turns += 1;
            info!("Turning {} (turn #{})", movement, consec_turns);

            // If stuck turning, try backing up
            if *consec_turns >= max_consec_turns {
                info!("Too many consecutive turns, backing up");

                let backward = channel.send_cmd(MoveCommand::Backward);
                *consec_turns = 0;

                if let Err(e) = backward {
                    error!("Could not dispatch backward command: {}", e);
                    return CycleOutcome::DispatchFailed;
                }

                return CycleOutcome::StallRecovery;
            }
        }
        // The avoidance controller never returns backward or stop
        _ => warn!("Unexpected movement decision: {}", movement),
    }

    CycleOutcome::Nominal
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
