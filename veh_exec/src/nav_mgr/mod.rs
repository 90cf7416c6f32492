//! # Navigation manager module
//!
//! This module implements the [`NavMgr`] state machine, which owns the
//! autonomous navigation loop. The machine has three states:
//!
//! - `Stopped` - No navigation is taking place. Manual movement commands are
//!   forwarded to the vehicle.
//! - `Running-Autonomous` - The background worker cycles fetch → mode check
//!   → safety check → decision → dispatch. Manual movement commands are
//!   rejected.
//! - `Running-ManualOverride` - The hardware-side toggle has suspended
//!   autonomous control. The worker keeps polling but dispatches nothing;
//!   manual movement commands are forwarded.
//!
//! The run and override flags are owned by the manager and shared with the
//! worker as atomics, never as process-wide globals. Cancellation is
//! cooperative: `stop()` clears the run flag, dispatches an unconditional
//! stop command and joins the worker, which observes the flag at the top of
//! its next cycle.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod worker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{error, info, warn};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::JoinHandle;

// Internal
pub use params::*;

use crate::{
    avoid_ctrl::AvoidCtrl, loc::Pose, room_map::RoomMap, safety_mon::SafetyMon,
    veh_client::VehChannel,
};
use veh_if::cmd::MoveCommand;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation manager
///
/// Owns the autonomous navigation loop: the run/override state, the worker
/// thread, and the control modules composed each cycle.
pub struct NavMgr {
    /// Parameters for the navigation manager.
    pub params: Params,

    /// Room map loaded at startup. Exposed for future planning work; the
    /// navigation cycle does not consult it.
    pub map: RoomMap,

    /// Placeholder vehicle pose.
    pose: Pose,

    /// Prototype safety monitor, cloned into each worker.
    safety_mon: SafetyMon,

    /// Prototype avoidance controller, cloned into each worker.
    avoid_ctrl: AvoidCtrl,

    /// Channel to the vehicle firmware.
    channel: Arc<dyn VehChannel>,

    /// Flags shared with the worker thread.
    shared: Arc<SharedFlags>,

    /// Handle of the running worker thread.
    worker: Option<JoinHandle<()>>,
}

/// Flags shared between the navigation manager and its worker thread.
pub(crate) struct SharedFlags {
    /// True while the navigation loop shall keep cycling. Checked at the top
    /// of every cycle.
    pub(crate) running: AtomicBool,

    /// True while the hardware-side toggle has suspended autonomous control.
    pub(crate) manual_override: AtomicBool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl NavMgr {
    /// Create a new navigation manager in the `Stopped` state.
    pub fn new(
        params: Params,
        map: RoomMap,
        safety_mon: SafetyMon,
        avoid_ctrl: AvoidCtrl,
        channel: Arc<dyn VehChannel>,
    ) -> Self {
        Self {
            params,
            map,
            pose: Pose::default(),
            safety_mon,
            avoid_ctrl,
            channel,
            shared: Arc::new(SharedFlags {
                running: AtomicBool::new(false),
                manual_override: AtomicBool::new(false),
            }),
            worker: None,
        }
    }

    /// True while the navigation loop is running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Current placeholder pose of the vehicle.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Start the autonomous navigation loop.
    ///
    /// A no-op if the loop is already running.
    pub fn start(&mut self) {
        if self.is_running() {
            info!("Navigation already running");
            return;
        }

        self.shared.running.store(true, Ordering::SeqCst);
        self.shared.manual_override.store(false, Ordering::SeqCst);

        let shared = self.shared.clone();
        let channel = self.channel.clone();
        let safety_mon = self.safety_mon.clone();
        let avoid_ctrl = self.avoid_ctrl.clone();
        let params = self.params.clone();

        self.worker = Some(std::thread::spawn(move || {
            worker::nav_worker(shared, channel, safety_mon, avoid_ctrl, params)
        }));

        info!("Autonomous navigation started");
    }

    /// Stop the autonomous navigation loop.
    ///
    /// The stop command is dispatched unconditionally, whether or not the
    /// loop was running. The worker observes the cleared run flag at the top
    /// of its next cycle, so at most one in-flight cycle completes after
    /// this call returns the join.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);

        if let Err(e) = self.channel.send_cmd(MoveCommand::Stop) {
            error!("Could not dispatch stop command: {}", e);
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Navigation worker panicked");
            }
        }

        info!("Navigation stopped");
    }

    /// Forward a manual movement command to the vehicle.
    ///
    /// Accepted only while the manual override is active or the loop is not
    /// running; rejected with a warning otherwise, as autonomous mode holds
    /// exclusive control of movement.
    pub fn manual_control(&self, cmd: MoveCommand) {
        if self.shared.manual_override.load(Ordering::SeqCst) || !self.is_running() {
            match self.channel.send_cmd(cmd) {
                Ok(()) => info!("Manual command: {}", cmd),
                Err(e) => error!("Could not dispatch manual command {}: {}", cmd, e),
            }
        } else {
            warn!("Manual commands are rejected while autonomous mode is active");
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::veh_client::mock::MockChannel;

    /// Params with waits short enough to keep the tests quick
    fn test_params() -> Params {
        Params {
            cycle_period_s: 0.01,
            telem_retry_wait_s: 0.01,
            manual_wait_s: 0.01,
            unsafe_wait_s: 0.01,
            recovery_wait_s: 0.01,
            cycle_fail_wait_s: 0.01,
            ..Params::default()
        }
    }

    fn manager(channel: Arc<MockChannel>) -> NavMgr {
        NavMgr::new(
            test_params(),
            RoomMap::default(),
            SafetyMon::default(),
            AvoidCtrl::default(),
            channel,
        )
    }

    #[test]
    fn test_stop_is_idempotent() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let mut mgr = manager(channel.clone());

        mgr.stop();
        mgr.stop();

        assert!(!mgr.is_running());
        assert_eq!(
            channel.sent(),
            vec![MoveCommand::Stop, MoveCommand::Stop]
        );
    }

    #[test]
    fn test_start_and_stop() {
        // No telemetry queued, the worker just retries fetches
        let channel = Arc::new(MockChannel::new(vec![]));
        let mut mgr = manager(channel.clone());

        mgr.start();
        assert!(mgr.is_running());

        // Starting again is a no-op
        mgr.start();
        assert!(mgr.is_running());

        mgr.stop();
        assert!(!mgr.is_running());
        assert_eq!(channel.sent(), vec![MoveCommand::Stop]);
    }

    #[test]
    fn test_manual_commands_rejected_while_autonomous() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let mut mgr = manager(channel.clone());

        mgr.start();
        mgr.manual_control(MoveCommand::Forward);
        mgr.stop();

        // Only the stop from stop() reached the vehicle
        assert_eq!(channel.sent(), vec![MoveCommand::Stop]);
    }

    #[test]
    fn test_manual_commands_accepted_while_stopped() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let mgr = manager(channel.clone());

        mgr.manual_control(MoveCommand::Forward);
        mgr.manual_control(MoveCommand::Left);

        assert_eq!(channel.sent(), vec![MoveCommand::Forward, MoveCommand::Left]);
    }
}
