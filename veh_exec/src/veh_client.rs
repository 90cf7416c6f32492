//! # Vehicle Client
//!
//! The vehicle client owns the network boundary to the vehicle firmware: it
//! fetches telemetry snapshots and dispatches movement commands, each with
//! its own timeout. The navigation manager only ever talks to the
//! [`VehChannel`] trait so the loop can be exercised against a mock channel
//! in tests.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use std::time::Duration;

// Internal
use veh_if::{
    cmd::MoveCommand,
    net::NetParams,
    telem::{TelemDecodeError, TelemPacket, TelemetrySnapshot},
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Abstract command/telemetry channel to the vehicle firmware.
pub trait VehChannel: Send + Sync {
    /// Fetch a fresh telemetry snapshot from the vehicle.
    fn fetch_telem(&self) -> Result<TelemetrySnapshot, VehClientError>;

    /// Dispatch a movement command to the vehicle.
    fn send_cmd(&self, cmd: MoveCommand) -> Result<(), VehClientError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// HTTP client for the vehicle firmware.
pub struct VehClient {
    http: reqwest::blocking::Client,
    base_url: String,
    telem_timeout: Duration,
    cmd_timeout: Duration,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum VehClientError {
    #[error("Could not build the HTTP client: {0}")]
    ClientBuildError(reqwest::Error),

    #[error("Could not reach the vehicle: {0}")]
    RequestError(reqwest::Error),

    #[error("The vehicle returned a non-success status: {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Could not decode the telemetry packet: {0}")]
    TelemDecodeError(TelemDecodeError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VehClient {
    /// Create a new instance of the vehicle client.
    ///
    /// This function does not probe the vehicle, connectivity problems
    /// surface on the first fetch or dispatch.
    pub fn new(params: &NetParams) -> Result<Self, VehClientError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(VehClientError::ClientBuildError)?;

        Ok(Self {
            http,
            base_url: params.base_url(),
            telem_timeout: Duration::from_secs_f64(params.telem_timeout_s),
            cmd_timeout: Duration::from_secs_f64(params.cmd_timeout_s),
        })
    }
}

impl VehChannel for VehClient {
    fn fetch_telem(&self) -> Result<TelemetrySnapshot, VehClientError> {
        let response = self
            .http
            .get(format!("{}/data", self.base_url))
            .timeout(self.telem_timeout)
            .send()
            .map_err(VehClientError::RequestError)?;

        if !response.status().is_success() {
            return Err(VehClientError::BadStatus(response.status()));
        }

        let body = response.text().map_err(VehClientError::RequestError)?;

        let packet = TelemPacket::from_json(&body).map_err(VehClientError::TelemDecodeError)?;

        Ok(TelemetrySnapshot::from(packet))
    }

    fn send_cmd(&self, cmd: MoveCommand) -> Result<(), VehClientError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, cmd.endpoint()))
            .timeout(self.cmd_timeout)
            .send()
            .map_err(VehClientError::RequestError)?;

        match response.status().is_success() {
            true => Ok(()),
            false => Err(VehClientError::BadStatus(response.status())),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// MOCK
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    //! Mock channel for exercising the navigation loop without a vehicle.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Mock implementation of [`VehChannel`] recording every dispatched
    /// command.
    pub(crate) struct MockChannel {
        /// Telemetry returned by successive fetches. A `None` entry, or an
        /// exhausted queue, simulates a fetch failure.
        telem: Mutex<VecDeque<Option<TelemetrySnapshot>>>,

        /// Every command dispatched, in order.
        sent: Mutex<Vec<MoveCommand>>,
    }

    impl MockChannel {
        pub(crate) fn new(telem: Vec<Option<TelemetrySnapshot>>) -> Self {
            Self {
                telem: Mutex::new(telem.into()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn sent(&self) -> Vec<MoveCommand> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl VehChannel for MockChannel {
        fn fetch_telem(&self) -> Result<TelemetrySnapshot, VehClientError> {
            match self.telem.lock().unwrap().pop_front() {
                Some(Some(telem)) => Ok(telem),
                _ => Err(VehClientError::BadStatus(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                )),
            }
        }

        fn send_cmd(&self, cmd: MoveCommand) -> Result<(), VehClientError> {
            self.sent.lock().unwrap().push(cmd);
            Ok(())
        }
    }
}
