//! Module interfaces
//!
//! Each cyclically-processed control module in `veh_exec` shall provide a
//! public struct implementing the `State` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// The module's internal state.
pub trait State {
    /// Data required during initialisation
    type InitData;
    /// An error which can occur during initialisation.
    type InitError;

    /// Data required for cyclic processing.
    type InputData;
    /// Data produced by cyclic processing.
    type OutputData;
    /// A report on the status of the cyclic processing.
    type StatusReport;

    /// Initialise the module.
    ///
    /// # Inputs
    /// - `init_data`: The input data required by the module, normally the
    ///   path of its parameter file.
    ///
    /// # Outputs
    /// - On success `Ok(())`.
    /// - On error an `InitError` instance.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Main module processing function.
    ///
    /// Cyclic processing is infallible: modules degrade to documented
    /// defaults rather than erroring mid-cycle.
    ///
    /// # Inputs
    /// - `input_data`: The data required for processing by the module.
    ///
    /// # Outputs
    /// - A tuple of the output data and status report.
    fn proc(&mut self, input_data: &Self::InputData) -> (Self::OutputData, Self::StatusReport);
}
