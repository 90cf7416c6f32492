//! Host platform utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::env;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Retrieve the software root directory from the `VEH_SW_ROOT` environment
/// variable.
///
/// Parameter files and the room map are resolved relative to this directory,
/// and session directories are created beneath it.
pub fn get_veh_sw_root() -> Result<PathBuf, env::VarError> {
    env::var("VEH_SW_ROOT").map(PathBuf::from)
}
