//! Main vehicle-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Initialise all modules and the vehicle client
//!     - Start the operator shell:
//!         - `start`/`stop` control the background navigation loop
//!         - movement verbs are forwarded as manual commands
//!         - `status` polls and prints one telemetry snapshot
//!
//! The navigation loop itself runs on a dedicated worker thread owned by the
//! [`NavMgr`], decoupled from the operator shell.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{info, warn};
use rustyline::error::ReadlineError;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};
use veh_if::{cmd::MoveCommand, net::NetParams};
use veh_lib::{
    avoid_ctrl::AvoidCtrl,
    nav_mgr::{self, NavMgr},
    room_map::RoomMap,
    safety_mon::SafetyMon,
    veh_client::{VehChannel, VehClient},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Prompt shown by the operator shell.
const PROMPT: &str = "veh $ ";

/// Verb list shown to the operator.
const VERBS: &str = "start, stop, forward, backward, left, right, status, quit";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("veh_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("4WD Vehicle Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let mut net_params: NetParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    let nav_params: nav_mgr::Params =
        util::params::load("nav.toml").wrap_err("Could not load nav params")?;

    // A single optional argument overrides the vehicle address from net.toml
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => (),
        2 => {
            info!("Using vehicle address \"{}\" from the command line", args[1]);
            net_params.vehicle_addr = args[1].clone();
        }
        n => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                n - 1
            ))
        }
    }

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut safety_mon = SafetyMon::default();
    safety_mon
        .init("safety.toml", &session)
        .wrap_err("Failed to initialise SafetyMon")?;
    info!("SafetyMon init complete");

    let mut avoid_ctrl = AvoidCtrl::default();
    avoid_ctrl
        .init("avoid.toml", &session)
        .wrap_err("Failed to initialise AvoidCtrl")?;
    info!("AvoidCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- LOAD MAP ----

    let mut map_path = util::host::get_veh_sw_root().wrap_err("Software root not set")?;
    map_path.push(&nav_params.map_file);

    // A missing or malformed map is recoverable, navigation just runs
    // unmapped
    let map = match RoomMap::load(&map_path) {
        Ok(m) => {
            info!("Map loaded: {} obstacles", m.num_obstacles());
            m
        }
        Err(e) => {
            warn!(
                "Could not load map file {:?}: {}. Navigation will be limited.",
                map_path, e
            );
            RoomMap::default()
        }
    };

    // ---- INITIALISE NETWORK ----

    let veh_client =
        Arc::new(VehClient::new(&net_params).wrap_err("Failed to initialise the VehClient")?);
    info!("VehClient initialised, vehicle at {}", net_params.base_url());

    // ---- INITIALISE NAVIGATION ----

    let mut nav_mgr = NavMgr::new(nav_params, map, safety_mon, avoid_ctrl, veh_client.clone());

    // ---- OPERATOR SHELL ----

    info!("Control system ready");
    println!("Commands: {}", VERBS);

    let history_path = session.session_root.join("history.txt");

    let mut rl = rustyline::DefaultEditor::new().wrap_err("Failed to initialise the shell")?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());

                match OperatorCmd::parse(&line) {
                    Some(OperatorCmd::Quit) => break,
                    Some(OperatorCmd::Start) => nav_mgr.start(),
                    Some(OperatorCmd::Stop) => nav_mgr.stop(),
                    Some(OperatorCmd::Move(cmd)) => nav_mgr.manual_control(cmd),
                    Some(OperatorCmd::Status) => print_status(veh_client.as_ref(), &nav_mgr),
                    None => {
                        if !line.trim().is_empty() {
                            println!("Unknown command. Commands: {}", VERBS);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                warn!("Shell error: {}", e);
                break;
            }
        }
    }

    // ---- SHUTDOWN ----

    if rl.save_history(&history_path).is_err() {
        warn!("Could not save shell history");
    }

    nav_mgr.stop();

    info!("End of execution");

    Ok(())
}

/// Fetch one telemetry snapshot and print it, without touching loop state.
fn print_status(channel: &dyn VehChannel, nav_mgr: &NavMgr) {
    match channel.fetch_telem() {
        Ok(telem) => {
            println!("Distance: {:.1} cm", telem.distance_cm);
            println!("IR: {:?}", telem.ir);
            println!("Motion: {:?}", telem.motion);
            println!("Temperature: {:.1} °C", telem.temperature_c);
            println!("Humidity: {:.1}%", telem.humidity_pc);
            println!("Flame: {:?}", telem.flame);
            println!("Autonomous: {}", telem.autonomous_mode);
            println!("Pose: {}", nav_mgr.pose());
        }
        Err(e) => println!("Failed to get telemetry: {}", e),
    }
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Commands accepted at the operator shell.
enum OperatorCmd {
    Start,
    Stop,
    Move(MoveCommand),
    Status,
    Quit,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl OperatorCmd {
    /// Parse an operator line into a command, `None` if unrecognised.
    fn parse(line: &str) -> Option<Self> {
        let verb = line.trim().to_lowercase();

        match verb.as_str() {
            "start" => Some(OperatorCmd::Start),
            "stop" => Some(OperatorCmd::Stop),
            "status" => Some(OperatorCmd::Status),
            "quit" => Some(OperatorCmd::Quit),
            _ => MoveCommand::from_str(&verb).ok().map(OperatorCmd::Move),
        }
    }
}
