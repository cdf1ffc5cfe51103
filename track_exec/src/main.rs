//! Track planner executable.
//!
//! Runs the local path planner over the named test scenarios, logging the intermediate results
//! and output paths.
//!
//! # Usage
//!
//! - `track_exec list` - list the available scenarios
//! - `track_exec run <name>` - plan a single scenario and print the path
//! - `track_exec all` - plan every scenario and print a summary of each

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info, warn};
use serde::Serialize;
use structopt::StructOpt;

// Internal
use track_lib::{
    nav::{PathPlanner, PlanReport, PlannerParams},
    path::Path,
    scenarios::{self, Scenario},
};
use util::{
    logger::{logger_init, LevelFilter, LogConfig},
    params::LoadError,
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "track_exec", about = "Local path planning between track boundaries")]
struct Opts {
    /// Parameter file name, relative to the params directory in the software root.
    #[structopt(long, default_value = "planner.toml")]
    params: String,

    /// Save the path and planning report of each scenario as JSON in the session directory.
    #[structopt(long)]
    json: bool,

    /// Drop the per-stage planner traces, keeping everything else at trace level.
    #[structopt(long)]
    quiet: bool,

    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, StructOpt)]
enum Cmd {
    /// List the available scenarios.
    #[structopt(name = "list")]
    List,

    /// Plan a single scenario.
    #[structopt(name = "run")]
    Run {
        /// The scenario identifier.
        name: String,
    },

    /// Plan every scenario.
    #[structopt(name = "all")]
    All,
}

/// Data archived for each planned scenario.
#[derive(Serialize)]
struct PlanArchive<'a> {
    scenario: &'a Scenario,
    report: &'a PlanReport,
    path: &'a Path,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("track_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    let mut log_config = LogConfig::new(LevelFilter::Trace);
    if opts.quiet {
        log_config = log_config.level_for("track_lib::nav", LevelFilter::Debug);
    }
    logger_init(&log_config, &session).wrap_err("Failed to initialise logging")?;

    info!("Track Planner Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: PlannerParams = match util::params::load(&opts.params) {
        Ok(p) => p,
        Err(LoadError::SwRootNotSet) => {
            warn!("Software root not set, using default planner parameters");
            PlannerParams::default()
        }
        Err(e) => return Err(e).wrap_err("Could not load planner params"),
    };

    let planner = PathPlanner::new(params).wrap_err("Invalid planner parameters")?;

    info!("Planner parameters: {:?}", planner.params());

    // ---- EXECUTE ----

    match opts.cmd {
        Cmd::List => {
            for name in scenarios::scenario_names() {
                println!("{}", name);
            }
        }
        Cmd::Run { name } => {
            let scenario = scenarios::make_scenario(&name)?;
            let path = run_scenario(&planner, &scenario, &session, opts.json)?;

            for (i, p) in path.points_m.iter().enumerate() {
                println!("{:3} {:10.4} {:10.4}", i, p.x, p.y);
            }
        }
        Cmd::All => {
            for scenario in scenarios::all_scenarios() {
                run_scenario(&planner, &scenario, &session, opts.json)?;
            }
        }
    }

    info!("End of execution");

    Ok(())
}

/// Plan the given scenario, logging a summary and optionally archiving the results.
fn run_scenario(
    planner: &PathPlanner,
    scenario: &Scenario,
    session: &Session,
    save: bool,
) -> Result<Path> {
    let (path, report) = planner.plan_with_report(&scenario.cones, &scenario.pose);

    let case = match report.case {
        Some(c) => format!("{:?}", c),
        None => "StraightAhead".to_string(),
    };

    info!(
        "Scenario {:>2}: {:>2} cones ({} L, {} R usable), case {}, {} waypoints, {} points, {:.3} m",
        scenario.name,
        scenario.cones.len(),
        report.num_left,
        report.num_right,
        case,
        report.waypoints_m.len(),
        path.get_num_points(),
        path.get_length().unwrap_or(0.0)
    );

    for (i, w) in report.waypoints_m.iter().enumerate() {
        debug!("    waypoint {}: ({:.4}, {:.4})", i, w.x, w.y);
    }

    if save {
        session
            .save_json(
                format!("{}_path.json", scenario.name),
                &PlanArchive {
                    scenario,
                    report: &report,
                    path: &path,
                },
            )
            .wrap_err("Failed to save the planned path")?;
    }

    Ok(path)
}
