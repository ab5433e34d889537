//! Command-line driver for Bray–Liebhafsky simulations.
//!
//! ```text
//! bray                                   # reference scenario, RK45, plot
//! bray --method sdirk --no-plot          # stiff solver, summary only
//! bray --scenario run.toml --show-steps  # file overrides plus a step-size plot
//! ```
//!
//! Set `RUST_LOG` to control log output beyond `--verbose`.

mod args;
mod logger;
mod report;
mod scenario;

use std::{error::Error, process::ExitCode};

use bray_kinetics::Scenario;
use clap::Parser;

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut scenario = match &args.scenario {
        Some(path) => {
            tracing::debug!("loading scenario from {}", path.display());
            scenario::load(path)?
        }
        None => Scenario::default(),
    };
    args.apply(&mut scenario);
    tracing::debug!(?scenario, "resolved scenario");

    simulate_and_show(&scenario, args.show_steps)
}

#[cfg(feature = "plot")]
fn simulate_and_show(scenario: &Scenario, show_steps: bool) -> Result<(), Box<dyn Error>> {
    use bray_plot::{PlotObserver, ShowConfig, TrajectoryPlot};

    let mut plot = TrajectoryPlot::new();
    let trajectory = if show_steps {
        let mut steps = PlotObserver::new(["accepted", "rejected"]);
        let trajectory = scenario.run_observed(&mut plot, &mut steps)?;
        steps.show(
            ShowConfig::new()
                .title("Step size")
                .x_label("Time")
                .legend()
                .log_y(),
        )?;
        trajectory
    } else {
        scenario.run(&mut plot)?
    };

    println!("{}", report::summary(&trajectory));
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn simulate_and_show(scenario: &Scenario, show_steps: bool) -> Result<(), Box<dyn Error>> {
    let trajectory = scenario.simulate()?;
    println!("{}", report::summary(&trajectory));

    if scenario.simulation.plot || show_steps {
        tracing::warn!("built without the `plot` feature, skipping plots");
    }
    Ok(())
}
