use std::path::PathBuf;

use bray_kinetics::{Method, Scenario};
use clap::Parser;

/// Command-line flags.
///
/// Every simulation flag is optional and, when given, overrides the value
/// from the scenario file (or the reference scenario if there is none).
#[derive(Debug, Clone, Parser)]
#[command(name = "bray", version)]
#[command(about = "Simulate the Bray–Liebhafsky reaction and plot its four species")]
pub struct Args {
    /// TOML scenario with optional [initial], [rates] and [simulation] tables.
    #[arg(long, short, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// End of the integration interval.
    #[arg(long, allow_negative_numbers = true)]
    pub t_max: Option<f64>,

    /// Number of evenly spaced samples, both ends included.
    #[arg(long)]
    pub n_points: Option<usize>,

    /// Integration method: RK45, RK23 or SDIRK.
    #[arg(long, short)]
    pub method: Option<Method>,

    /// Maximum number of solver step attempts.
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Wall-clock limit for the integration, in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Skip the trajectory plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot the solver's step size against time.
    #[arg(long)]
    pub show_steps: bool,

    /// Enable debug logging.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Applies the flags that were given to `scenario`.
    pub fn apply(&self, scenario: &mut Scenario) {
        let simulation = &mut scenario.simulation;
        if let Some(t_max) = self.t_max {
            simulation.t_max = t_max;
        }
        if let Some(n_points) = self.n_points {
            simulation.n_points = n_points;
        }
        if let Some(method) = self.method {
            simulation.method = method;
        }
        if let Some(max_steps) = self.max_steps {
            simulation.max_steps = max_steps;
        }
        if self.timeout.is_some() {
            simulation.timeout = self.timeout;
        }
        if self.no_plot {
            simulation.plot = false;
        }
    }
}
