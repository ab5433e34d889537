//! Native plot windows for Bray–Liebhafsky simulations.
//!
//! - [`TrajectoryPlot`] renders a finished [`Trajectory`] as four panels, one
//!   per species. It implements [`Render`], so it plugs into
//!   [`Scenario::run`].
//! - [`PlotObserver`] records traces while the solver runs, such as step size
//!   against time, and shows them once the run is over.
//!
//! Every window blocks until the user closes it.
//!
//! [`Trajectory`]: bray_kinetics::Trajectory
//! [`Render`]: bray_kinetics::Render
//! [`Scenario::run`]: bray_kinetics::Scenario::run

mod observer;
mod trajectory;

pub use observer::{PlotObserver, Plottable, ShowConfig};
pub use trajectory::{Panel, TrajectoryPlot};
