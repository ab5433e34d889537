//! The four-species Bray–Liebhafsky kinetics model and its simulation driver.
//!
//! The model tracks the concentrations of HIO₂ (`U`), I⁻ (`V`), I₂ (`Z`) and
//! O₂ (`W`) under seven constant rate parameters:
//!
//! ```text
//! dU/dt = R1·V + R3·U − R2·U·V − R4·U²
//! dV/dt = R5·Z − R1·V − R2·U·V
//! dZ/dt = R3·U − (R5 + R7)·Z
//! dW/dt = −R6·W
//! ```
//!
//! [`kinetics`] evaluates the right-hand side. [`simulate`] integrates it from
//! an initial [`State`] over `[0, t_max]` with an adaptive solver and returns
//! a [`Trajectory`] sampled at `n_points` evenly spaced times.
//!
//! ```no_run
//! use bray_kinetics::{Scenario, Species, simulate};
//!
//! let scenario = Scenario::default();
//! let trajectory = simulate(&scenario.initial, &scenario.rates, &scenario.simulation)?;
//!
//! let o2 = trajectory.values(Species::W);
//! println!("O₂ at t = {}: {}", trajectory.t_max(), o2[o2.len() - 1]);
//! # Ok::<(), bray_kinetics::Error>(())
//! ```
//!
//! Rendering is left to implementors of [`Render`]; nothing here draws.

mod config;
mod error;
mod kinetics;
mod rates;
mod render;
mod scenario;
mod simulate;
mod state;
mod trajectory;

pub use bray_solvers::transient::{Action, Stats};

pub use config::{Method, SimulationConfig};
pub use error::{ConfigurationError, Error, IntegrationError};
pub use kinetics::{BrayLiebhafsky, KineticsInput, KineticsProblem, kinetics};
pub use rates::Rates;
pub use render::{Render, RunError};
pub use scenario::Scenario;
pub use simulate::{StepEvent, simulate, simulate_observed};
pub use state::{Derivative, Species, State};
pub use trajectory::Trajectory;
