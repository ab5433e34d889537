//! Adaptive solvers for ODE problems.
//!
//! Every solver in this module integrates an [`OdeProblem`] over a span
//! `[t0, t1]`, choosing its own internal step sizes to keep the local error
//! estimate within the configured tolerances. Callers never see the internal
//! steps directly; instead they request a list of sample times and receive
//! one [`Sample`] per requested time, in order.
//!
//! # Solvers
//!
//! - [`dormand_prince`]: explicit 5(4) pair, the general-purpose default
//! - [`bogacki_shampine`]: explicit 3(2) pair, cheaper per step
//! - [`sdirk`]: L-stable singly diagonally implicit 2(1) pair for stiff
//!   problems
//!
//! All three share the same signature:
//!
//! ```ignore
//! use bray_solvers::transient::{Config, dormand_prince};
//!
//! let times = [0.0, 0.5, 1.0];
//! let solution =
//!     dormand_prince::solve_unobserved(&model, &problem, initial, [0.0, 1.0], &times, &Config::default())?;
//!
//! for sample in &solution.samples {
//!     println!("t={}: {:?}", sample.time, sample.snapshot.output);
//! }
//! ```
//!
//! # Step control
//!
//! A trial step of size `h` produces an embedded error estimate `e`. Its size
//! is measured with the RMS norm of `e_i / (abs_tol + rel_tol * max(|y_i|, |ŷ_i|))`.
//! A norm of at most one accepts the step. The next step size is scaled by
//! `0.9 * norm^(-1/(q+1))`, where `q` is the order of the embedded estimate,
//! clamped to `[0.2, 5]`. Directly after a rejection the step is never grown.
//!
//! # Sampling
//!
//! Requested times that fall inside an accepted step are filled in with the
//! method's continuous extension, so sample accuracy matches step accuracy
//! without forcing the solver to land on each sample time.
//!
//! # Observer Events
//!
//! The observer receives [`Event::Accepted`] after every accepted step and
//! [`Event::Rejected`] after every rejected trial. Returning
//! [`Action::StopEarly`] ends integration with [`Status::StoppedByObserver`].
//!
//! [`OdeProblem`]: bray_core::OdeProblem

mod action;
mod config;
mod error;
mod event;
mod integrate;
mod solution;
mod stepper;

#[cfg(test)]
mod test_utils;

pub mod bogacki_shampine;
pub mod dormand_prince;
pub mod sdirk;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::{Error, TimesError};
pub use event::Event;
pub use solution::{Sample, Solution, Stats, Status};
