//! Core traits and types for the Bray–Liebhafsky simulator.
//!
//! This crate defines the shared abstractions that the solvers and the
//! kinetics model build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model to a fixed-size state vector so generic
//!   ODE solvers can integrate it

mod model;
mod observer;
mod problems;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::OdeProblem;
