//! Numerical solvers for the Bray–Liebhafsky simulator.
//!
//! The only problem class solved here is the initial value problem: given an
//! [`OdeProblem`] and a starting input, integrate forward over a time span and
//! report the state at caller-chosen sample times. See [`transient`].
//!
//! [`OdeProblem`]: bray_core::OdeProblem

pub mod transient;
