use bray_solvers::transient;
use thiserror::Error;

/// Errors returned by the simulation driver.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationError),
}

/// A configuration option is invalid.
///
/// Always detected before any integration work starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("t_max must be finite and positive with a representable sample spacing, got {0}")]
    TMax(f64),

    #[error("n_points must be at least 2, got {0}")]
    NPoints(usize),

    #[error("unknown integration method {0:?} (expected RK45, RK23 or SDIRK)")]
    UnknownMethod(String),

    #[error("max_steps must be positive")]
    MaxSteps,

    #[error("timeout must be a finite, positive number of seconds, got {0}")]
    Timeout(f64),
}

/// The solver could not produce a complete trajectory.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error(transparent)]
    Solver(transient::Error),

    #[error("timed out after {limit} s at t = {time}")]
    TimedOut { time: f64, limit: f64 },

    #[error("stopped by observer at t = {time}")]
    Stopped { time: f64 },
}

impl From<transient::Error> for IntegrationError {
    fn from(err: transient::Error) -> Self {
        Self::Solver(err)
    }
}
