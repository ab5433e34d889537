use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during transient integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid span [{start}, {end}]: bounds must be finite and increasing")]
    InvalidSpan { start: f64, end: f64 },

    #[error("invalid sample times: {0}")]
    InvalidTimes(#[from] TimesError),

    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("step size {step:e} at t = {time} fell below the minimum step")]
    StepSizeTooSmall { time: f64, step: f64 },

    #[error("non-finite derivative at t = {time}")]
    NonFinite { time: f64 },

    #[error("exceeded {steps} step attempts at t = {time}")]
    MaxSteps { time: f64, steps: usize },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}

/// Reasons a list of sample times is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TimesError {
    #[error("no sample times requested")]
    Empty,

    #[error("time {time} at index {index} is not finite")]
    NonFinite { index: usize, time: f64 },

    #[error("time {time} at index {index} does not increase")]
    NotIncreasing { index: usize, time: f64 },

    #[error("time {time} at index {index} lies outside the span")]
    OutOfSpan { index: usize, time: f64 },
}
