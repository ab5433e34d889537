use bray_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Integrated over the full span and reported every requested sample.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The solution at one requested sample time.
#[derive(Debug, Clone)]
pub struct Sample<I, O> {
    /// The requested time, reported exactly as given.
    pub time: f64,

    /// Model input and output at this time.
    pub snapshot: Snapshot<I, O>,
}

/// Work counters for one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of accepted steps.
    pub accepted: usize,

    /// Number of rejected trial steps.
    pub rejected: usize,

    /// Number of model calls, including those used for sampling.
    pub evaluations: usize,
}

/// The result of a transient solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// One sample per requested time, in order.
    ///
    /// Shorter than the requested list only when stopped by the observer.
    pub samples: Vec<Sample<I, O>>,

    /// Work counters.
    pub stats: Stats,
}
