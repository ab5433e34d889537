use bray_core::Snapshot;

/// Events emitted by the transient solvers.
#[derive(Debug, Clone)]
pub enum Event<I, O> {
    /// A trial step met the error tolerance and the solution advanced.
    Accepted {
        /// Number of accepted steps so far, starting at 1.
        step: usize,

        /// Time at the end of the step.
        time: f64,

        /// Size of the accepted step.
        step_size: f64,

        /// Snapshot of the model input and output at the end of the step.
        snapshot: Snapshot<I, O>,
    },

    /// A trial step failed and will be retried with a smaller step.
    Rejected {
        /// Time at the start of the failed trial.
        time: f64,

        /// Size of the failed trial.
        step_size: f64,

        /// Scaled error norm of the trial.
        ///
        /// Infinite when the trial could not be completed at all, as when an
        /// implicit stage fails to converge.
        error_norm: f64,
    },
}

impl<I, O> Event<I, O> {
    /// Returns the time associated with this event.
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            Self::Accepted { time, .. } | Self::Rejected { time, .. } => *time,
        }
    }

    /// Returns the step size associated with this event.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        match self {
            Self::Accepted { step_size, .. } | Self::Rejected { step_size, .. } => *step_size,
        }
    }
}
