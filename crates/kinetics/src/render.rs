use thiserror::Error;

use crate::{Error, Trajectory};

/// Consumes a finished trajectory for display.
///
/// Implemented outside this crate; the simulation never depends on how, or
/// whether, its output is drawn.
pub trait Render {
    type Error: std::error::Error + 'static;

    /// Renders `trajectory`, returning once the renderer is done with it.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if rendering fails.
    fn render(&mut self, trajectory: &Trajectory) -> Result<(), Self::Error>;
}

/// Errors from [`Scenario::run`](crate::Scenario::run).
#[derive(Debug, Error)]
pub enum RunError<E> {
    #[error(transparent)]
    Simulation(#[from] Error),

    #[error("rendering failed: {0}")]
    Render(#[source] E),
}
