use bray_core::Observer;
use serde::{Deserialize, Serialize};

use crate::{
    Action, Error, Rates, Render, RunError, SimulationConfig, State, StepEvent, Trajectory,
    simulate_observed,
};

/// Everything one simulation needs: initial state, rates and options.
///
/// Deserializes from a document with `[initial]`, `[rates]` and
/// `[simulation]` tables. Missing tables and keys fall back to the reference
/// scenario, which is also the [`Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub initial: State,
    pub rates: Rates,
    pub simulation: SimulationConfig,
}

impl Scenario {
    /// Simulates this scenario.
    ///
    /// # Errors
    ///
    /// See [`simulate`](crate::simulate).
    pub fn simulate(&self) -> Result<Trajectory, Error> {
        self.simulate_observed(())
    }

    /// Simulates this scenario, reporting each solver step to `observer`.
    ///
    /// # Errors
    ///
    /// See [`simulate`](crate::simulate).
    pub fn simulate_observed<Obs>(&self, observer: Obs) -> Result<Trajectory, Error>
    where
        Obs: Observer<StepEvent, Action>,
    {
        simulate_observed(&self.initial, &self.rates, &self.simulation, observer)
    }

    /// Simulates this scenario and hands the result to `renderer` if
    /// `simulation.plot` is set.
    ///
    /// The trajectory is returned either way.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Simulation`] if the simulation fails, in which case
    /// nothing is rendered, or [`RunError::Render`] if the renderer fails.
    pub fn run<R: Render>(&self, renderer: &mut R) -> Result<Trajectory, RunError<R::Error>> {
        self.run_observed(renderer, ())
    }

    /// Runs like [`run`](Self::run), reporting each solver step to `observer`.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_observed<R, Obs>(
        &self,
        renderer: &mut R,
        observer: Obs,
    ) -> Result<Trajectory, RunError<R::Error>>
    where
        R: Render,
        Obs: Observer<StepEvent, Action>,
    {
        let trajectory = self.simulate_observed(observer)?;
        if self.simulation.plot {
            renderer.render(&trajectory).map_err(RunError::Render)?;
        }
        Ok(trajectory)
    }
}
