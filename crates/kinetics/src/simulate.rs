use std::time::{Duration, Instant};

use bray_core::Observer;
use bray_solvers::transient::{
    Action, Config, Event, Status, bogacki_shampine, dormand_prince, sdirk,
};
use tracing::{debug, info, warn};

use crate::{
    BrayLiebhafsky, ConfigurationError, Derivative, Error, IntegrationError, KineticsInput,
    KineticsProblem, Method, Rates, SimulationConfig, State, Trajectory,
};

/// Relative tolerance for every method.
const REL_TOL: f64 = 1e-6;

/// Absolute tolerance for every method.
const ABS_TOL: f64 = 1e-9;

/// A solver step event, as seen by observers of [`simulate_observed`].
pub type StepEvent = Event<KineticsInput, Derivative>;

/// Simulates the model from `initial` over `[0, config.t_max]`.
///
/// The result holds `config.n_points` evenly spaced samples. The solver
/// chooses its own internal steps; samples between them come from the
/// method's continuous extension.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if `config` is invalid, before any
/// integration work, and [`Error::Integration`] if the solver fails or the
/// timeout expires. A partial trajectory is never returned.
pub fn simulate(
    initial: &State,
    rates: &Rates,
    config: &SimulationConfig,
) -> Result<Trajectory, Error> {
    simulate_observed(initial, rates, config, ())
}

/// Simulates the model like [`simulate`], reporting each solver step to `observer`.
///
/// The observer sees every accepted and rejected step. Returning
/// [`Action::StopEarly`] aborts the run with [`IntegrationError::Stopped`].
///
/// # Errors
///
/// See [`simulate`].
pub fn simulate_observed<Obs>(
    initial: &State,
    rates: &Rates,
    config: &SimulationConfig,
    mut observer: Obs,
) -> Result<Trajectory, Error>
where
    Obs: Observer<StepEvent, Action>,
{
    config.validate()?;
    let solver_config = Config::new(REL_TOL, ABS_TOL, config.max_steps)
        .map_err(|_| ConfigurationError::MaxSteps)?;
    let mut deadline = config.timeout_duration()?.map(Deadline::start);

    let times = time_grid(config.t_max, config.n_points);
    info!(
        method = %config.method,
        t_max = config.t_max,
        n_points = config.n_points,
        "starting simulation"
    );
    debug!(spacing = times[1] - times[0], "built sample grid");

    let model = BrayLiebhafsky::new(*rates);
    let initial = KineticsInput {
        time: 0.0,
        state: *initial,
    };
    let span = [0.0, config.t_max];

    let mut last_time = 0.0;
    let observe_step = |event: &StepEvent| {
        last_time = event.time();
        deadline
            .as_mut()
            .and_then(|deadline| deadline.observe(event))
            .or_else(|| observer.observe(event))
    };

    let solution = match config.method {
        Method::Rk45 => dormand_prince::solve(
            &model,
            &KineticsProblem,
            initial,
            span,
            &times,
            &solver_config,
            observe_step,
        ),
        Method::Rk23 => bogacki_shampine::solve(
            &model,
            &KineticsProblem,
            initial,
            span,
            &times,
            &solver_config,
            observe_step,
        ),
        Method::Sdirk => sdirk::solve(
            &model,
            &KineticsProblem,
            initial,
            span,
            &times,
            &solver_config,
            observe_step,
        ),
    }
    .map_err(IntegrationError::from)?;

    let stats = solution.stats;
    if solution.status == Status::StoppedByObserver {
        if let Some(deadline) = deadline.filter(|deadline| deadline.expired) {
            let limit = deadline.limit.as_secs_f64();
            warn!(time = last_time, limit, "simulation timed out");
            return Err(IntegrationError::TimedOut {
                time: last_time,
                limit,
            }
            .into());
        }
        return Err(IntegrationError::Stopped { time: last_time }.into());
    }

    info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        evaluations = stats.evaluations,
        "simulation finished"
    );

    let states = solution
        .samples
        .into_iter()
        .map(|sample| sample.snapshot.input.state);
    Ok(Trajectory::new(times, states, config.method, stats))
}

/// Returns `n_points` evenly spaced times over `[0, t_max]`.
///
/// The last time is exactly `t_max`. Requires `n_points >= 2`. Scaling the
/// fraction `i / (n_points - 1)` keeps every time finite for any finite
/// `t_max`.
pub(crate) fn time_grid(t_max: f64, n_points: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let intervals = (n_points - 1) as f64;

    let mut times: Vec<f64> = (0..n_points)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            t_max * (i / intervals)
        })
        .collect();
    times[n_points - 1] = t_max;
    times
}

/// Stops the solver once a wall-clock limit has passed.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    started: Instant,
    limit: Duration,
    expired: bool,
}

impl Deadline {
    fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
            expired: false,
        }
    }
}

impl<E> Observer<E, Action> for Deadline {
    fn observe(&mut self, _event: &E) -> Option<Action> {
        if self.started.elapsed() > self.limit {
            self.expired = true;
            Some(Action::StopEarly)
        } else {
            None
        }
    }
}
