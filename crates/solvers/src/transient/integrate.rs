use bray_core::{Model, Observer, OdeProblem, Snapshot};

use super::{
    Action, Config, Error, Event, Sample, Solution, Stats, Status, TimesError,
    stepper::{Attempt, Point, Rhs, Stepper, combine},
};

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;
const DIVERGED_FACTOR: f64 = 0.5;

/// A model call made while stepping, with the derivative it produced.
struct Evaluation<I, O, const N: usize> {
    state: [f64; N],
    delta: f64,
    derivative: [f64; N],
    snapshot: Snapshot<I, O>,
}

/// Evaluates the model relative to the input at the start of a step.
///
/// The most recent evaluation is kept so that schemes whose last stage lands
/// on the new state (FSAL) do not pay for a second model call on acceptance.
struct StepRhs<'a, M, P, const N: usize>
where
    M: Model,
{
    model: &'a M,
    problem: &'a P,
    base: &'a M::Input,
    evaluations: &'a mut usize,
    last: Option<Evaluation<M::Input, M::Output, N>>,
}

impl<'a, M, P, const N: usize> StepRhs<'a, M, P, N>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    fn new(model: &'a M, problem: &'a P, base: &'a M::Input, evaluations: &'a mut usize) -> Self {
        Self {
            model,
            problem,
            base,
            evaluations,
            last: None,
        }
    }

    fn evaluate(
        &mut self,
        state: &[f64; N],
        delta: f64,
    ) -> Result<Evaluation<M::Input, M::Output, N>, Error> {
        let input = self
            .problem
            .build_input(self.base, state, delta)
            .map_err(Error::problem)?;
        let output = self.model.call(&input).map_err(Error::model)?;
        *self.evaluations += 1;
        let derivative = self
            .problem
            .derivative(&input, &output)
            .map_err(Error::problem)?;

        Ok(Evaluation {
            state: *state,
            delta,
            derivative,
            snapshot: Snapshot::new(input, output),
        })
    }

    /// Returns the evaluation at an accepted state, reusing the last call if it matches.
    fn finish(
        mut self,
        state: &[f64; N],
        delta: f64,
    ) -> Result<Evaluation<M::Input, M::Output, N>, Error> {
        match self.last.take() {
            Some(last) if last.state == *state && last.delta.to_bits() == delta.to_bits() => {
                Ok(last)
            }
            _ => self.evaluate(state, delta),
        }
    }
}

impl<M, P, const N: usize> Rhs<N> for StepRhs<'_, M, P, N>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    fn eval(&mut self, state: &[f64; N], delta: f64) -> Result<[f64; N], Error> {
        let evaluation = self.evaluate(state, delta)?;
        let derivative = evaluation.derivative;
        self.last = Some(evaluation);
        Ok(derivative)
    }
}

/// Integrates `problem` over `span` with `stepper`, sampling at `times`.
///
/// # Algorithm
///
/// 1. Validate the span and sample times.
/// 2. Evaluate the model at the initial input and report any samples at `t0`.
/// 3. Choose a first step (configured, or estimated from the initial slope).
/// 4. Until `t1` is reached:
///    - Attempt a step and measure its scaled error.
///    - On rejection, shrink the step, emit [`Event::Rejected`], and retry.
///    - On acceptance, evaluate the model at the new state, fill in every
///      sample inside the step, emit [`Event::Accepted`], and adjust the
///      step size.
#[allow(clippy::too_many_arguments, clippy::too_many_lines)]
pub(crate) fn integrate<M, P, S, Obs, const N: usize>(
    model: &M,
    problem: &P,
    mut stepper: S,
    initial: M::Input,
    span: [f64; 2],
    times: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
    S: Stepper<N>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let [t0, t1] = span;
    if !t0.is_finite() || !t1.is_finite() || t1 <= t0 {
        return Err(Error::InvalidSpan { start: t0, end: t1 });
    }
    validate_times(times, t0, t1)?;

    let mut stats = Stats::default();

    // Evaluate initial state.
    let output = model.call(&initial).map_err(Error::model)?;
    stats.evaluations += 1;
    let state = problem.state(&initial).map_err(Error::problem)?;
    let derivative = problem
        .derivative(&initial, &output)
        .map_err(Error::problem)?;
    if !all_finite(&derivative) {
        return Err(Error::NonFinite { time: t0 });
    }

    let mut current = Snapshot::new(initial, output);
    let mut start = Point { state, derivative };
    let mut t = t0;

    let mut samples = Vec::with_capacity(times.len());
    let mut pending = times.iter().copied().peekable();
    while let Some(time) = pending.next_if(|&time| time <= t0) {
        samples.push(Sample {
            time,
            snapshot: current.clone(),
        });
    }

    let mut h = match config.first_step() {
        Some(h) => h,
        None => {
            let mut rhs = StepRhs::new(model, problem, &current.input, &mut stats.evaluations);
            initial_step(&mut rhs, &start, S::ERROR_ORDER, config)?
        }
    }
    .min(t1 - t0);

    let exponent = -1.0 / f64::from(S::ERROR_ORDER + 1);
    let mut attempts = 0_usize;
    let mut just_rejected = false;

    while t < t1 {
        if attempts == config.max_steps() {
            return Err(Error::MaxSteps {
                time: t,
                steps: attempts,
            });
        }
        attempts += 1;

        let min_step = 10.0 * f64::EPSILON * t.abs().max(t1 - t0);
        h = h.min(config.max_step());
        if h < min_step {
            return Err(Error::StepSizeTooSmall { time: t, step: h });
        }

        // Stretch the last step onto `t1` instead of leaving a sliver.
        let remaining = t1 - t;
        let (step, t_next) = if remaining - h <= min_step {
            (remaining, t1)
        } else {
            (h, t + h)
        };

        let mut rhs = StepRhs::new(model, problem, &current.input, &mut stats.evaluations);
        let attempt = stepper.attempt(&mut rhs, &start, step, config)?;
        let error_norm = match attempt {
            Attempt::Trial { error_norm, .. } => error_norm,
            Attempt::Diverged => f64::INFINITY,
        };

        let state = match attempt {
            Attempt::Trial { state, .. } if error_norm <= 1.0 => state,
            _ => {
                drop(rhs);
                stats.rejected += 1;
                h = step
                    * match attempt {
                        Attempt::Trial { .. } if error_norm.is_finite() => {
                            (SAFETY * error_norm.powf(exponent)).max(MIN_FACTOR)
                        }
                        Attempt::Trial { .. } => MIN_FACTOR,
                        Attempt::Diverged => DIVERGED_FACTOR,
                    };
                just_rejected = true;

                let event = Event::Rejected {
                    time: t,
                    step_size: step,
                    error_norm,
                };
                if let Some(Action::StopEarly) = observer.observe(&event) {
                    return Ok(Solution {
                        status: Status::StoppedByObserver,
                        samples,
                        stats,
                    });
                }
                continue;
            }
        };

        // Evaluate model at the accepted state.
        let end = rhs.finish(&state, step)?;
        if !all_finite(&end.derivative) {
            return Err(Error::NonFinite { time: t_next });
        }
        let end_point = Point {
            state,
            derivative: end.derivative,
        };
        stepper.accepted();

        // Fill in samples covered by this step.
        while let Some(time) = pending.next_if(|&time| time <= t_next) {
            let snapshot = if time.to_bits() == t_next.to_bits() {
                end.snapshot.clone()
            } else {
                let delta = time - t;
                let sampled = stepper.interpolate(&start, &end_point, step, delta / step);
                let input = problem
                    .build_input(&current.input, &sampled, delta)
                    .map_err(Error::problem)?;
                let output = model.call(&input).map_err(Error::model)?;
                stats.evaluations += 1;
                Snapshot::new(input, output)
            };
            samples.push(Sample { time, snapshot });
        }

        t = t_next;
        start = end_point;
        current = end.snapshot;
        stats.accepted += 1;

        let event = Event::Accepted {
            step: stats.accepted,
            time: t,
            step_size: step,
            snapshot: current.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                samples,
                stats,
            });
        }

        let mut factor = if error_norm == 0.0 {
            MAX_FACTOR
        } else {
            (SAFETY * error_norm.powf(exponent)).clamp(MIN_FACTOR, MAX_FACTOR)
        };
        if just_rejected {
            factor = factor.min(1.0);
        }
        just_rejected = false;
        h = step * factor;
    }

    debug_assert_eq!(samples.len(), times.len());

    Ok(Solution {
        status: Status::Complete,
        samples,
        stats,
    })
}

/// Estimates a first step size from the initial slope.
///
/// Follows the heuristic in Hairer, Nørsett & Wanner, "Solving Ordinary
/// Differential Equations I", section II.4.
fn initial_step<R: Rhs<N>, const N: usize>(
    rhs: &mut R,
    start: &Point<N>,
    order: i32,
    config: &Config,
) -> Result<f64, Error> {
    let scale: [f64; N] = std::array::from_fn(|i| config.scale(start.state[i], start.state[i]));
    let d0 = rms(&start.state, &scale);
    let d1 = rms(&start.derivative, &scale);

    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    }
    .min(config.max_step());

    let probe = combine(&start.state, h0, &[1.0], &[start.derivative]);
    let slope = rhs.eval(&probe, h0)?;
    let change: [f64; N] = std::array::from_fn(|i| slope[i] - start.derivative[i]);
    let d2 = rms(&change, &scale) / h0;

    let h1 = if d1.max(d2) <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / f64::from(order + 1))
    };

    Ok((100.0 * h0).min(h1).min(config.max_step()))
}

fn validate_times(times: &[f64], t0: f64, t1: f64) -> Result<(), TimesError> {
    if times.is_empty() {
        return Err(TimesError::Empty);
    }
    for (index, &time) in times.iter().enumerate() {
        if !time.is_finite() {
            return Err(TimesError::NonFinite { index, time });
        }
        if time < t0 || time > t1 {
            return Err(TimesError::OutOfSpan { index, time });
        }
        if index > 0 && time <= times[index - 1] {
            return Err(TimesError::NotIncreasing { index, time });
        }
    }
    Ok(())
}

fn rms<const N: usize>(values: &[f64; N], scale: &[f64; N]) -> f64 {
    let sum: f64 = values
        .iter()
        .zip(scale)
        .map(|(v, s)| (v / s).powi(2))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let n = N as f64;
    (sum / n).sqrt()
}

fn all_finite<const N: usize>(values: &[f64; N]) -> bool {
    values.iter().all(|v| v.is_finite())
}
