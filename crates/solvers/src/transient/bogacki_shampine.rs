//! Bogacki–Shampine 3(2) explicit Runge–Kutta solver.
//!
//! # Algorithm
//!
//! Three stages advance the solution with 3rd-order weights. A fourth stage,
//! evaluated at the new state, feeds the embedded 2nd-order error estimate
//! and is reused as the first stage of the next step (FSAL).
//!
//! Samples between step endpoints use cubic Hermite interpolation.
//!
//! # When to Use
//!
//! Cheaper per step than [`dormand_prince`](super::dormand_prince), which can
//! pay off at loose tolerances. At tight tolerances it needs many more steps.

use bray_core::{Model, Observer, OdeProblem};

use super::{
    Action, Config, Error, Event, Solution,
    integrate::integrate,
    stepper::{Attempt, Point, Rhs, Stepper, combine},
};

const C: [f64; 3] = [0.0, 1.0 / 2.0, 3.0 / 4.0];

const A: [[f64; 2]; 3] = [[0.0, 0.0], [1.0 / 2.0, 0.0], [0.0, 3.0 / 4.0]];

const B: [f64; 3] = [2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0];

/// Difference between the 3rd- and 2nd-order weights, including the FSAL stage.
const E: [f64; 4] = [5.0 / 72.0, -1.0 / 12.0, -1.0 / 9.0, 1.0 / 8.0];

struct BogackiShampine;

impl<const N: usize> Stepper<N> for BogackiShampine {
    const ERROR_ORDER: i32 = 2;

    fn attempt<R: Rhs<N>>(
        &mut self,
        rhs: &mut R,
        start: &Point<N>,
        h: f64,
        config: &Config,
    ) -> Result<Attempt<N>, Error> {
        let y = &start.state;
        let mut k = [start.derivative; 4];

        for s in 1..3 {
            let stage = combine(y, h, &A[s][..s], &k[..s]);
            k[s] = rhs.eval(&stage, C[s] * h)?;
        }

        let next = combine(y, h, &B, &k[..3]);
        k[3] = rhs.eval(&next, h)?;

        let error = combine(&[0.0; N], h, &E, &k);

        Ok(Attempt::Trial {
            state: next,
            error_norm: config.error_norm(&error, y, &next),
        })
    }
}

/// Integrates an ODE problem with the Bogacki–Shampine 3(2) pair.
///
/// `initial` is the model input at `span[0]`. The solution holds one sample
/// per entry of `times`, which must be strictly increasing and inside `span`.
///
/// # Observer
///
/// The observer receives an [`Event`] after each accepted or rejected step
/// and may return [`Action::StopEarly`] to end integration.
///
/// # Errors
///
/// Returns an error if the span or times are invalid, if the model or problem
/// fails, or if the step size or step count limits are hit.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    span: [f64; 2],
    times: &[f64],
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    integrate(
        model,
        problem,
        BogackiShampine,
        initial,
        span,
        times,
        config,
        observer,
    )
}

/// Integrates an ODE problem with the Bogacki–Shampine 3(2) pair without observation.
///
/// # Errors
///
/// Returns an error if the span or times are invalid, if the model or problem
/// fails, or if the step size or step count limits are hit.
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    span: [f64; 2],
    times: &[f64],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, initial, span, times, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::transient::{
        Status,
        test_utils::{
            Decay, Oscillator, PairProblem, ScalarProblem, decay_input, linspace, pair_input,
        },
    };

    #[test]
    fn weights_are_consistent() {
        assert_relative_eq!(B.iter().sum::<f64>(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(E.iter().sum::<f64>(), 0.0, epsilon = 1e-15);
        for (row, c) in A.iter().zip(C) {
            assert_relative_eq!(row.iter().sum::<f64>(), c, epsilon = 1e-15);
        }
    }

    #[test]
    fn exponential_decay_matches_closed_form() {
        let times = linspace(0.0, 5.0, 11);
        let solution = solve_unobserved(
            &Decay { rate: 0.8 },
            &ScalarProblem,
            decay_input(2.0),
            [0.0, 5.0],
            &times,
            &Config::default(),
        )
        .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        for sample in &solution.samples {
            let expected = 2.0 * (-0.8 * sample.time).exp();
            assert_relative_eq!(sample.snapshot.input.value, expected, max_relative = 1e-4);
        }
    }

    #[test]
    fn oscillator_stays_close_over_a_period() {
        let period = 2.0 * std::f64::consts::PI;
        let times = linspace(0.0, period, 21);
        let solution = solve_unobserved(
            &Oscillator,
            &PairProblem,
            pair_input(1.0, 0.0),
            [0.0, period],
            &times,
            &Config::default(),
        )
        .expect("should solve");

        for sample in &solution.samples {
            let [x, v] = sample.snapshot.input.state;
            assert_relative_eq!(x, sample.time.cos(), epsilon = 1e-4);
            assert_relative_eq!(v, -sample.time.sin(), epsilon = 1e-4);
        }
    }

    #[test]
    fn reuses_last_stage_on_acceptance() {
        let solution = solve_unobserved(
            &Decay { rate: 1.0 },
            &ScalarProblem,
            decay_input(1.0),
            [0.0, 1.0],
            &[1.0],
            &Config::default(),
        )
        .expect("should solve");

        // Initial call, initial-step probe, then three calls per trial.
        let trials = solution.stats.accepted + solution.stats.rejected;
        assert_eq!(solution.stats.evaluations, 2 + 3 * trials);
    }
}
