//! Two-stage singly diagonally implicit Runge–Kutta solver.
//!
//! # Algorithm
//!
//! An L-stable SDIRK 2(1) scheme with diagonal coefficient `γ = 1 − 1/√2`.
//! Each stage solves `k = f(base + hγk)` by simplified Newton iteration
//! against a forward-difference Jacobian taken once per step. The embedded
//! 1st-order solution provides the local error estimate.
//!
//! A stage whose Newton iteration fails to converge, or whose iteration
//! matrix is singular, reports the step as diverged and the driver retries
//! with a smaller step.
//!
//! # When to Use
//!
//! Stiff problems, where explicit schemes are forced into tiny steps by
//! stability rather than accuracy.

mod lu;

use bray_core::{Model, Observer, OdeProblem};

use self::lu::Lu;
use super::{
    Action, Config, Error, Event, Solution,
    integrate::integrate,
    stepper::{Attempt, Point, Rhs, Stepper, combine},
};

const GAMMA: f64 = 1.0 - std::f64::consts::FRAC_1_SQRT_2;

const MAX_NEWTON_ITERATIONS: usize = 10;

/// Newton iteration stops once the scaled stage correction drops below this.
const NEWTON_TOL: f64 = 0.01;

struct Sdirk<const N: usize> {
    /// Jacobian at the start of the current step, kept across rejections.
    jacobian: Option<[[f64; N]; N]>,
}

impl<const N: usize> Sdirk<N> {
    fn new() -> Self {
        Self { jacobian: None }
    }
}

impl<const N: usize> Stepper<N> for Sdirk<N> {
    const ERROR_ORDER: i32 = 1;

    fn attempt<R: Rhs<N>>(
        &mut self,
        rhs: &mut R,
        start: &Point<N>,
        h: f64,
        config: &Config,
    ) -> Result<Attempt<N>, Error> {
        let jacobian = match self.jacobian {
            Some(jacobian) => jacobian,
            None => {
                let jacobian = estimate_jacobian(rhs, start)?;
                self.jacobian = Some(jacobian);
                jacobian
            }
        };

        let iteration: [[f64; N]; N] = std::array::from_fn(|i| {
            std::array::from_fn(|j| {
                let identity = if i == j { 1.0 } else { 0.0 };
                identity - h * GAMMA * jacobian[i][j]
            })
        });
        let Some(lu) = Lu::factor(iteration) else {
            return Ok(Attempt::Diverged);
        };

        let y = &start.state;
        let newton = Newton {
            lu: &lu,
            y,
            h,
            config,
        };

        let Some(k1) = newton.solve(rhs, y, GAMMA * h, start.derivative)? else {
            return Ok(Attempt::Diverged);
        };

        let base = combine(y, h, &[1.0 - GAMMA], &[k1]);
        let Some(k2) = newton.solve(rhs, &base, h, k1)? else {
            return Ok(Attempt::Diverged);
        };

        let next = combine(y, h, &[1.0 - GAMMA, GAMMA], &[k1, k2]);
        let error: [f64; N] = std::array::from_fn(|i| h * GAMMA * (k2[i] - k1[i]));

        Ok(Attempt::Trial {
            state: next,
            error_norm: config.error_norm(&error, y, &next),
        })
    }

    fn accepted(&mut self) {
        self.jacobian = None;
    }
}

/// Simplified Newton iteration for one implicit stage.
struct Newton<'a, const N: usize> {
    lu: &'a Lu<N>,
    y: &'a [f64; N],
    h: f64,
    config: &'a Config,
}

impl<const N: usize> Newton<'_, N> {
    /// Solves `k = f(base + hγk)` at `delta` past the step start.
    ///
    /// Returns `None` if the iteration does not converge.
    fn solve<R: Rhs<N>>(
        &self,
        rhs: &mut R,
        base: &[f64; N],
        delta: f64,
        guess: [f64; N],
    ) -> Result<Option<[f64; N]>, Error> {
        let hg = self.h * GAMMA;
        let mut k = guess;

        for _ in 0..MAX_NEWTON_ITERATIONS {
            let stage = combine(base, hg, &[1.0], &[k]);
            let f = rhs.eval(&stage, delta)?;
            let residual: [f64; N] = std::array::from_fn(|i| f[i] - k[i]);
            let correction = self.lu.solve(&residual);

            for (ki, ci) in k.iter_mut().zip(correction) {
                *ki += ci;
            }
            if !k.iter().all(|v| v.is_finite()) {
                return Ok(None);
            }

            let change: [f64; N] = std::array::from_fn(|i| hg * correction[i]);
            if self.config.error_norm(&change, self.y, &stage) < NEWTON_TOL {
                return Ok(Some(k));
            }
        }

        Ok(None)
    }
}

/// Forward-difference Jacobian of the right-hand side at the step start.
fn estimate_jacobian<R: Rhs<N>, const N: usize>(
    rhs: &mut R,
    start: &Point<N>,
) -> Result<[[f64; N]; N], Error> {
    let mut jacobian = [[0.0; N]; N];

    for j in 0..N {
        let delta = f64::EPSILON.sqrt() * start.state[j].abs().max(1.0);
        let mut state = start.state;
        state[j] += delta;

        let f = rhs.eval(&state, 0.0)?;
        for i in 0..N {
            jacobian[i][j] = (f[i] - start.derivative[i]) / delta;
        }
    }

    Ok(jacobian)
}

/// Integrates an ODE problem with the two-stage L-stable SDIRK scheme.
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
        Sdirk::new(),
        initial,
        span,
        times,
        config,
        observer,
    )
}

/// Integrates an ODE problem with the SDIRK scheme without observation.
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
        dormand_prince,
        test_utils::{
            Decay, PairProblem, ScalarProblem, StiffPair, decay_input, linspace, pair_input,
        },
    };

    /// Right-hand side of `x' = -2x + y`, `y' = 3x` with no model behind it.
    struct Linear;

    impl Rhs<2> for Linear {
        fn eval(&mut self, state: &[f64; 2], _delta: f64) -> Result<[f64; 2], Error> {
            let [x, y] = *state;
            Ok([-2.0 * x + y, 3.0 * x])
        }
    }

    #[test]
    fn jacobian_of_linear_system_is_its_matrix() {
        let state = [0.5, 4.0];
        let start = Point {
            state,
            derivative: Linear.eval(&state, 0.0).unwrap(),
        };

        let jacobian = estimate_jacobian(&mut Linear, &start).unwrap();

        assert_relative_eq!(jacobian[0][0], -2.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[0][1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[1][0], 3.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[1][1], 0.0, epsilon = 1e-6);
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

        for sample in &solution.samples {
            let expected = 2.0 * (-0.8 * sample.time).exp();
            assert_relative_eq!(sample.snapshot.input.value, expected, max_relative = 1e-5);
        }
    }

    #[test]
    fn step_count_does_not_grow_with_stiffness() {
        let config = Config::new(1e-4, 1e-8, 10_000).unwrap();
        let times = linspace(0.0, 10.0, 11);

        for fast in [1e3, 1e6] {
            let solution = solve_unobserved(
                &StiffPair { fast },
                &PairProblem,
                pair_input(1.0, 1.0),
                [0.0, 10.0],
                &times,
                &config,
            )
            .expect("should solve");

            assert!(solution.stats.accepted < 1_000);
            for sample in &solution.samples[1..] {
                let [x, y] = sample.snapshot.input.state;
                assert!(x.abs() < 1e-6);
                assert_relative_eq!(y, (-sample.time).exp(), epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn explicit_solver_runs_out_of_steps_where_implicit_does_not() {
        let config = Config::new(1e-4, 1e-8, 20_000).unwrap();
        let model = StiffPair { fast: 1e6 };

        let explicit = dormand_prince::solve_unobserved(
            &model,
            &PairProblem,
            pair_input(1.0, 1.0),
            [0.0, 10.0],
            &[10.0],
            &config,
        );
        assert!(matches!(explicit, Err(Error::MaxSteps { .. })));

        let implicit = solve_unobserved(
            &model,
            &PairProblem,
            pair_input(1.0, 1.0),
            [0.0, 10.0],
            &[10.0],
            &config,
        );
        assert!(implicit.is_ok());
    }
}
