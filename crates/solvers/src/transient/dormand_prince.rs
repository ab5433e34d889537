//! Dormand–Prince 5(4) explicit Runge–Kutta solver.
//!
//! # Algorithm
//!
//! Seven stages per step, the last of which is evaluated at the new state and
//! reused as the first stage of the next step (FSAL). The solution advances
//! with the 5th-order weights; the difference to the embedded 4th-order
//! solution is the local error estimate.
//!
//! Samples between step endpoints use the method's 4th-order continuous
//! extension, built from the same seven stages.
//!
//! # When to Use
//!
//! This is the general-purpose default. For stiff problems, where stability
//! rather than accuracy limits the step size, prefer [`sdirk`](super::sdirk).

use bray_core::{Model, Observer, OdeProblem};

use super::{
    Action, Config, Error, Event, Solution,
    integrate::integrate,
    stepper::{Attempt, Point, Rhs, Stepper, combine},
};

const C: [f64; 6] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

const A: [[f64; 5]; 6] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
    ],
];

/// 5th-order weights.
const B: [f64; 6] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

/// Difference between the 5th- and 4th-order weights, including the FSAL stage.
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339_200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Continuous extension: stage `j` contributes `Σ_p P[j][p] θ^(p+1)`.
const P: [[f64; 4]; 7] = [
    [
        1.0,
        -8_048_581_381.0 / 2_820_520_608.0,
        8_663_915_743.0 / 2_820_520_608.0,
        -12_715_105_075.0 / 11_282_082_432.0,
    ],
    [0.0, 0.0, 0.0, 0.0],
    [
        0.0,
        131_558_114_200.0 / 32_700_410_799.0,
        -68_118_460_800.0 / 10_900_136_933.0,
        87_487_479_700.0 / 32_700_410_799.0,
    ],
    [
        0.0,
        -1_754_552_775.0 / 470_086_768.0,
        14_199_869_525.0 / 1_410_260_304.0,
        -10_690_763_975.0 / 1_880_347_072.0,
    ],
    [
        0.0,
        127_303_824_393.0 / 49_829_197_408.0,
        -318_862_633_887.0 / 49_829_197_408.0,
        701_980_252_875.0 / 199_316_789_632.0,
    ],
    [
        0.0,
        -282_668_133.0 / 205_662_961.0,
        2_019_193_451.0 / 616_988_883.0,
        -1_453_857_185.0 / 822_651_844.0,
    ],
    [
        0.0,
        40_617_522.0 / 29_380_423.0,
        -110_615_467.0 / 29_380_423.0,
        69_997_945.0 / 29_380_423.0,
    ],
];

/// Stage storage for one step.
struct DormandPrince<const N: usize> {
    k: [[f64; N]; 7],
}

impl<const N: usize> DormandPrince<N> {
    fn new() -> Self {
        Self { k: [[0.0; N]; 7] }
    }
}

impl<const N: usize> Stepper<N> for DormandPrince<N> {
    const ERROR_ORDER: i32 = 4;

    fn attempt<R: Rhs<N>>(
        &mut self,
        rhs: &mut R,
        start: &Point<N>,
        h: f64,
        config: &Config,
    ) -> Result<Attempt<N>, Error> {
        let y = &start.state;
        self.k[0] = start.derivative;

        for s in 1..6 {
            let stage = combine(y, h, &A[s][..s], &self.k[..s]);
            self.k[s] = rhs.eval(&stage, C[s] * h)?;
        }

        let next = combine(y, h, &B, &self.k[..6]);
        self.k[6] = rhs.eval(&next, h)?;

        let error = combine(&[0.0; N], h, &E, &self.k);

        Ok(Attempt::Trial {
            state: next,
            error_norm: config.error_norm(&error, y, &next),
        })
    }

    fn interpolate(&self, start: &Point<N>, _end: &Point<N>, h: f64, theta: f64) -> [f64; N] {
        let weights: [f64; 7] = std::array::from_fn(|j| {
            P[j].iter()
                .rev()
                .fold(0.0, |acc, p| (acc + p) * theta)
        });
        combine(&start.state, h, &weights, &self.k)
    }
}

/// Integrates an ODE problem with the Dormand–Prince 5(4) pair.
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
        DormandPrince::new(),
        initial,
        span,
        times,
        config,
        observer,
    )
}

/// Integrates an ODE problem with the Dormand–Prince 5(4) pair without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
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
