//! Small ODE problems with known solutions, shared by the solver tests.

use std::convert::Infallible;

use bray_core::{Model, OdeProblem};

/// Returns `n` evenly spaced times over `[start, end]`, ending exactly on `end`.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let last = (n - 1) as f64;
    let mut times: Vec<f64> = (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            start + (end - start) * i / last
        })
        .collect();
    times[n - 1] = end;
    times
}

/// Input for scalar problems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScalarInput {
    pub(crate) time: f64,
    pub(crate) value: f64,
}

pub(crate) fn decay_input(value: f64) -> ScalarInput {
    ScalarInput { time: 0.0, value }
}

/// Exponential decay: y' = -rate * y.
pub(crate) struct Decay {
    pub(crate) rate: f64,
}

impl Model for Decay {
    type Input = ScalarInput;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &ScalarInput) -> Result<f64, Infallible> {
        Ok(-self.rate * input.value)
    }
}

/// Adapts scalar models to a one-component state.
pub(crate) struct ScalarProblem;

impl OdeProblem<1> for ScalarProblem {
    type Input = ScalarInput;
    type Output = f64;
    type Error = Infallible;

    fn state(&self, input: &ScalarInput) -> Result<[f64; 1], Infallible> {
        Ok([input.value])
    }

    fn derivative(&self, _input: &ScalarInput, output: &f64) -> Result<[f64; 1], Infallible> {
        Ok([*output])
    }

    fn build_input(
        &self,
        base: &ScalarInput,
        state: &[f64; 1],
        delta: f64,
    ) -> Result<ScalarInput, Infallible> {
        Ok(ScalarInput {
            time: base.time + delta,
            value: state[0],
        })
    }
}

/// Blow-up in finite time: y' = y², which reaches infinity at t = 1 / y0.
pub(crate) struct Blowup;

impl Model for Blowup {
    type Input = ScalarInput;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &ScalarInput) -> Result<f64, Infallible> {
        Ok(input.value * input.value)
    }
}

/// Input for two-component problems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PairInput {
    pub(crate) time: f64,
    pub(crate) state: [f64; 2],
}

pub(crate) fn pair_input(position: f64, velocity: f64) -> PairInput {
    PairInput {
        time: 0.0,
        state: [position, velocity],
    }
}

/// Undamped unit oscillator: x' = v, v' = -x.
pub(crate) struct Oscillator;

impl Model for Oscillator {
    type Input = PairInput;
    type Output = [f64; 2];
    type Error = Infallible;

    fn call(&self, input: &PairInput) -> Result<[f64; 2], Infallible> {
        let [x, v] = input.state;
        Ok([v, -x])
    }
}

/// Adapts two-component models to their state.
pub(crate) struct PairProblem;

impl OdeProblem<2> for PairProblem {
    type Input = PairInput;
    type Output = [f64; 2];
    type Error = Infallible;

    fn state(&self, input: &PairInput) -> Result<[f64; 2], Infallible> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        _input: &PairInput,
        output: &[f64; 2],
    ) -> Result<[f64; 2], Infallible> {
        Ok(*output)
    }

    fn build_input(
        &self,
        base: &PairInput,
        state: &[f64; 2],
        delta: f64,
    ) -> Result<PairInput, Infallible> {
        Ok(PairInput {
            time: base.time + delta,
            state: *state,
        })
    }
}

/// Stiff linear pair: a fast mode decaying at `fast` and a slow one at 1.
///
/// x' = -fast * x, y' = -y.
pub(crate) struct StiffPair {
    pub(crate) fast: f64,
}

impl Model for StiffPair {
    type Input = PairInput;
    type Output = [f64; 2];
    type Error = Infallible;

    fn call(&self, input: &PairInput) -> Result<[f64; 2], Infallible> {
        let [x, y] = input.state;
        Ok([-self.fast * x, -y])
    }
}
