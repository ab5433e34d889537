use std::convert::Infallible;

use bray_core::{Model, OdeProblem};

use crate::{Derivative, Rates, State};

/// Evaluates the right-hand side of the model equations.
///
/// The system is autonomous; `_time` is accepted only so the signature matches
/// the solver's view of an ODE. Any finite inputs are accepted and no value is
/// clamped.
#[must_use]
pub fn kinetics(_time: f64, state: &State, rates: &Rates) -> Derivative {
    let State { u, v, z, w } = *state;
    let Rates {
        r1,
        r2,
        r3,
        r4,
        r5,
        r6,
        r7,
    } = *rates;

    let uv = r2 * u * v;

    Derivative {
        du: r1 * v + r3 * u - uv - r4 * u * u,
        dv: r5 * z - r1 * v - uv,
        dz: r3 * u - (r5 + r7) * z,
        dw: -r6 * w,
    }
}

/// Time and concentrations at which the model is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KineticsInput {
    pub time: f64,
    pub state: State,
}

/// [`kinetics`] with fixed rates, as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrayLiebhafsky {
    pub rates: Rates,
}

impl BrayLiebhafsky {
    #[must_use]
    pub fn new(rates: Rates) -> Self {
        Self { rates }
    }
}

impl Model for BrayLiebhafsky {
    type Input = KineticsInput;
    type Output = Derivative;
    type Error = Infallible;

    fn call(&self, input: &KineticsInput) -> Result<Derivative, Infallible> {
        Ok(kinetics(input.time, &input.state, &self.rates))
    }
}

/// Exposes the four concentrations of [`BrayLiebhafsky`] to the ODE solvers.
#[derive(Debug, Clone, Copy, Default)]
pub struct KineticsProblem;

impl OdeProblem<4> for KineticsProblem {
    type Input = KineticsInput;
    type Output = Derivative;
    type Error = Infallible;

    fn state(&self, input: &KineticsInput) -> Result<[f64; 4], Infallible> {
        Ok(input.state.into())
    }

    fn derivative(
        &self,
        _input: &KineticsInput,
        output: &Derivative,
    ) -> Result<[f64; 4], Infallible> {
        Ok((*output).into())
    }

    fn build_input(
        &self,
        base: &KineticsInput,
        state: &[f64; 4],
        delta: f64,
    ) -> Result<KineticsInput, Infallible> {
        Ok(KineticsInput {
            time: base.time + delta,
            state: State::from(*state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reference_point_derivative() {
        let d = kinetics(0.0, &State::default(), &Rates::default());

        // R1·V + R3·U − R2·U·V − R4·U² = 3.4825 + 1990 − 995000 − 2800
        assert_relative_eq!(d.du, -995_806.5175, max_relative = 1e-12);
        // R5·Z − R1·V − R2·U·V = 3 − 3.4825 − 995000
        assert_relative_eq!(d.dv, -995_000.4825, max_relative = 1e-12);
        // R3·U − (R5 + R7)·Z = 1990 − 3.06
        assert_relative_eq!(d.dz, 1986.94, max_relative = 1e-12);
        // −R6·W
        assert_relative_eq!(d.dw, -0.0034, max_relative = 1e-12);
    }

    #[test]
    fn time_does_not_enter_the_equations() {
        let state = State::new(12.0, 0.5, 3.0, 1.0);
        let rates = Rates::default();

        assert_eq!(kinetics(0.0, &state, &rates), kinetics(1e6, &state, &rates));
    }

    #[test]
    fn origin_of_u_v_z_is_a_fixed_point() {
        let d = kinetics(0.0, &State::new(0.0, 0.0, 0.0, 2.0), &Rates::default());

        assert_eq!([d.du, d.dv, d.dz], [0.0; 3]);
        assert!(d.dw < 0.0);
    }

    #[test]
    fn negative_concentrations_are_not_clamped() {
        let d = kinetics(0.0, &State::new(-1.0, 0.0, 0.0, -2.0), &Rates::default());

        assert!(d.du < 0.0);
        assert!(d.dw > 0.0);
    }

    #[test]
    fn problem_round_trips_state_through_input() {
        let base = KineticsInput {
            time: 10.0,
            state: State::default(),
        };
        let next = KineticsProblem
            .build_input(&base, &[1.0, 2.0, 3.0, 4.0], 0.5)
            .unwrap();

        assert_relative_eq!(next.time, 10.5);
        assert_eq!(KineticsProblem.state(&next).unwrap(), [1.0, 2.0, 3.0, 4.0]);

        let model = BrayLiebhafsky::new(Rates::default());
        let output = model.call(&next).unwrap();
        let derivative = KineticsProblem.derivative(&next, &output).unwrap();
        assert_eq!(derivative, <[f64; 4]>::from(output));
    }
}
