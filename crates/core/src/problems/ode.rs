/// Defines an ODE (ordinary differential equation) problem to be solved.
///
/// An ODE problem extracts an `N`-component state from model input, reads the
/// state derivative from model input and output, and rebuilds model input
/// from a trial state. Adaptive solvers evaluate the model at trial states
/// between step endpoints, so [`build_input`](OdeProblem::build_input) may be
/// called many times per accepted step.
pub trait OdeProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<[f64; N], Self::Error>;

    /// Computes the time derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::Error>;

    /// Builds model input for `state` at `delta` past the time of `base`.
    ///
    /// `base` is always the input at the start of the current step, so
    /// `delta` lies in `[0, h]` for a step of size `h`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &[f64; N],
        delta: f64,
    ) -> Result<Self::Input, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use crate::Model;

    /// Input for a point moving in the plane.
    #[derive(Debug, Clone, Copy)]
    struct Input {
        time: f64,
        position: [f64; 2],
    }

    /// Rotation about the origin at unit angular speed.
    struct Rotation;

    impl Model for Rotation {
        type Input = Input;
        type Output = [f64; 2];
        type Error = Infallible;

        fn call(&self, input: &Input) -> Result<[f64; 2], Infallible> {
            let [x, y] = input.position;
            Ok([-y, x])
        }
    }

    struct RotationProblem;

    impl OdeProblem<2> for RotationProblem {
        type Input = Input;
        type Output = [f64; 2];
        type Error = Infallible;

        fn state(&self, input: &Input) -> Result<[f64; 2], Infallible> {
            Ok(input.position)
        }

        fn derivative(&self, _input: &Input, output: &[f64; 2]) -> Result<[f64; 2], Infallible> {
            Ok(*output)
        }

        fn build_input(
            &self,
            base: &Input,
            state: &[f64; 2],
            delta: f64,
        ) -> Result<Input, Infallible> {
            Ok(Input {
                time: base.time + delta,
                position: *state,
            })
        }
    }

    #[test]
    fn round_trips_state_through_input() {
        let problem = RotationProblem;
        let base = Input {
            time: 1.0,
            position: [1.0, 0.0],
        };

        let next = problem.build_input(&base, &[0.0, 1.0], 0.5).unwrap();

        assert_relative_eq!(next.time, 1.5);
        assert_eq!(problem.state(&next).unwrap(), [0.0, 1.0]);
    }

    #[test]
    fn derivative_comes_from_model_output() {
        let problem = RotationProblem;
        let input = Input {
            time: 0.0,
            position: [1.0, 2.0],
        };

        let output = Rotation.call(&input).unwrap();

        assert_eq!(problem.derivative(&input, &output).unwrap(), [-2.0, 1.0]);
    }
}
