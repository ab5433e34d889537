use super::{Config, Error};

/// A state together with its time derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Point<const N: usize> {
    pub(crate) state: [f64; N],
    pub(crate) derivative: [f64; N],
}

/// Right-hand side evaluation relative to the start of the current step.
pub(crate) trait Rhs<const N: usize> {
    /// Returns the derivative of `state` at `delta` past the step start.
    fn eval(&mut self, state: &[f64; N], delta: f64) -> Result<[f64; N], Error>;
}

/// Outcome of one trial step.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Attempt<const N: usize> {
    /// The step produced a candidate state and an error estimate.
    Trial { state: [f64; N], error_norm: f64 },

    /// The step could not be completed at this size.
    Diverged,
}

/// One adaptive Runge–Kutta scheme.
pub(crate) trait Stepper<const N: usize> {
    /// Order of the embedded error estimate.
    const ERROR_ORDER: i32;

    /// Attempts a step of size `h` from `start`.
    fn attempt<R: Rhs<N>>(
        &mut self,
        rhs: &mut R,
        start: &Point<N>,
        h: f64,
        config: &Config,
    ) -> Result<Attempt<N>, Error>;

    /// Interpolates within the most recently accepted step.
    ///
    /// `theta` is the fraction of the step, in `[0, 1]`.
    fn interpolate(&self, start: &Point<N>, end: &Point<N>, h: f64, theta: f64) -> [f64; N] {
        hermite(start, end, h, theta)
    }

    /// Called once a trial has been accepted.
    fn accepted(&mut self) {}
}

/// Returns `y + h * Σ weights[j] * k[j]`.
pub(crate) fn combine<const N: usize>(y: &[f64; N], h: f64, weights: &[f64], k: &[[f64; N]]) -> [f64; N] {
    std::array::from_fn(|i| {
        let slope: f64 = weights.iter().zip(k).map(|(w, kj)| w * kj[i]).sum();
        y[i] + h * slope
    })
}

/// Cubic Hermite interpolation between two points a step `h` apart.
pub(crate) fn hermite<const N: usize>(start: &Point<N>, end: &Point<N>, h: f64, theta: f64) -> [f64; N] {
    let t2 = theta * theta;
    let t3 = t2 * theta;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + theta;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    std::array::from_fn(|i| {
        h00 * start.state[i]
            + h10 * h * start.derivative[i]
            + h01 * end.state[i]
            + h11 * h * end.derivative[i]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn combine_applies_weighted_slopes() {
        let y = [1.0, 2.0];
        let k = [[1.0, 0.0], [0.0, 4.0]];

        let next = combine(&y, 0.5, &[0.5, 0.25], &k);

        assert_eq!(next, [1.25, 2.5]);
    }

    #[test]
    fn hermite_matches_endpoints() {
        let start = Point {
            state: [1.0],
            derivative: [3.0],
        };
        let end = Point {
            state: [2.0],
            derivative: [-1.0],
        };

        assert_relative_eq!(hermite(&start, &end, 0.5, 0.0)[0], 1.0);
        assert_relative_eq!(hermite(&start, &end, 0.5, 1.0)[0], 2.0);
    }

    #[test]
    fn hermite_is_exact_for_cubics() {
        // y = t³ on [1, 3]: y' = 3t².
        let start = Point {
            state: [1.0],
            derivative: [3.0],
        };
        let end = Point {
            state: [27.0],
            derivative: [27.0],
        };

        let mid = hermite(&start, &end, 2.0, 0.25);

        assert_relative_eq!(mid[0], 1.5_f64.powi(3), epsilon = 1e-12);
    }
}
