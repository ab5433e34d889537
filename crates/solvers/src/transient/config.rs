use thiserror::Error;

/// Configuration shared by the transient solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rel_tol: f64,
    abs_tol: f64,
    max_steps: usize,
    max_step: f64,
    first_step: Option<f64>,
}

/// Errors that can occur when validating a transient solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rel_tol must be finite and positive")]
    RelTol,

    #[error("abs_tol must be finite and positive")]
    AbsTol,

    #[error("max_steps must be positive")]
    MaxSteps,

    #[error("max_step must be positive")]
    MaxStep,

    #[error("first_step must be finite and positive")]
    FirstStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-6, 1e-9, 10_000_000).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances and step limit.
    ///
    /// The maximum step size is unbounded and the first step is chosen
    /// automatically; see [`with_max_step`](Self::with_max_step) and
    /// [`with_first_step`](Self::with_first_step).
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is not finite and positive, or if
    /// `max_steps` is zero.
    pub fn new(rel_tol: f64, abs_tol: f64, max_steps: usize) -> Result<Self, ConfigError> {
        if !rel_tol.is_finite() || rel_tol <= 0.0 {
            return Err(ConfigError::RelTol);
        }
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self {
            rel_tol,
            abs_tol,
            max_steps,
            max_step: f64::INFINITY,
            first_step: None,
        })
    }

    /// Caps the size of any single step.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is not positive. Infinity is allowed.
    pub fn with_max_step(mut self, max_step: f64) -> Result<Self, ConfigError> {
        if max_step.is_nan() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }
        self.max_step = max_step;
        Ok(self)
    }

    /// Uses a fixed size for the first trial step instead of estimating one.
    ///
    /// # Errors
    ///
    /// Returns an error if `first_step` is not finite and positive.
    pub fn with_first_step(mut self, first_step: f64) -> Result<Self, ConfigError> {
        if !first_step.is_finite() || first_step <= 0.0 {
            return Err(ConfigError::FirstStep);
        }
        self.first_step = Some(first_step);
        Ok(self)
    }

    /// Returns the relative tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the maximum number of step attempts, accepted or rejected.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the maximum step size.
    #[must_use]
    pub fn max_step(&self) -> f64 {
        self.max_step
    }

    /// Returns the configured first step, if any.
    #[must_use]
    pub fn first_step(&self) -> Option<f64> {
        self.first_step
    }

    /// Returns the error weight for one component given its old and new values.
    pub(crate) fn scale(&self, old: f64, new: f64) -> f64 {
        self.abs_tol + self.rel_tol * old.abs().max(new.abs())
    }

    /// Returns the RMS norm of `error` scaled against the step's endpoints.
    pub(crate) fn error_norm<const N: usize>(
        &self,
        error: &[f64; N],
        old: &[f64; N],
        new: &[f64; N],
    ) -> f64 {
        let sum: f64 = (0..N)
            .map(|i| (error[i] / self.scale(old[i], new[i])).powi(2))
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let n = N as f64;
        (sum / n).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_relative_eq!(config.rel_tol(), 1e-6);
        assert_relative_eq!(config.abs_tol(), 1e-9);
        assert_eq!(config.max_steps(), 10_000_000);
        assert!(config.max_step().is_infinite());
        assert_eq!(config.first_step(), None);
    }

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(0.0, 1e-9, 10), Err(ConfigError::RelTol));
        assert_eq!(Config::new(f64::NAN, 1e-9, 10), Err(ConfigError::RelTol));
        assert_eq!(Config::new(1e-6, -1.0, 10), Err(ConfigError::AbsTol));
        assert_eq!(Config::new(1e-6, f64::INFINITY, 10), Err(ConfigError::AbsTol));
        assert_eq!(Config::new(1e-6, 1e-9, 0), Err(ConfigError::MaxSteps));
    }

    #[test]
    fn rejects_bad_step_limits() {
        let config = Config::default();
        assert_eq!(config.with_max_step(0.0), Err(ConfigError::MaxStep));
        assert_eq!(config.with_max_step(f64::NAN), Err(ConfigError::MaxStep));
        assert!(config.with_max_step(f64::INFINITY).is_ok());
        assert_eq!(config.with_first_step(-1.0), Err(ConfigError::FirstStep));
        assert_eq!(
            config.with_first_step(f64::INFINITY),
            Err(ConfigError::FirstStep)
        );
    }

    #[test]
    fn error_norm_is_scaled_rms() {
        let config = Config::new(0.5, 1.0, 10).unwrap();

        // Scales: 1 + 0.5 * 2 = 2 and 1 + 0.5 * 0 = 1.
        let norm = config.error_norm(&[2.0, 1.0], &[2.0, 0.0], &[1.0, 0.0]);

        assert_relative_eq!(norm, 1.0);
    }
}
