use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// Integration method used by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    /// Dormand–Prince 5(4) explicit Runge–Kutta.
    #[default]
    Rk45,
    /// Bogacki–Shampine 3(2) explicit Runge–Kutta.
    Rk23,
    /// L-stable two-stage SDIRK, for stiff parameter sets.
    Sdirk,
}

impl Method {
    /// All supported methods.
    pub const ALL: [Method; 3] = [Method::Rk45, Method::Rk23, Method::Sdirk];

    /// The name this method is selected by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Method::Rk45 => "RK45",
            Method::Rk23 => "RK23",
            Method::Sdirk => "SDIRK",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ConfigurationError;

    /// Parses a method name, ignoring case.
    ///
    /// Unrecognized names are an error; there is no fallback method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigurationError::UnknownMethod(s.to_owned()))
    }
}

impl TryFrom<String> for Method {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.name().to_owned()
    }
}

/// Options for one simulation run.
///
/// Solver tolerances are fixed by the driver and are not configurable here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// End of the integration interval `[0, t_max]`.
    pub t_max: f64,

    /// Number of evenly spaced samples over `[0, t_max]`, both ends included.
    pub n_points: usize,

    /// Integration method.
    pub method: Method,

    /// Whether [`Scenario::run`](crate::Scenario::run) renders the result.
    pub plot: bool,

    /// Maximum number of solver step attempts, accepted or rejected.
    pub max_steps: usize,

    /// Wall-clock limit for the integration, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t_max: 3000.0,
            n_points: 5000,
            method: Method::default(),
            plot: true,
            max_steps: 10_000_000,
            timeout: None,
        }
    }
}

impl SimulationConfig {
    /// Checks every option without running anything.
    ///
    /// # Errors
    ///
    /// Returns the first invalid option found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.t_max.is_finite() || self.t_max <= 0.0 {
            return Err(ConfigurationError::TMax(self.t_max));
        }
        if self.n_points < 2 {
            return Err(ConfigurationError::NPoints(self.n_points));
        }
        #[allow(clippy::cast_precision_loss)]
        let spacing = self.t_max / (self.n_points - 1) as f64;
        if !spacing.is_normal() {
            return Err(ConfigurationError::TMax(self.t_max));
        }
        if self.max_steps == 0 {
            return Err(ConfigurationError::MaxSteps);
        }
        self.timeout_duration()?;
        Ok(())
    }

    /// Returns the timeout as a [`Duration`], if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Timeout`] if the timeout is not a finite,
    /// positive number of seconds.
    pub fn timeout_duration(&self) -> Result<Option<Duration>, ConfigurationError> {
        match self.timeout {
            None => Ok(None),
            Some(seconds) if seconds > 0.0 => Duration::try_from_secs_f64(seconds)
                .map(Some)
                .map_err(|_| ConfigurationError::Timeout(seconds)),
            Some(seconds) => Err(ConfigurationError::Timeout(seconds)),
        }
    }
}
