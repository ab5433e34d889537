use std::fmt;

use serde::{Deserialize, Serialize};

/// Concentrations of the four tracked species.
///
/// Values are not constrained to be non-negative. Poorly chosen rate
/// parameters can drive a concentration below zero, and the model does not
/// clamp it.
///
/// The default is the reference initial state used throughout the
/// workspace: `u = 1000`, `v = 995`, `z = 3`, `w = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct State {
    /// HIO₂.
    pub u: f64,
    /// I⁻.
    pub v: f64,
    /// I₂.
    pub z: f64,
    /// O₂.
    pub w: f64,
}

impl State {
    #[must_use]
    pub const fn new(u: f64, v: f64, z: f64, w: f64) -> Self {
        Self { u, v, z, w }
    }

    /// Returns the concentration of one species.
    #[must_use]
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::U => self.u,
            Species::V => self.v,
            Species::Z => self.z,
            Species::W => self.w,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(1000.0, 995.0, 3.0, 2.0)
    }
}

impl From<[f64; 4]> for State {
    fn from([u, v, z, w]: [f64; 4]) -> Self {
        Self { u, v, z, w }
    }
}

impl From<State> for [f64; 4] {
    fn from(state: State) -> Self {
        [state.u, state.v, state.z, state.w]
    }
}

/// Time derivative of a [`State`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Derivative {
    pub du: f64,
    pub dv: f64,
    pub dz: f64,
    pub dw: f64,
}

impl From<Derivative> for [f64; 4] {
    fn from(d: Derivative) -> Self {
        [d.du, d.dv, d.dz, d.dw]
    }
}

/// One of the four tracked species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    U,
    V,
    Z,
    W,
}

impl Species {
    /// All species, in state order.
    pub const ALL: [Species; 4] = [Species::U, Species::V, Species::Z, Species::W];

    /// Position of this species in the state vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Species::U => 0,
            Species::V => 1,
            Species::Z => 2,
            Species::W => 3,
        }
    }

    /// The model's variable name, such as `"U"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Species::U => "U",
            Species::V => "V",
            Species::Z => "Z",
            Species::W => "W",
        }
    }

    /// The chemical formula, such as `"HIO₂"`.
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            Species::U => "HIO₂",
            Species::V => "I⁻",
            Species::Z => "I₂",
            Species::W => "O₂",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.symbol(), self.formula())
    }
}
