use serde::{Deserialize, Serialize};

/// The seven rate parameters `R1..R7` of the model equations.
///
/// Parameters are constant for one simulation and no relationship between
/// them is enforced. The default is the reference parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rates {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub r4: f64,
    pub r5: f64,
    pub r6: f64,
    pub r7: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            r1: 0.0035,
            r2: 1.0,
            r3: 1.99,
            r4: 0.0028,
            r5: 1.0,
            r6: 0.0017,
            r7: 0.02,
        }
    }
}
