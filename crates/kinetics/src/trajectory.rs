use bray_solvers::transient::Stats;

use crate::{Method, Species, State};

/// The sampled result of one simulation.
///
/// Times are strictly increasing, start at zero and end exactly at `t_max`.
/// Each species has one value per time, aligned by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    time: Vec<f64>,
    values: [Vec<f64>; 4],
    method: Method,
    stats: Stats,
}

impl Trajectory {
    /// Builds a trajectory from sample times and the state at each.
    pub(crate) fn new(
        time: Vec<f64>,
        states: impl IntoIterator<Item = State>,
        method: Method,
        stats: Stats,
    ) -> Self {
        let mut values: [Vec<f64>; 4] = std::array::from_fn(|_| Vec::with_capacity(time.len()));
        for state in states {
            let state: [f64; 4] = state.into();
            for (series, value) in values.iter_mut().zip(state) {
                series.push(value);
            }
        }
        debug_assert!(values.iter().all(|series| series.len() == time.len()));

        Self {
            time,
            values,
            method,
            stats,
        }
    }

    /// Sample times.
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Concentrations of one species, aligned with [`time`](Self::time).
    #[must_use]
    pub fn values(&self, species: Species) -> &[f64] {
        &self.values[species.index()]
    }

    /// `[time, value]` pairs for one species, ready for plotting.
    #[must_use]
    pub fn points(&self, species: Species) -> Vec<[f64; 2]> {
        self.time
            .iter()
            .zip(self.values(species))
            .map(|(&t, &v)| [t, v])
            .collect()
    }

    /// The state at sample `index`, if it exists.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<State> {
        (index < self.len()).then(|| {
            State::from(std::array::from_fn::<f64, 4, _>(|i| self.values[i][index]))
        })
    }

    /// The state at `t_max`.
    #[must_use]
    pub fn final_state(&self) -> Option<State> {
        self.len().checked_sub(1).and_then(|last| self.state(last))
    }

    /// End of the simulated interval.
    #[must_use]
    pub fn t_max(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Method that produced this trajectory.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Solver work counters.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        Trajectory::new(
            vec![0.0, 1.0, 2.0],
            [
                State::new(1.0, 2.0, 3.0, 4.0),
                State::new(5.0, 6.0, 7.0, 8.0),
                State::new(9.0, 10.0, 11.0, 12.0),
            ],
            Method::Rk23,
            Stats::default(),
        )
    }

    #[test]
    fn values_are_split_by_species() {
        let trajectory = sample();

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.values(Species::U), [1.0, 5.0, 9.0]);
        assert_eq!(trajectory.values(Species::W), [4.0, 8.0, 12.0]);
        assert_eq!(
            trajectory.points(Species::Z),
            vec![[0.0, 3.0], [1.0, 7.0], [2.0, 11.0]]
        );
    }

    #[test]
    fn states_are_reassembled_by_index() {
        let trajectory = sample();

        assert_eq!(trajectory.state(1), Some(State::new(5.0, 6.0, 7.0, 8.0)));
        assert_eq!(trajectory.state(3), None);
        assert_eq!(
            trajectory.final_state(),
            Some(State::new(9.0, 10.0, 11.0, 12.0))
        );
        assert_eq!(trajectory.t_max(), 2.0);
        assert_eq!(trajectory.method(), Method::Rk23);
    }
}
