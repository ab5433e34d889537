use bray_kinetics::{Species, Trajectory};

/// Formats the final state and solver work of a finished run.
///
/// ```text
/// Final state at t = 3000 (RK45, 5000 samples)
///   U – HIO₂     8.130211e-4
///   ...
/// Solver: 1832 accepted, 95 rejected, 11563 evaluations
/// ```
pub fn summary(trajectory: &Trajectory) -> String {
    let mut lines = vec![format!(
        "Final state at t = {} ({}, {} samples)",
        trajectory.t_max(),
        trajectory.method(),
        trajectory.len(),
    )];
    if let Some(state) = trajectory.final_state() {
        lines.extend(Species::ALL.map(|species| {
            format!("  {:<10} {:e}", species.to_string(), state.get(species))
        }));
    }
    let stats = trajectory.stats();
    lines.push(format!(
        "Solver: {} accepted, {} rejected, {} evaluations",
        stats.accepted, stats.rejected, stats.evaluations
    ));
    lines.join("\n")
}
