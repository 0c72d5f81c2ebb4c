use std::fmt;

use ndarray::Array1;
use serde::Serialize;

/// The result of an optimization run.
///
/// Carries the best solution recorded by any particle over the whole run,
/// together with counters describing how much work the run consumed. The
/// report serializes to JSON for downstream tooling.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    /// Best-ever visited position across the swarm
    pub best_position: Array1<f64>,
    /// Objective value at `best_position`
    pub best_value: f64,
    /// Whether `best_position` satisfies all constraints
    pub feasible: bool,
    /// Number of completed iterations
    pub iterations: usize,
    /// Number of objective-function evaluations consumed
    pub evaluations: usize,
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let feasibility = if self.feasible {
            "feasible"
        } else {
            "infeasible"
        };
        write!(
            f,
            "best value {:.6e} ({}) at {} after {} iterations ({} evaluations)",
            self.best_value, feasibility, self.best_position, self.iterations, self.evaluations
        )
    }
}
