use ndarray::ArrayView1;

/// Result of evaluating a candidate position.
///
/// The constraint violation is a non-negative magnitude; zero means the
/// position satisfies every constraint. Feasibility is derived from the
/// violation rather than stored, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Objective value to minimize
    pub value: f64,
    /// Aggregate constraint violation magnitude, zero if none
    pub constraint_violation: f64,
}

impl Evaluation {
    /// Evaluation of a position that violates no constraints.
    pub fn unconstrained(value: f64) -> Self {
        Self {
            value,
            constraint_violation: 0.0,
        }
    }

    /// Evaluation of a position carrying a constraint violation.
    ///
    /// Callers typically fold a large penalty term into `value` as well, so
    /// the optimizer is steered away from the violating region even when it
    /// compares two infeasible candidates.
    pub fn penalized(value: f64, constraint_violation: f64) -> Self {
        Self {
            value,
            constraint_violation,
        }
    }

    pub fn feasible(&self) -> bool {
        self.constraint_violation == 0.0
    }
}

/// Defines an objective function for swarm optimization problems
///
/// This trait is the single collaborator the optimizer calls out to. An
/// implementation maps a candidate position to its objective value and
/// constraint violation. Evaluation is treated as a pure function of the
/// position: the optimizer may call it any number of times, in any order,
/// and caches nothing about it. There is no error channel; a panicking
/// objective aborts the run.
pub trait Objective {
    /// Evaluates the objective at the given position.
    ///
    /// # Arguments
    /// * `position` - The candidate position, one entry per design variable
    ///
    /// # Returns
    /// * `Evaluation` - Objective value and constraint violation at `position`
    fn evaluate(&self, position: ArrayView1<f64>) -> Evaluation;
}

impl<F> Objective for F
where
    F: Fn(ArrayView1<f64>) -> Evaluation,
{
    fn evaluate(&self, position: ArrayView1<f64>) -> Evaluation {
        self(position)
    }
}
