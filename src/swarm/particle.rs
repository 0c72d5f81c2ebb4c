//! Per-particle state and update contract.
//!
//! A [`Particle`] holds one candidate solution: its current position and
//! velocity, the objective value and constraint violation at that position,
//! and the best state it has ever visited. Particles know how to move
//! themselves toward a blend of their own historical best and the swarm's
//! historical best, subject to per-dimension bound and velocity constraints.
//!
//! Shared swarm parameters (bounds, velocity caps, acceleration
//! coefficients) are not owned per particle; the controller passes them into
//! every update call together with the inertia weight currently in effect,
//! which keeps the update a pure function of its inputs and the RNG.

use ndarray::Array1;
use rand::Rng;

use crate::objective::objfun::Objective;

use super::dominance::Merit;
use super::pso::SwarmConfig;

/// One candidate solution in the search space.
///
/// Invariants, held from construction onwards:
/// - every position component stays within its `[lower, upper]` bound
/// - every velocity component stays within `±max_velocity`
/// - the feasibility flag always equals `constraint_violation == 0`
/// - the personal best never regresses under the feasibility-first ordering
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current candidate point
    position: Array1<f64>,
    /// Current step vector
    velocity: Array1<f64>,
    /// Objective value at `position`
    value: f64,
    /// Constraint violation magnitude at `position`
    constraint_violation: f64,
    /// Whether `position` satisfies all constraints
    feasible: bool,
    /// Best-ever visited point
    best_position: Array1<f64>,
    /// Objective value at `best_position`
    best_value: f64,
    /// Feasibility at `best_position`
    best_feasible: bool,
    /// Count of solutions dominating this one; reserved for a future
    /// multi-objective mode and not consumed by the single-objective loop
    pareto_dominance: u32,
}

impl Particle {
    /// Creates a particle with a random initial state and evaluates it once.
    ///
    /// The position is sampled uniformly within the bounds and the velocity
    /// uniformly within `[-max_velocity, max_velocity]`, per dimension. The
    /// initial state seeds the personal best.
    pub(crate) fn new<O, R>(config: &SwarmConfig, objective: &O, rng: &mut R) -> Self
    where
        O: Objective,
        R: Rng,
    {
        let n = config.dimensions();
        let mut position = Array1::zeros(n);
        let mut velocity = Array1::zeros(n);
        for i in 0..n {
            position[i] = rng.gen_range(config.lower_bounds[i]..=config.upper_bounds[i]);
            velocity[i] = rng.gen_range(-config.max_velocity[i]..=config.max_velocity[i]);
        }

        let eval = objective.evaluate(position.view());
        Self {
            best_position: position.clone(),
            best_value: eval.value,
            best_feasible: eval.feasible(),
            value: eval.value,
            constraint_violation: eval.constraint_violation,
            feasible: eval.feasible(),
            position,
            velocity,
            pareto_dominance: 0,
        }
    }

    /// Moves the particle one step and refreshes its evaluation.
    ///
    /// Per dimension, with independent uniform draws `r1, r2 ∈ [0, 1)`:
    ///
    /// ```text
    /// v[i] = inertia * v[i]
    ///      + c1 * r1 * (best[i] - x[i])
    ///      + c2 * r2 * (global_best[i] - x[i])
    /// ```
    ///
    /// The velocity is clamped to `±max_velocity[i]` and the position to its
    /// bounds, so the state invariants hold on return. The objective is
    /// evaluated exactly once, on the new position, and the personal best is
    /// refreshed from the result.
    pub(crate) fn update<O, R>(
        &mut self,
        global_best: &Array1<f64>,
        inertia: f64,
        config: &SwarmConfig,
        objective: &O,
        rng: &mut R,
    ) where
        O: Objective,
        R: Rng,
    {
        for i in 0..self.position.len() {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();
            let v = inertia * self.velocity[i]
                + config.cognitive * r1 * (self.best_position[i] - self.position[i])
                + config.social * r2 * (global_best[i] - self.position[i]);
            self.velocity[i] = v.clamp(-config.max_velocity[i], config.max_velocity[i]);
            self.position[i] = (self.position[i] + self.velocity[i])
                .clamp(config.lower_bounds[i], config.upper_bounds[i]);
        }

        let eval = objective.evaluate(self.position.view());
        self.value = eval.value;
        self.constraint_violation = eval.constraint_violation;
        self.feasible = eval.feasible();

        self.update_best();
    }

    /// Folds the current state into the personal best if it supersedes it.
    ///
    /// Idempotent between position changes.
    pub(crate) fn update_best(&mut self) {
        if self.merit().supersedes(&self.best_merit()) {
            self.best_position.assign(&self.position);
            self.best_value = self.value;
            self.best_feasible = self.feasible;
        }
    }

    pub fn position(&self) -> &Array1<f64> {
        &self.position
    }

    pub fn velocity(&self) -> &Array1<f64> {
        &self.velocity
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn constraint_violation(&self) -> f64 {
        self.constraint_violation
    }

    pub fn feasible(&self) -> bool {
        self.feasible
    }

    pub fn best_position(&self) -> &Array1<f64> {
        &self.best_position
    }

    pub fn best_value(&self) -> f64 {
        self.best_value
    }

    pub fn best_feasible(&self) -> bool {
        self.best_feasible
    }

    /// Merit of the current position.
    pub fn merit(&self) -> Merit {
        Merit::new(self.value, self.feasible)
    }

    /// Merit of the best-ever visited position.
    pub fn best_merit(&self) -> Merit {
        Merit::new(self.best_value, self.best_feasible)
    }

    /// Dominance counter reserved for multi-objective extensions.
    pub fn pareto_dominance(&self) -> u32 {
        self.pareto_dominance
    }
}
