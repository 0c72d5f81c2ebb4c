//! Particle Swarm Optimization (PSO) controller.
//!
//! This module provides the swarm controller driving the optimization loop,
//! including:
//!
//! - The main `ParticleSwarm` controller owning the population
//! - A builder pattern via `PSOBuilder` for convenient configuration
//! - The linear inertia-weight annealing schedule
//!
//! Each iteration the controller moves every particle against a snapshot of
//! the swarm-best position, rescans the population for a new swarm best, and
//! anneals the inertia weight. Candidates are ranked with the
//! feasibility-first rule from [`super::dominance`], so a feasible solution
//! is never displaced by an infeasible one regardless of objective value.

use log::{debug, trace};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::objective::objfun::Objective;

use super::error::OptimizeError;
use super::observer::Progress;
use super::particle::Particle;
use super::report::OptimizationReport;

/// Stopping criteria accepted in swarm configuration.
///
/// Reserved: the optimization loop currently always runs the full iteration
/// budget; the threshold-based variant is an extension slot for early-exit
/// checks and is not consulted by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoppingCriteria {
    /// Stop after the configured number of iterations
    IterationBudget,
    /// Stop once improvement falls below the configured threshold
    ImprovementThreshold,
}

/// Shared swarm configuration.
///
/// Every particle references the same bounds, velocity caps and acceleration
/// coefficients; nothing here is mutated once the swarm is constructed. The
/// per-dimension arrays must all have the same length as the problem
/// dimensionality; this is a caller precondition and is not re-checked at
/// runtime.
#[derive(Debug, Clone, Serialize)]
pub struct SwarmConfig {
    /// Number of particles in the population
    pub swarm_size: usize,
    /// Per-dimension lower bounds for positions
    pub lower_bounds: Array1<f64>,
    /// Per-dimension upper bounds for positions
    pub upper_bounds: Array1<f64>,
    /// Per-dimension magnitude cap for velocities
    pub max_velocity: Array1<f64>,
    /// Cognitive acceleration coefficient (c1), pull toward the personal best
    pub cognitive: f64,
    /// Social acceleration coefficient (c2), pull toward the swarm best
    pub social: f64,
    /// Inertia weight at the start of the run
    pub upper_weight: f64,
    /// Inertia weight reached at the end of the run
    pub lower_weight: f64,
    /// Iteration budget for the optimization loop
    pub max_iterations: usize,
    /// Improvement threshold; reserved for early-exit extensions
    pub threshold: f64,
    /// Stopping criteria tag; reserved, the loop runs the full budget
    pub stopping: StoppingCriteria,
    /// RNG seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl SwarmConfig {
    /// Number of design variables, shared across the whole swarm.
    pub fn dimensions(&self) -> usize {
        self.lower_bounds.len()
    }
}

/// Inertia weight after `iteration` of `max_iterations` completed iterations.
///
/// Linear ramp from `upper` down to `lower`: the weight starts at `upper`
/// and reaches `lower` exactly when the iteration budget is exhausted.
pub fn inertia_weight_at(iteration: usize, max_iterations: usize, lower: f64, upper: f64) -> f64 {
    upper - iteration as f64 / max_iterations as f64 * (upper - lower)
}

/// The swarm controller.
///
/// Owns the population, drives the iteration protocol, and maintains a
/// single authoritative index of the particle holding the best-known
/// solution. The population size is fixed for the whole run: particles are
/// created once at construction and never added or removed.
pub struct ParticleSwarm<O: Objective> {
    config: SwarmConfig,
    objective: O,
    particles: Vec<Particle>,
    /// Index of the particle whose personal best is the swarm best
    best_index: usize,
    /// Inertia weight in effect for the next update pass
    weight: f64,
    iteration: usize,
    evaluations: usize,
    rng: StdRng,
}

impl<O: Objective> ParticleSwarm<O> {
    /// Creates a swarm, seeding every particle with a random initial state.
    ///
    /// Each particle is evaluated once during seeding, and an initial
    /// global-best scan establishes the swarm-best index before the first
    /// iteration runs.
    ///
    /// # Arguments
    /// * `config` - Shared swarm configuration
    /// * `objective` - The objective function to minimize
    ///
    /// # Errors
    /// Returns `OptimizeError::EmptySwarm` if the configured swarm size is
    /// zero; no particles are allocated in that case.
    pub fn new(config: SwarmConfig, objective: O) -> Result<Self, OptimizeError> {
        if config.swarm_size == 0 {
            return Err(OptimizeError::EmptySwarm);
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let particles = (0..config.swarm_size)
            .map(|_| Particle::new(&config, &objective, &mut rng))
            .collect::<Vec<_>>();

        let mut swarm = Self {
            weight: config.upper_weight,
            evaluations: config.swarm_size,
            iteration: 0,
            best_index: 0,
            particles,
            config,
            objective,
            rng,
        };
        swarm.update_global_best();

        Ok(swarm)
    }

    /// Runs the optimization loop to completion.
    ///
    /// Each iteration updates every particle, rescans for a new swarm best,
    /// and anneals the inertia weight. The loop terminates after the
    /// configured iteration budget; there is no early exit.
    ///
    /// # Returns
    /// * `OptimizationReport` - The best solution recorded over the run
    pub fn optimize(&mut self) -> OptimizationReport {
        self.run(None)
    }

    /// Runs the optimization loop, notifying the observer once per iteration.
    pub fn optimize_with_observer(&mut self, observer: &mut dyn Progress) -> OptimizationReport {
        self.run(Some(observer))
    }

    fn run(&mut self, mut observer: Option<&mut dyn Progress>) -> OptimizationReport {
        debug!(
            "starting swarm run: {} particles, {} variables, {} iterations",
            self.config.swarm_size,
            self.config.dimensions(),
            self.config.max_iterations
        );

        while self.iteration < self.config.max_iterations {
            self.update_particles();
            self.update_global_best();
            self.iteration += 1;
            self.weight = inertia_weight_at(
                self.iteration,
                self.config.max_iterations,
                self.config.lower_weight,
                self.config.upper_weight,
            );

            let best = self.particles[self.best_index].best_merit();
            trace!(
                "iteration {}: best value {:.6e} (feasible: {})",
                self.iteration,
                best.value,
                best.feasible
            );
            if let Some(observer) = observer.as_deref_mut() {
                observer.observe_iter(self.iteration, &best);
            }
        }

        let report = self.report();
        debug!("swarm run finished: {report}");
        report
    }

    /// Moves every particle one step against the current swarm best.
    ///
    /// The swarm-best position is snapshotted at the start of the pass, so
    /// all particles within one iteration see the same attractor regardless
    /// of update order.
    fn update_particles(&mut self) {
        let global_best = self.particles[self.best_index].best_position().clone();
        for particle in &mut self.particles {
            particle.update(
                &global_best,
                self.weight,
                &self.config,
                &self.objective,
                &mut self.rng,
            );
        }
        self.evaluations += self.particles.len();
    }

    /// Rescans the population and repoints the swarm-best index.
    ///
    /// Each particle's *current* merit is compared against the incumbent's
    /// *best* merit. A particle whose current iterate supersedes the
    /// incumbent becomes the new swarm best even when that iterate is worse
    /// than its own personal best: its personal best has already absorbed
    /// any such iterate, so the index always points at the best value ever
    /// observed by any particle.
    fn update_global_best(&mut self) {
        for i in 0..self.particles.len() {
            let candidate = self.particles[i].merit();
            let incumbent = self.particles[self.best_index].best_merit();
            if candidate.supersedes(&incumbent) {
                self.best_index = i;
            }
        }
    }

    /// The best solution recorded so far.
    pub fn report(&self) -> OptimizationReport {
        let best = &self.particles[self.best_index];
        OptimizationReport {
            best_position: best.best_position().clone(),
            best_value: best.best_value(),
            feasible: best.best_feasible(),
            iterations: self.iteration,
            evaluations: self.evaluations,
        }
    }

    /// Position of the best solution recorded so far.
    pub fn best_position(&self) -> &Array1<f64> {
        self.particles[self.best_index].best_position()
    }

    /// Objective value of the best solution recorded so far.
    pub fn best_value(&self) -> f64 {
        self.particles[self.best_index].best_value()
    }

    /// Inertia weight currently in effect.
    pub fn inertia_weight(&self) -> f64 {
        self.weight
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }
}

/// Builder for configuring and constructing swarm configurations.
///
/// This builder provides a fluent interface for setting up swarm
/// hyperparameters with sensible defaults.
pub struct PSOBuilder {
    swarm_size: usize,
    lower_bounds: Array1<f64>,
    upper_bounds: Array1<f64>,
    max_velocity: Option<Array1<f64>>,
    cognitive: f64,
    social: f64,
    upper_weight: f64,
    lower_weight: f64,
    max_iterations: usize,
    threshold: f64,
    stopping: StoppingCriteria,
    seed: Option<u64>,
}

impl PSOBuilder {
    /// Creates a new PSOBuilder with default settings.
    ///
    /// Default values:
    /// - swarm_size: 50
    /// - max_iterations: 100
    /// - cognitive/social coefficients: 2.0
    /// - inertia weight: annealed 0.9 -> 0.4
    /// - max_velocity: half the per-dimension range
    pub fn new(lower_bounds: Array1<f64>, upper_bounds: Array1<f64>) -> Self {
        Self {
            swarm_size: 50,
            lower_bounds,
            upper_bounds,
            max_velocity: None,
            cognitive: 2.0,
            social: 2.0,
            upper_weight: 0.9,
            lower_weight: 0.4,
            max_iterations: 100,
            threshold: 1e-6,
            stopping: StoppingCriteria::IterationBudget,
            seed: None,
        }
    }

    /// Sets the number of particles.
    pub fn swarm_size(mut self, swarm_size: usize) -> Self {
        self.swarm_size = swarm_size;
        self
    }

    /// Sets the iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the cognitive (c1) and social (c2) acceleration coefficients.
    pub fn coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Sets the inertia-weight annealing range.
    ///
    /// The weight starts at `upper` and decays linearly to `lower` over the
    /// iteration budget.
    pub fn weight_range(mut self, lower: f64, upper: f64) -> Self {
        self.lower_weight = lower;
        self.upper_weight = upper;
        self
    }

    /// Sets the per-dimension velocity magnitude cap.
    pub fn max_velocity(mut self, max_velocity: Array1<f64>) -> Self {
        self.max_velocity = Some(max_velocity);
        self
    }

    /// Sets the improvement threshold (reserved for early-exit extensions).
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the stopping-criteria tag (reserved, see [`StoppingCriteria`]).
    pub fn stopping(mut self, stopping: StoppingCriteria) -> Self {
        self.stopping = stopping;
        self
    }

    /// Fixes the RNG seed for a reproducible run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the swarm configuration with the configured settings.
    pub fn build(self) -> SwarmConfig {
        let max_velocity = self
            .max_velocity
            .unwrap_or_else(|| (&self.upper_bounds - &self.lower_bounds) / 2.0);
        SwarmConfig {
            swarm_size: self.swarm_size,
            lower_bounds: self.lower_bounds,
            upper_bounds: self.upper_bounds,
            max_velocity,
            cognitive: self.cognitive,
            social: self.social,
            upper_weight: self.upper_weight,
            lower_weight: self.lower_weight,
            max_iterations: self.max_iterations,
            threshold: self.threshold,
            stopping: self.stopping,
            seed: self.seed,
        }
    }
}
