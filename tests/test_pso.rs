//! Tests for the particle swarm optimizer.
//!
//! These tests drive full optimization runs against the bundled benchmark
//! objectives and verify:
//! - Convergence on smooth unconstrained objectives
//! - Bound handling of the returned solution
//! - Feasibility-aware behavior on a constrained objective
//! - Reproducibility of seeded runs
//! - Monotonicity of the swarm-best trajectory

#[cfg(test)]
mod test_pso {
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use swarmopt::prelude::*;

    fn uniform_bounds(dimensions: usize, lower: f64, upper: f64) -> (Array1<f64>, Array1<f64>) {
        (
            Array1::from_elem(dimensions, lower),
            Array1::from_elem(dimensions, upper),
        )
    }

    #[test]
    fn test_sphere_convergence() {
        // ARRANGE
        let (lower, upper) = uniform_bounds(2, -5.0, 5.0);
        let config = PSOBuilder::new(lower, upper)
            .swarm_size(30)
            .max_iterations(200)
            .seed(42)
            .build();

        // ACT
        let mut swarm = ParticleSwarm::new(config, Sphere).expect("Failed to construct swarm");
        let report = swarm.optimize();

        // ASSERT
        assert!(
            report.best_value < 1e-2,
            "sphere run did not converge: best value {}",
            report.best_value
        );
        assert!(report.feasible);
        assert_eq!(report.iterations, 200);
    }

    #[test]
    fn test_solution_stays_within_bounds() {
        // ARRANGE
        let (lower, upper) = uniform_bounds(3, -2.0, 2.0);
        let config = PSOBuilder::new(lower, upper)
            .swarm_size(30)
            .max_iterations(100)
            .seed(42)
            .build();

        // ACT
        let mut swarm = ParticleSwarm::new(config, Rastrigin).expect("Failed to construct swarm");
        let report = swarm.optimize();

        // ASSERT
        assert_eq!(report.best_position.len(), 3);
        for (i, &x) in report.best_position.iter().enumerate() {
            assert!(
                (-2.0..=2.0).contains(&x),
                "best_position[{i}] = {x} outside bounds [-2, 2]"
            );
        }
    }

    #[test]
    fn test_rosenbrock_valley() {
        // ARRANGE
        let (lower, upper) = uniform_bounds(2, -2.0, 2.0);
        let config = PSOBuilder::new(lower, upper)
            .swarm_size(60)
            .max_iterations(400)
            .seed(7)
            .build();

        // ACT
        let mut swarm = ParticleSwarm::new(config, Rosenbrock).expect("Failed to construct swarm");
        let report = swarm.optimize();

        // ASSERT
        assert!(
            report.best_value < 1.0,
            "rosenbrock run stalled: best value {}",
            report.best_value
        );
    }

    #[test]
    fn test_constrained_run_ends_feasible() {
        // ARRANGE
        let (lower, upper) = uniform_bounds(2, -5.0, 5.0);
        let config = PSOBuilder::new(lower, upper)
            .swarm_size(50)
            .max_iterations(200)
            .seed(11)
            .build();

        // ACT
        let mut swarm =
            ParticleSwarm::new(config, ConstrainedSphere).expect("Failed to construct swarm");
        let report = swarm.optimize();

        // ASSERT
        assert!(report.feasible, "constrained run ended infeasible");
        // the feasible region requires x1 + x2 >= 1, so the sphere value
        // cannot drop below 0.5
        assert!(report.best_value >= 0.5 - 1e-9);
        assert_relative_eq!(report.best_value, 0.5, epsilon = 0.2);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        // ARRANGE
        let run = || {
            let (lower, upper) = uniform_bounds(2, -5.0, 5.0);
            let config = PSOBuilder::new(lower, upper)
                .swarm_size(20)
                .max_iterations(50)
                .seed(123)
                .build();
            let mut swarm = ParticleSwarm::new(config, Sphere).expect("Failed to construct swarm");
            swarm.optimize()
        };

        // ACT
        let first = run();
        let second = run();

        // ASSERT
        assert_eq!(first.best_value, second.best_value);
        assert_eq!(first.best_position, second.best_position);
    }

    #[test]
    fn test_swarm_best_never_regresses() {
        // ARRANGE
        struct Recorder {
            trace: Vec<Merit>,
        }

        impl Progress for Recorder {
            fn observe_iter(&mut self, _iteration: usize, best: &Merit) {
                self.trace.push(*best);
            }
        }

        let (lower, upper) = uniform_bounds(2, -5.0, 5.0);
        let config = PSOBuilder::new(lower, upper)
            .swarm_size(30)
            .max_iterations(100)
            .seed(99)
            .build();
        let mut swarm =
            ParticleSwarm::new(config, ConstrainedSphere).expect("Failed to construct swarm");
        let mut recorder = Recorder { trace: Vec::new() };

        // ACT
        swarm.optimize_with_observer(&mut recorder);

        // ASSERT
        assert_eq!(recorder.trace.len(), 100);
        for pair in recorder.trace.windows(2) {
            assert!(
                pair[1].supersedes(&pair[0]),
                "swarm best regressed: {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_callback_observer_sees_every_iteration() {
        // ARRANGE
        let (lower, upper) = uniform_bounds(2, -5.0, 5.0);
        let config = PSOBuilder::new(lower, upper)
            .swarm_size(10)
            .max_iterations(25)
            .seed(1)
            .build();
        let mut swarm = ParticleSwarm::new(config, Sphere).expect("Failed to construct swarm");

        let iterations = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = iterations.clone();
        let mut observer = CallbackObserver {
            callback: Box::new(move |iteration, _| sink.borrow_mut().push(iteration)),
        };

        // ACT
        swarm.optimize_with_observer(&mut observer);

        // ASSERT
        assert_eq!(*iterations.borrow(), (1..=25).collect::<Vec<_>>());
    }
}
