//! Standard benchmark objectives for optimizer evaluation.
//!
//! These are the usual single-objective test functions used to exercise and
//! demonstrate the optimizer, each wrapped as an [`Objective`] implementation
//! so they plug directly into the swarm controller. A constrained variant of
//! the sphere function exercises the penalty/violation reporting path.

use std::f64::consts::PI;

use ndarray::ArrayView1;

use super::objfun::{Evaluation, Objective};

/// Sphere function - unimodal, separable
///
/// f(x) = Σ xᵢ², global minimum f(0, ..., 0) = 0.
#[derive(Debug, Clone, Copy)]
pub struct Sphere;

impl Objective for Sphere {
    fn evaluate(&self, position: ArrayView1<f64>) -> Evaluation {
        Evaluation::unconstrained(position.iter().map(|xi| xi * xi).sum())
    }
}

/// Rosenbrock function - unimodal, non-separable
///
/// Global minimum f(1, ..., 1) = 0, reached along a narrow curved valley.
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock;

impl Objective for Rosenbrock {
    fn evaluate(&self, position: ArrayView1<f64>) -> Evaluation {
        let mut value = 0.0;
        for i in 0..position.len().saturating_sub(1) {
            let a = position[i + 1] - position[i] * position[i];
            let b = 1.0 - position[i];
            value += 100.0 * a * a + b * b;
        }
        Evaluation::unconstrained(value)
    }
}

/// Rastrigin function - multimodal, separable
///
/// Global minimum f(0, ..., 0) = 0, with local minima on a regular lattice.
#[derive(Debug, Clone, Copy)]
pub struct Rastrigin;

impl Objective for Rastrigin {
    fn evaluate(&self, position: ArrayView1<f64>) -> Evaluation {
        let n = position.len() as f64;
        let value = 10.0 * n
            + position
                .iter()
                .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
                .sum::<f64>();
        Evaluation::unconstrained(value)
    }
}

/// Sphere function subject to the linear constraint Σ xᵢ ≥ 1.
///
/// The unconstrained minimum at the origin is infeasible; the constrained
/// minimum lies on the constraint boundary at xᵢ = 1/n with value 1/n.
/// Violating positions report the violation magnitude and carry a large
/// penalty folded into the objective value.
#[derive(Debug, Clone, Copy)]
pub struct ConstrainedSphere;

impl ConstrainedSphere {
    const PENALTY: f64 = 1e3;
}

impl Objective for ConstrainedSphere {
    fn evaluate(&self, position: ArrayView1<f64>) -> Evaluation {
        let value: f64 = position.iter().map(|xi| xi * xi).sum();
        let violation = (1.0 - position.sum()).max(0.0);
        if violation > 0.0 {
            Evaluation::penalized(value + Self::PENALTY * violation, violation)
        } else {
            Evaluation::unconstrained(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;

    use super::*;

    #[test]
    fn test_sphere_minimum_at_origin() {
        let x = Array1::zeros(3);
        assert_eq!(Sphere.evaluate(x.view()).value, 0.0);
    }

    #[test]
    fn test_rosenbrock_minimum_at_ones() {
        let x = Array1::ones(4);
        assert_eq!(Rosenbrock.evaluate(x.view()).value, 0.0);
    }

    #[test]
    fn test_rastrigin_minimum_at_origin() {
        let x = Array1::zeros(3);
        assert!(Rastrigin.evaluate(x.view()).value.abs() < 1e-10);
    }

    #[test]
    fn test_constrained_sphere_reports_violation() {
        let origin = Array1::zeros(2);
        let eval = ConstrainedSphere.evaluate(origin.view());
        assert_eq!(eval.constraint_violation, 1.0);
        assert!(!eval.feasible());

        let boundary = Array1::from_vec(vec![0.5, 0.5]);
        let eval = ConstrainedSphere.evaluate(boundary.view());
        assert!(eval.feasible());
        assert_eq!(eval.value, 0.5);
    }
}
