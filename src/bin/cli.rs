//! Command-line interface for the swarmopt library
//!
//! This binary runs the particle swarm optimizer against one of the bundled
//! benchmark objectives, printing the best solution found and optionally
//! writing the full optimization report as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Minimize the sphere function in two dimensions
//! swarmopt minimize --function sphere --dimensions 2
//!
//! # Reproducible Rastrigin run with a larger swarm and a JSON report
//! swarmopt minimize --function rastrigin --dimensions 5 \
//!     --swarm-size 80 --max-iterations 300 --seed 42 --report report.json
//! ```

use std::{fs::File, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ndarray::Array1;
use swarmopt::{
    objective::{ConstrainedSphere, Objective, Rastrigin, Rosenbrock, Sphere},
    swarm::{OptimizationReport, OptimizeError, PSOBuilder, ParticleSwarm, SwarmConfig},
};

/// Main CLI configuration struct
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Minimize a benchmark objective with the particle swarm optimizer
    Minimize {
        /// Benchmark objective to minimize
        #[arg(short, long, value_enum)]
        function: Function,

        /// Number of design variables
        #[arg(short, long, default_value_t = 2)]
        dimensions: usize,

        /// Lower bound applied to every dimension
        #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
        lower: f64,

        /// Upper bound applied to every dimension
        #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
        upper: f64,

        /// Number of particles in the swarm
        #[arg(long, default_value_t = 50)]
        swarm_size: usize,

        /// Maximum number of iterations before stopping
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Path to write the optimization report as JSON
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

/// Available benchmark objectives
#[derive(Clone, Copy, ValueEnum)]
enum Function {
    /// Sphere function, unimodal
    Sphere,
    /// Rosenbrock valley, unimodal but ill-conditioned
    Rosenbrock,
    /// Rastrigin function, highly multimodal
    Rastrigin,
    /// Sphere function under a linear feasibility constraint
    ConstrainedSphere,
}

/// Main entry point for the CLI application
pub fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Minimize {
            function,
            dimensions,
            lower,
            upper,
            swarm_size,
            max_iterations,
            seed,
            report,
        } => {
            let mut builder = PSOBuilder::new(
                Array1::from_elem(*dimensions, *lower),
                Array1::from_elem(*dimensions, *upper),
            )
            .swarm_size(*swarm_size)
            .max_iterations(*max_iterations);

            if let Some(seed) = seed {
                builder = builder.seed(*seed);
            }

            let config = builder.build();
            let result = match function {
                Function::Sphere => minimize(config, Sphere),
                Function::Rosenbrock => minimize(config, Rosenbrock),
                Function::Rastrigin => minimize(config, Rastrigin),
                Function::ConstrainedSphere => minimize(config, ConstrainedSphere),
            }
            .expect("Failed to construct swarm");

            println!("{} {}", "Best solution:".green().bold(), result);

            if let Some(path) = report {
                let file = File::create(path).expect("Failed to create report file");
                serde_json::to_writer_pretty(file, &result).expect("Failed to write report");
                println!("Report written to {}", path.display());
            }
        }
    }
}

/// Runs one optimization to completion.
fn minimize<O: Objective>(
    config: SwarmConfig,
    objective: O,
) -> Result<OptimizationReport, OptimizeError> {
    let mut swarm = ParticleSwarm::new(config, objective)?;
    Ok(swarm.optimize())
}
