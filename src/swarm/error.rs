use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("Swarm must contain at least one particle")]
    EmptySwarm,
}
