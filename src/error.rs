//! Crate-level error type

use thiserror::Error;

use crate::block::BlockError;
use crate::config::ConfigError;
use crate::design::DesignError;
use crate::scoring::ScoringError;
use crate::session::InputError;
use crate::simulation::SimulationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("design failed: {0}")]
    Design(#[from] DesignError),

    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Block(#[from] BlockError),
}

pub type Result<T> = std::result::Result<T, Error>;
