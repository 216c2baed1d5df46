use dbanneal::core::io::design::DesignError;
use dbanneal::core::io::sim_out::SimOutError;
use dbanneal::engine::config::ConfigError;
use dbanneal::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to load design '{path}': {source}", path = path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: DesignError,
    },

    #[error("Failed to write results to '{path}': {source}", path = path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: SimOutError,
    },

    #[error("Invalid simulation parameters: {0}")]
    Parameters(#[from] ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
