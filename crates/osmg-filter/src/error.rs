//! Filter-subsystem error type.

use thiserror::Error;

use osmg_core::CoreError;

/// Errors produced while loading evaluator or profile configuration.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("no evaluator named {0:?} in configuration")]
    MissingEvaluator(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FilterResult<T> = Result<T, FilterError>;
