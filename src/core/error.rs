use thiserror::Error;

use crate::engine::ResolveError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed rule data at line {line}: {reason}")]
    MalformedRule { line: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
