use crate::types::ChickenId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoopError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("{id} was not allocated by this farm")]
    ForeignChicken { id: ChickenId },

    #[error("{id} is already in the flock")]
    DuplicateChicken { id: ChickenId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CoopResult<T> = Result<T, CoopError>;
