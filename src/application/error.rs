use thiserror::Error;

use crate::domain::todo::TodoId;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid todo: title must not be empty")]
    InvalidInput,
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}
