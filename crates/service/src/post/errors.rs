use thiserror::Error;

/// Business errors for post workflows
#[derive(Debug, Error)]
pub enum PostError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("pet not found")]
    PetNotFound,
    #[error("token id and pet id do not match")]
    TokenMismatch,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl PostError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PostError::Validation(_) => 3001,
            PostError::PetNotFound => 3002,
            PostError::TokenMismatch => 3003,
            PostError::Storage(_) => 3101,
            PostError::Repository(_) => 3200,
        }
    }
}
