use thiserror::Error;

/// Business errors for pet account workflows
#[derive(Debug, Error)]
pub enum PetError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("pet already exists")]
    PetExists,
    #[error("pet not found")]
    PetNotFound,
    #[error("address not found")]
    AddressNotFound,
    #[error("token id and pet id do not match")]
    TokenMismatch,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl PetError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PetError::Validation(_) => 2001,
            PetError::PetExists => 2002,
            PetError::PetNotFound => 2003,
            PetError::AddressNotFound => 2004,
            PetError::TokenMismatch => 2005,
            PetError::HashError(_) => 2101,
            PetError::Storage(_) => 2102,
            PetError::Repository(_) => 2200,
        }
    }
}
