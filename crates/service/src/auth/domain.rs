use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub login_id: String,
    pub password: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetSession {
    pub pet_id: Uuid,
    pub login_id: String,
    pub access_token: String,
    pub refresh_token: String,
}
