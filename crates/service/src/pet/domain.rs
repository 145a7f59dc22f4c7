use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// Domain pet (business view). The password is carried only as its hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub login_id: String,
    pub password_hash: String,
    pub pet_name: String,
    pub age: i32,
    pub gender: String,
    pub species: String,
    pub profile_image: Option<String>,
    pub roles: Vec<String>,
    pub address: Address,
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePetInput {
    pub login_id: String,
    pub password: String,
    pub pet_name: String,
    pub age: i32,
    pub gender: String,
    pub species: String,
    pub code: i32,
}

/// Partial-update input; `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePetInput {
    pub pet_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub species: Option<String>,
    pub code: Option<i32>,
}

/// Insert payload handed to the repository; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub login_id: String,
    pub password_hash: String,
    pub pet_name: String,
    pub age: i32,
    pub gender: String,
    pub species: String,
    pub profile_image: Option<String>,
    pub roles: Vec<String>,
    pub address: Address,
}
