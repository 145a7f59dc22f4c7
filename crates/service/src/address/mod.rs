//! Address lookup: maps a postal code to a stored address record.

pub mod repository;
pub mod repo;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal-code-keyed location record (business view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: Uuid,
    pub code: i32,
    pub name: String,
}
