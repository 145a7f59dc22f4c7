//! Session cache holding refresh tokens keyed by login id.
//!
//! Keys follow the `RT:{login_id}` convention so a pet's cached session can
//! be invalidated by login id alone (account deletion, logout).

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod file;
pub mod memory;

/// Key under which a pet's refresh token is cached.
pub fn refresh_token_key(login_id: &str) -> String {
    format!("RT:{login_id}")
}

/// Keyed session cache abstraction.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set(&self, key: String, value: String) -> Result<(), ServiceError>;
    async fn get(&self, key: &str) -> Option<String>;
    /// Remove a key; returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, ServiceError>;
}
