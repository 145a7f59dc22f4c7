use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::session::SessionStore;

/// In-memory session store for tests and doc examples.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(&self, key: String, value: String) -> Result<(), ServiceError> {
        self.inner.lock().unwrap().insert(key, value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    async fn delete(&self, key: &str) -> Result<bool, ServiceError> {
        Ok(self.inner.lock().unwrap().remove(key).is_some())
    }
}
