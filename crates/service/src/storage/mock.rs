use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::{FileStorage, UploadFile};

/// In-memory storage double recording every upload and delete, for tests
/// and doc examples.
#[derive(Default)]
pub struct MockFileStorage {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
}

impl MockFileStorage {
    pub fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for MockFileStorage {
    async fn upload_image(&self, file: &UploadFile) -> Result<String, ServiceError> {
        let url = match file.extension() {
            Some(ext) => format!("mock://images/{}.{ext}", Uuid::new_v4()),
            None => format!("mock://images/{}", Uuid::new_v4()),
        };
        self.uploads.lock().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete_file(&self, url: &str) -> Result<(), ServiceError> {
        self.deletes.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
