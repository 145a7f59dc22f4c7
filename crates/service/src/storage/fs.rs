use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::{FileStorage, UploadFile};

/// Filesystem-backed object storage.
///
/// Objects are written under `root_dir` with a generated UUID key; the
/// returned URL is `{public_base_url}/{key}` and is what callers later pass
/// back to [`FileStorage::delete_file`].
#[derive(Clone)]
pub struct FsFileStorage {
    root_dir: PathBuf,
    public_base_url: String,
}

impl FsFileStorage {
    pub async fn new<P: Into<PathBuf>>(root_dir: P, public_base_url: &str) -> Result<Self, ServiceError> {
        let root_dir = root_dir.into();
        fs::create_dir_all(&root_dir)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", root_dir.display())))?;
        Ok(Self { root_dir, public_base_url: public_base_url.trim_end_matches('/').to_string() })
    }

    /// Map a public URL back to the object key, rejecting URLs this store
    /// never produced.
    fn key_from_url(&self, url: &str) -> Result<String, ServiceError> {
        let rest = url
            .strip_prefix(&self.public_base_url)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(|| ServiceError::Storage(format!("url not owned by this store: {url}")))?;
        if rest.is_empty() || rest.contains('/') || rest.contains("..") {
            return Err(ServiceError::Storage(format!("malformed object url: {url}")));
        }
        Ok(rest.to_string())
    }
}

#[async_trait]
impl FileStorage for FsFileStorage {
    async fn upload_image(&self, file: &UploadFile) -> Result<String, ServiceError> {
        let key = match file.extension() {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.root_dir.join(&key);
        fs::write(&path, &file.bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", path.display())))?;
        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete_file(&self, url: &str) -> Result<(), ServiceError> {
        let key = self.key_from_url(url)?;
        let path = self.root_dir.join(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Deleting an already-gone object is not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Storage(format!("cannot delete {}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_delete_round_trip() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("fs_store_{}", Uuid::new_v4()));
        let store = FsFileStorage::new(&root, "/uploads").await?;

        let file = UploadFile { file_name: "monty.png".into(), content_type: "image/png".into(), bytes: vec![1, 2, 3] };
        let url = store.upload_image(&file).await?;
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let key = url.strip_prefix("/uploads/").unwrap();
        let on_disk = root.join(key);
        assert_eq!(tokio::fs::read(&on_disk).await?, vec![1, 2, 3]);

        store.delete_file(&url).await?;
        assert!(tokio::fs::metadata(&on_disk).await.is_err());

        // Deleting again is a no-op
        store.delete_file(&url).await?;

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn rejects_foreign_and_traversal_urls() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("fs_store_{}", Uuid::new_v4()));
        let store = FsFileStorage::new(&root, "/uploads").await?;

        assert!(store.delete_file("https://elsewhere/object.png").await.is_err());
        assert!(store.delete_file("/uploads/../etc/passwd").await.is_err());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
