//! Object storage for uploaded images.
//!
//! The backend contract is deliberately small: upload bytes, get back a URL
//! reference; delete by the URL previously returned. Services never touch
//! paths or buckets directly.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod fs;
pub mod mock;

/// An uploaded file as received from the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension taken from the client-supplied name, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name.rsplit('/').next().unwrap_or(&self.file_name);
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

/// Object-storage abstraction used for profile and post images.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist the file and return its public URL.
    async fn upload_image(&self, file: &UploadFile) -> Result<String, ServiceError>;
    /// Delete a previously uploaded object by the URL `upload_image` returned.
    async fn delete_file(&self, url: &str) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_file_name() {
        let f = UploadFile { file_name: "monty.png".into(), content_type: "image/png".into(), bytes: vec![1] };
        assert_eq!(f.extension(), Some("png"));

        let noext = UploadFile { file_name: "monty".into(), content_type: "image/png".into(), bytes: vec![1] };
        assert_eq!(noext.extension(), None);

        let dotfile = UploadFile { file_name: ".hidden".into(), content_type: "image/png".into(), bytes: vec![1] };
        assert_eq!(dotfile.extension(), None);
    }
}
