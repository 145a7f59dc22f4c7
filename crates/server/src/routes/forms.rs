use std::collections::HashMap;

use axum::extract::Multipart;

use service::storage::UploadFile;

use crate::errors::ApiError;

/// Parsed multipart/form-data request: text fields plus uploaded files.
#[derive(Default)]
pub(crate) struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadFile>>,
}

impl MultipartForm {
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else { continue };
            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                form.files
                    .entry(name)
                    .or_default()
                    .push(UploadFile { file_name, content_type, bytes: bytes.to_vec() });
            } else {
                let text = field.text().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    pub(crate) fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub(crate) fn require(&self, name: &str) -> Result<String, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::BadRequest(format!("missing field: {name}")))
    }

    pub(crate) fn require_i32(&self, name: &str) -> Result<i32, ApiError> {
        self.require(name)?
            .parse::<i32>()
            .map_err(|_| ApiError::BadRequest(format!("invalid integer field: {name}")))
    }

    pub(crate) fn opt_i32(&self, name: &str) -> Result<Option<i32>, ApiError> {
        match self.fields.get(name) {
            Some(v) => v
                .parse::<i32>()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("invalid integer field: {name}"))),
            None => Ok(None),
        }
    }

    /// First uploaded file under the field name, if any.
    pub(crate) fn file(&self, name: &str) -> Option<UploadFile> {
        self.files.get(name).and_then(|v| v.first().cloned())
    }

    /// All uploaded files under the (repeatable) field name.
    pub(crate) fn file_list(&self, name: &str) -> Vec<UploadFile> {
        self.files.get(name).cloned().unwrap_or_default()
    }
}
