//! Files sent through multipart upload endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::ApiError;

/// A file to upload.
#[derive(Clone)]
pub struct UploadFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    /// Create an upload from in-memory bytes.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read an upload from disk, inferring the content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Io` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Size of the file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| ApiError::Multipart(e.to_string()))
    }
}

/// Build a form with every file under the same field name.
pub(crate) fn form_with_files(
    field: &'static str,
    files: impl IntoIterator<Item = UploadFile>,
) -> Result<Form, ApiError> {
    files
        .into_iter()
        .try_fold(Form::new(), |form, file| Ok(form.part(field, file.into_part()?)))
}

/// Content type for a file, by extension.
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
