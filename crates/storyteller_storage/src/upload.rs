//! Source image persistence.

use std::path::{Path, PathBuf};
use storyteller_error::{
    StorageError, StorageErrorKind, StorytellerResult, UploadError, UploadErrorKind,
};
use uuid::Uuid;

/// Image extensions accepted for upload, lowercase with leading dot.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// A source image written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct StoredUpload {
    /// Full path of the saved file
    path: PathBuf,
    /// Generated file name (`<uuid><ext>`)
    filename: String,
    /// Name the client uploaded the file under
    original_filename: String,
    /// Bytes written
    size_bytes: u64,
}

/// Saves uploaded images under unique names.
#[derive(Debug, Clone)]
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `upload_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(upload_dir))]
    pub fn new(upload_dir: impl Into<PathBuf>) -> StorytellerResult<Self> {
        let upload_dir = upload_dir.into();

        std::fs::create_dir_all(&upload_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                upload_dir.display(),
                e
            )))
        })?;

        tracing::info!(path = %upload_dir.display(), "Upload directory ready");
        Ok(Self { upload_dir })
    }

    /// Directory uploads are written to.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Extract and check the extension of `filename`.
    ///
    /// Matching is case-insensitive; the returned extension is lowercase
    /// with its leading dot.
    ///
    /// # Errors
    ///
    /// [`UploadErrorKind::MissingFilename`] for an empty name,
    /// [`UploadErrorKind::InvalidFileType`] for anything off the allow-list.
    pub fn validate_extension(filename: &str) -> Result<String, UploadError> {
        if filename.trim().is_empty() {
            return Err(UploadError::new(UploadErrorKind::MissingFilename));
        }

        let extension = Path::new(filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        if ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Ok(extension)
        } else {
            Err(UploadError::new(UploadErrorKind::InvalidFileType {
                extension,
                allowed: ALLOWED_IMAGE_EXTENSIONS.join(", "),
            }))
        }
    }

    /// Validate and write an uploaded image under a fresh unique name.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] for a rejected name, or a [`StorageError`]
    /// if the write fails.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save(
        &self,
        original_filename: &str,
        data: &[u8],
    ) -> StorytellerResult<StoredUpload> {
        let extension = Self::validate_extension(original_filename)?;

        let filename = format!("{}{}", Uuid::new_v4(), extension);
        let path = self.upload_dir.join(&filename);

        tokio::fs::write(&path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Saved upload");

        Ok(StoredUpload {
            path,
            filename,
            original_filename: original_filename.to_string(),
            size_bytes: data.len() as u64,
        })
    }
}
