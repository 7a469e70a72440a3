//! Synthesized audio persistence and confined retrieval.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use storyteller_error::{
    AudioPathError, AudioPathErrorKind, StorageError, StorageErrorKind, StorytellerError,
    StorytellerResult,
};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// The only extension audio artifacts are stored and served with.
pub const AUDIO_EXTENSION: &str = ".mp3";

/// MIME type audio artifacts are served with.
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// A synthesized audio file written to the audio directory.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct StoredAudio {
    /// Full path of the saved file
    path: PathBuf,
    /// Bare file name, usable with [`AudioStore::resolve_audio_path`]
    filename: String,
    /// Bytes written
    size_bytes: u64,
}

/// Lexical checks on a client-supplied audio file name.
///
/// Never touches the filesystem.
///
/// # Errors
///
/// - [`AudioPathErrorKind::Malformed`] if the name contains `..`, `/`, `\`,
///   a double quote or a control character. Accepted names can go into a
///   `Content-Disposition` header unescaped.
/// - [`AudioPathErrorKind::UnsupportedFormat`] if it does not end in `.mp3`.
///
/// # Examples
///
/// ```
/// use storyteller_storage::{validate_audio_filename, AudioPathErrorKind};
///
/// assert!(validate_audio_filename("audio_1.mp3").is_ok());
/// let err = validate_audio_filename("../secret.mp3").unwrap_err();
/// assert!(matches!(err.kind, AudioPathErrorKind::Malformed(_)));
/// assert!(validate_audio_filename("say \"hi\".mp3").is_err());
/// ```
pub fn validate_audio_filename(requested: &str) -> Result<(), AudioPathError> {
    if requested.contains("..")
        || requested
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '"') || c.is_control())
    {
        return Err(AudioPathError::new(AudioPathErrorKind::Malformed(
            requested.to_string(),
        )));
    }

    if !requested.ends_with(AUDIO_EXTENSION) {
        return Err(AudioPathError::new(AudioPathErrorKind::UnsupportedFormat(
            requested.to_string(),
        )));
    }

    Ok(())
}

/// Writes synthesized speech and serves it back by bare file name.
#[derive(Debug, Clone)]
pub struct AudioStore {
    audio_dir: PathBuf,
}

impl AudioStore {
    /// Create a store rooted at `audio_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[instrument(skip(audio_dir))]
    pub fn new(audio_dir: impl Into<PathBuf>) -> StorytellerResult<Self> {
        let audio_dir = audio_dir.into();

        std::fs::create_dir_all(&audio_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                audio_dir.display(),
                e
            )))
        })?;

        info!(path = %audio_dir.display(), "Audio directory ready");
        Ok(Self { audio_dir })
    }

    /// Directory audio files live in.
    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Write `data` as a new audio artifact.
    ///
    /// Without `filename` the name is `audio_<uuid>.mp3`. A supplied name gets
    /// `.mp3` appended when missing and must pass
    /// [`validate_audio_filename`], so it cannot leave the audio directory.
    /// Existing artifacts are never replaced.
    ///
    /// # Errors
    ///
    /// Returns an [`AudioPathError`] for an unusable name or one that is
    /// already taken (`AlreadyExists`), or a [`StorageError`] if the write
    /// fails.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save(&self, data: &[u8], filename: Option<&str>) -> StorytellerResult<StoredAudio> {
        let filename = match filename.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) if name.ends_with(AUDIO_EXTENSION) => name.to_string(),
            Some(name) => format!("{}{}", name, AUDIO_EXTENSION),
            None => format!("audio_{}{}", Uuid::new_v4(), AUDIO_EXTENSION),
        };
        validate_audio_filename(&filename)?;

        let path = self.audio_dir.join(&filename);
        let write_error = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        };

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    warn!(filename = %filename, "Refusing to replace existing audio");
                    StorytellerError::from(AudioPathError::new(AudioPathErrorKind::AlreadyExists(
                        filename.clone(),
                    )))
                }
                _ => StorytellerError::from(write_error(e)),
            })?;
        file.write_all(data).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)?;

        debug!(path = %path.display(), "Saved audio");

        Ok(StoredAudio {
            path,
            filename,
            size_bytes: data.len() as u64,
        })
    }

    /// Resolve a client-supplied name to a file inside the audio directory.
    ///
    /// Lexical checks run first; the filesystem is only probed for names
    /// that passed them.
    ///
    /// # Errors
    ///
    /// In order of evaluation: `Malformed`, `UnsupportedFormat`, `NotFound`,
    /// `NotAFile` (see [`AudioPathErrorKind`]).
    #[instrument(skip(self))]
    pub async fn resolve_audio_path(&self, requested: &str) -> Result<PathBuf, AudioPathError> {
        validate_audio_filename(requested).inspect_err(|e| {
            warn!(kind = %e.kind, "Rejected audio file name");
        })?;

        let candidate = self.audio_dir.join(requested);

        let metadata = tokio::fs::metadata(&candidate).await.map_err(|e| {
            debug!(path = %candidate.display(), error = %e, "Audio file missing");
            AudioPathError::new(AudioPathErrorKind::NotFound(requested.to_string()))
        })?;

        if !metadata.is_file() {
            return Err(AudioPathError::new(AudioPathErrorKind::NotAFile(
                requested.to_string(),
            )));
        }

        Ok(candidate)
    }

    /// Read the bytes of a file returned by [`resolve_audio_path`](Self::resolve_audio_path).
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the file cannot be read.
    #[instrument(skip(self))]
    pub async fn read(&self, path: &Path) -> StorytellerResult<Vec<u8>> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        debug!(path = %path.display(), size = bytes.len(), "Read audio");
        Ok(bytes)
    }

    /// Delete `.mp3` files last modified more than `max_age` ago.
    ///
    /// Files that cannot be inspected or removed are logged and skipped.
    /// Returns how many files were deleted.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] only if the directory itself cannot be read.
    #[instrument(skip(self))]
    pub async fn cleanup_older_than(&self, max_age: Duration) -> StorytellerResult<usize> {
        let mut entries = tokio::fs::read_dir(&self.audio_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryRead(format!(
                "{}: {}",
                self.audio_dir.display(),
                e
            )))
        })?;

        let now = SystemTime::now();
        let mut removed = 0;

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read audio directory entry");
                    break;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("mp3") {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| {
                if m.is_file() {
                    m.modified()
                } else {
                    Err(std::io::Error::other("not a regular file"))
                }
            }) {
                Ok(modified) => modified,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping audio entry");
                    continue;
                }
            };

            let age = now.duration_since(modified).unwrap_or_default();
            if age <= max_age {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    debug!(path = %path.display(), age_secs = age.as_secs(), "Removed stale audio");
                    removed += 1;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stale audio"),
            }
        }

        info!(removed, "Audio cleanup finished");
        Ok(removed)
    }
}
