//! Upload and audio artifact storage for Storyteller.
//!
//! Two flat directories back the pipeline:
//!
//! - the **upload directory** holds source images saved as
//!   `<uuid><original extension>`;
//! - the **audio directory** holds synthesized speech saved as
//!   `audio_<uuid>.mp3`.
//!
//! Both are append-only from the pipeline's point of view. Names are
//! generated with UUID v4, and audio files are opened with `create_new`, so
//! a caller-supplied name that is already taken is refused rather than
//! overwritten. No locking is needed.
//!
//! Retrieval of audio goes through [`AudioStore::resolve_audio_path`], which
//! confines client-supplied names to the audio directory.
//!
//! # Example
//!
//! ```rust
//! use storyteller_storage::{AudioStore, UploadStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uploads = UploadStore::new("/tmp/storyteller/uploads")?;
//! let stored = uploads.save("beach.JPG", b"...jpeg bytes...").await?;
//! assert!(stored.filename().ends_with(".jpg"));
//!
//! let audio = AudioStore::new("/tmp/storyteller/audio")?;
//! let clip = audio.save(b"ID3...", None).await?;
//! let path = audio.resolve_audio_path(clip.filename()).await?;
//! assert_eq!(&path, clip.path());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod upload;

pub use audio::{
    AUDIO_EXTENSION, AUDIO_MIME_TYPE, AudioStore, StoredAudio, validate_audio_filename,
};
pub use storyteller_error::{
    AudioPathError, AudioPathErrorKind, StorageError, StorageErrorKind, UploadError,
    UploadErrorKind,
};
pub use upload::{ALLOWED_IMAGE_EXTENSIONS, StoredUpload, UploadStore};
