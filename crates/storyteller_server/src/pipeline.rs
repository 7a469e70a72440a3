//! Image to narrative orchestration.

use std::path::PathBuf;
use std::sync::Arc;
use storyteller_core::{LanguageCode, NarrativeOverrides};
use storyteller_error::{PipelineError, SpeechError, SpeechErrorKind, StorytellerError};
use storyteller_interface::{Captioner, Speaker, TextGenerator};
use storyteller_narrative::NarrativeGenerator;
use storyteller_storage::{AudioStore, StoredUpload, UploadStore};
use tracing::{debug, info, instrument, warn};

/// An image as received from a client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Name the client sent the file under; only its extension is kept
    pub filename: String,
    /// Raw file contents
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload from a client file name and its bytes.
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Per-request options for [`Pipeline::process`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOptions {
    /// Overrides layered on the service's generation defaults
    pub overrides: NarrativeOverrides,
    /// Synthesize speech for the narrative
    pub tts: bool,
    /// Speech language; the configured default when `None`
    pub language: Option<String>,
    /// Name for the audio file; generated when `None`
    pub audio_filename: Option<String>,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ProcessOutcome {
    /// Where the source image was stored
    file_path: PathBuf,
    /// Caption of the image
    caption: String,
    /// Generated narrative, trimmed
    narrative: String,
    /// Synthesized speech, when requested
    audio_file: Option<PathBuf>,
}

/// Result of captioning without narrative generation.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct CaptionOutcome {
    /// Where the source image was stored
    file_path: PathBuf,
    /// Caption of the image
    caption: String,
}

/// Runs uploads through captioning, narrative generation and speech.
///
/// Holds only shared, immutable collaborators; one instance serves every
/// request concurrently.
pub struct Pipeline {
    uploads: UploadStore,
    audio: AudioStore,
    captioner: Arc<dyn Captioner>,
    narrator: NarrativeGenerator<Arc<dyn TextGenerator>>,
    speaker: Arc<dyn Speaker>,
    default_language: LanguageCode,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("upload_dir", &self.uploads.upload_dir())
            .field("audio_dir", &self.audio.audio_dir())
            .field("captioner", &self.captioner.provider_name())
            .field("generator", &self.narrator.backend().model_name())
            .field("speaker", &self.speaker.provider_name())
            .field("default_language", &self.default_language)
            .finish()
    }
}

impl Pipeline {
    /// Assemble a pipeline from its stores and collaborators.
    pub fn new(
        uploads: UploadStore,
        audio: AudioStore,
        captioner: Arc<dyn Captioner>,
        narrator: NarrativeGenerator<Arc<dyn TextGenerator>>,
        speaker: Arc<dyn Speaker>,
        default_language: LanguageCode,
    ) -> Self {
        Self {
            uploads,
            audio,
            captioner,
            narrator,
            speaker,
            default_language,
        }
    }

    /// Store audio files are written to and served from.
    pub fn audio_store(&self) -> &AudioStore {
        &self.audio
    }

    /// Store source images are written to.
    pub fn upload_store(&self) -> &UploadStore {
        &self.uploads
    }

    /// Persist an image without further processing.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Upload`] for a disallowed extension or a failed write.
    #[instrument(skip(self, upload), fields(filename = %upload.filename, size = upload.data.len()))]
    pub async fn upload_only(&self, upload: ImageUpload) -> Result<StoredUpload, PipelineError> {
        self.store(upload).await
    }

    /// Persist an image and caption it.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Upload`] or [`PipelineError::Caption`].
    #[instrument(skip(self, upload), fields(filename = %upload.filename, size = upload.data.len()))]
    pub async fn caption_only(&self, upload: ImageUpload) -> Result<CaptionOutcome, PipelineError> {
        let stored = self.store(upload).await?;
        let caption = self.caption(&stored).await?;

        Ok(CaptionOutcome {
            file_path: stored.path().clone(),
            caption,
        })
    }

    /// Run every stage: store, caption, narrate and optionally speak.
    ///
    /// Stages run strictly in sequence and the first failure ends the run.
    /// Files written by earlier stages are left in place.
    ///
    /// # Errors
    ///
    /// One [`PipelineError`] variant per stage, wrapping the stage's own error.
    #[instrument(
        skip(self, upload, options),
        fields(filename = %upload.filename, size = upload.data.len(), tts = options.tts)
    )]
    pub async fn process(
        &self,
        upload: ImageUpload,
        options: &ProcessOptions,
    ) -> Result<ProcessOutcome, PipelineError> {
        let stored = self.store(upload).await?;
        let caption = self.caption(&stored).await?;

        let narrative = self
            .narrator
            .generate(&caption, &options.overrides)
            .await
            .inspect_err(|e| warn!(error = %e, "Narrative generation failed"))
            .map_err(PipelineError::Narrative)?;

        let audio_file = if options.tts {
            Some(self.speak(&narrative, options).await?)
        } else {
            None
        };

        info!(
            caption_len = caption.len(),
            narrative_len = narrative.len(),
            audio = audio_file.is_some(),
            "Pipeline completed"
        );

        Ok(ProcessOutcome {
            file_path: stored.path().clone(),
            caption,
            narrative,
            audio_file,
        })
    }

    async fn store(&self, upload: ImageUpload) -> Result<StoredUpload, PipelineError> {
        let stored = self
            .uploads
            .save(&upload.filename, &upload.data)
            .await
            .inspect_err(|e| warn!(error = %e, "Upload rejected"))
            .map_err(PipelineError::Upload)?;

        debug!(path = %stored.path().display(), "Stored upload");
        Ok(stored)
    }

    async fn caption(&self, stored: &StoredUpload) -> Result<String, PipelineError> {
        let caption = self
            .captioner
            .caption(stored.path())
            .await
            .inspect_err(|e| warn!(error = %e, "Captioning failed"))
            .map_err(PipelineError::Caption)?;

        debug!(caption = %caption, "Captioned image");
        Ok(caption)
    }

    async fn speak(&self, narrative: &str, options: &ProcessOptions) -> Result<PathBuf, PipelineError> {
        let language = match options.language.as_deref() {
            Some(raw) => LanguageCode::parse(raw).map_err(|_| {
                speech_error(SpeechError::new(SpeechErrorKind::UnsupportedLanguage(
                    raw.to_string(),
                )))
            })?,
            None => self.default_language.clone(),
        };

        let bytes = self
            .speaker
            .synthesize(narrative, &language)
            .await
            .inspect_err(|e| warn!(error = %e, "Speech synthesis failed"))
            .map_err(speech_error)?;

        let stored = self
            .audio
            .save(&bytes, options.audio_filename.as_deref())
            .await
            .map_err(PipelineError::Speech)?;

        debug!(path = %stored.path().display(), language = %language, "Stored audio");
        Ok(stored.path().clone())
    }
}

fn speech_error(err: SpeechError) -> PipelineError {
    PipelineError::Speech(StorytellerError::from(err))
}
