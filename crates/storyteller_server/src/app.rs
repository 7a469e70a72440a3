//! Wiring configuration into a running service.

use crate::{AppConfig, AudioConfig, Pipeline};
use std::sync::Arc;
use std::time::Duration;
use storyteller_error::StorytellerResult;
use storyteller_interface::{Captioner, Speaker, TextGenerator};
use storyteller_models::{GoogleTranslateSpeaker, HuggingFaceCaptioner, OpenAiClient};
use storyteller_narrative::NarrativeGenerator;
use storyteller_storage::{AudioStore, UploadStore};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Build the production pipeline: HTTP adapters plus on-disk stores.
///
/// Creates the upload and audio directories if they are missing.
///
/// # Errors
///
/// Returns error if the configuration is invalid, a directory cannot be
/// created, or an HTTP client cannot be initialized.
#[instrument(skip(config))]
pub fn build_pipeline(config: &AppConfig) -> StorytellerResult<Pipeline> {
    config.validate()?;

    if config.openai.api_key.is_none() {
        warn!("No OpenAI API key configured; narrative requests will be rejected upstream");
    }

    let uploads = UploadStore::new(&config.storage.upload_dir)?;
    let audio = AudioStore::new(&config.storage.audio_dir)?;

    let captioner: Arc<dyn Captioner> =
        Arc::new(HuggingFaceCaptioner::new(config.captioning_config())?);
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::new(config.openai_config())?);
    let speaker: Arc<dyn Speaker> = Arc::new(GoogleTranslateSpeaker::new(config.speech_config())?);

    let narrator = NarrativeGenerator::new(generator, config.generation_params());

    info!(
        captioner = captioner.provider_name(),
        model = narrator.backend().model_name(),
        speaker = speaker.provider_name(),
        "Pipeline ready"
    );

    Ok(Pipeline::new(
        uploads,
        audio,
        captioner,
        narrator,
        speaker,
        config.default_language()?,
    ))
}

/// Periodically delete stale audio files.
///
/// Returns `None` when `cleanup_interval_secs` is 0. The first run happens
/// immediately.
pub fn spawn_audio_cleanup(audio: AudioStore, config: &AudioConfig) -> Option<JoinHandle<()>> {
    if config.cleanup_interval_secs == 0 {
        info!("Audio cleanup disabled");
        return None;
    }

    let period = Duration::from_secs(config.cleanup_interval_secs);
    let max_age = Duration::from_secs(config.max_age_hours.saturating_mul(3600));

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = audio.cleanup_older_than(max_age).await {
                warn!(error = %e, "Audio cleanup failed");
            }
        }
    }))
}
