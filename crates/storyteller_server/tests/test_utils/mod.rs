//! Test utilities for server tests.
//!
//! Scripted collaborators with call counters, and a helper that assembles a
//! [`Pipeline`] over them in a temporary directory.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use storyteller_core::{CompletionRequest, GenerationParams, LanguageCode};
use storyteller_error::{
    CaptionError, CaptionErrorKind, ModelError, ModelErrorKind, SpeechError, SpeechErrorKind,
};
use storyteller_interface::{Captioner, Speaker, TextGenerator};
use storyteller_narrative::NarrativeGenerator;
use storyteller_server::Pipeline;
use storyteller_storage::{AudioStore, UploadStore};
use tempfile::TempDir;

/// Captioner answering with a fixed caption or error.
#[derive(Debug)]
pub struct MockCaptioner {
    result: Result<String, CaptionErrorKind>,
    calls: AtomicUsize,
    paths: Mutex<Vec<PathBuf>>,
}

impl MockCaptioner {
    pub fn new_success(caption: impl Into<String>) -> Self {
        Self::new(Ok(caption.into()))
    }

    pub fn new_error(kind: CaptionErrorKind) -> Self {
        Self::new(Err(kind))
    }

    fn new(result: Result<String, CaptionErrorKind>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_path(&self) -> Option<PathBuf> {
        self.paths.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Captioner for MockCaptioner {
    async fn caption(&self, image_path: &Path) -> Result<String, CaptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(image_path.to_path_buf());
        self.result.clone().map_err(CaptionError::new)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Text generator answering with a fixed text or error.
#[derive(Debug)]
pub struct MockTextGenerator {
    result: Result<String, ModelErrorKind>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockTextGenerator {
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new(Ok(text.into()))
    }

    pub fn new_error(kind: ModelErrorKind) -> Self {
        Self::new(Err(kind))
    }

    fn new(result: Result<String, ModelErrorKind>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone().map_err(ModelError::new)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Speaker returning fixed bytes or an error.
#[derive(Debug)]
pub struct MockSpeaker {
    result: Result<Vec<u8>, SpeechErrorKind>,
    calls: AtomicUsize,
    languages: Mutex<Vec<LanguageCode>>,
}

impl MockSpeaker {
    pub fn new_success(audio: impl Into<Vec<u8>>) -> Self {
        Self::new(Ok(audio.into()))
    }

    pub fn new_error(kind: SpeechErrorKind) -> Self {
        Self::new(Err(kind))
    }

    fn new(result: Result<Vec<u8>, SpeechErrorKind>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_language(&self) -> Option<LanguageCode> {
        self.languages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Speaker for MockSpeaker {
    async fn synthesize(
        &self,
        _text: &str,
        language: &LanguageCode,
    ) -> Result<Vec<u8>, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language.clone());
        self.result.clone().map_err(SpeechError::new)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A pipeline over mocks, with its scratch directory and the mocks kept
/// for inspection.
pub struct Fixture {
    pub dir: TempDir,
    pub captioner: Arc<MockCaptioner>,
    pub generator: Arc<MockTextGenerator>,
    pub speaker: Arc<MockSpeaker>,
    pub pipeline: Arc<Pipeline>,
}

impl Fixture {
    /// Every collaborator succeeds.
    pub fn happy() -> anyhow::Result<Self> {
        Self::with(
            MockCaptioner::new_success("a red square"),
            MockTextGenerator::new_success("  The square waited.  "),
            MockSpeaker::new_success(b"ID3fake".to_vec()),
        )
    }

    pub fn with(
        captioner: MockCaptioner,
        generator: MockTextGenerator,
        speaker: MockSpeaker,
    ) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let captioner = Arc::new(captioner);
        let generator = Arc::new(generator);
        let speaker = Arc::new(speaker);

        let uploads = UploadStore::new(dir.path().join("uploads"))?;
        let audio = AudioStore::new(dir.path().join("audio"))?;
        let narrator = NarrativeGenerator::new(
            generator.clone() as Arc<dyn TextGenerator>,
            GenerationParams::default(),
        );

        let pipeline = Pipeline::new(
            uploads,
            audio,
            captioner.clone(),
            narrator,
            speaker.clone(),
            LanguageCode::default(),
        );

        Ok(Self {
            dir,
            captioner,
            generator,
            speaker,
            pipeline: Arc::new(pipeline),
        })
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.dir.path().join("audio")
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }
}
