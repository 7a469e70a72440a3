//! Test utilities for narrative tests.
//!
//! Provides a scripted `TextGenerator` that records every request it sees.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyteller_core::CompletionRequest;
use storyteller_error::{ModelError, ModelErrorKind};
use storyteller_interface::TextGenerator;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this text
    Success(String),
    /// Fail with this kind
    Error(ModelErrorKind),
}

/// Deterministic stand-in for a hosted text-generation API.
#[derive(Debug)]
pub struct MockTextGenerator {
    behavior: MockBehavior,
    call_count: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockTextGenerator {
    /// Mock that always returns `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Success(text.into()))
    }

    /// Mock that always fails with `kind`.
    pub fn new_error(kind: ModelErrorKind) -> Self {
        Self::new(MockBehavior::Error(kind))
    }

    fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of `complete` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(ModelError::new(kind.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
