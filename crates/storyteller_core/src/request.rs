//! Request type for text generation.

use crate::ChatMessage;
use serde::{Deserialize, Serialize};

/// A fully resolved completion request.
///
/// Every parameter is concrete here; fallback to service defaults happens
/// before the request is built.
///
/// # Examples
///
/// ```
/// use storyteller_core::{ChatMessage, CompletionRequest};
///
/// let request = CompletionRequest::builder()
///     .messages(vec![ChatMessage::system("Be brief"), ChatMessage::user("Hi")])
///     .max_tokens(50u32)
///     .temperature(0.0f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.n(), 1);
/// assert_eq!(request.user_prompt(), Some("Hi"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Conversation messages, system instruction first
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Number of completions requested
    #[builder(default = "1")]
    n: u32,
}

impl CompletionRequest {
    /// Creates a new request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }

    /// Content of the last user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::Role::User)
            .map(|m| m.content.as_str())
    }
}
