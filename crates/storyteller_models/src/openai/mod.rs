//! OpenAI chat completions integration.

mod client;
mod config;
mod dto;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
pub use dto::{ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, Usage};
