//! Response shapes of the image-to-text task.

use serde::Deserialize;

/// One caption candidate.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(crate) struct GeneratedText {
    pub(crate) generated_text: String,
}

/// The API answers with a list for image-to-text, but some deployments
/// return a bare object.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum CaptionResponse {
    List(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl CaptionResponse {
    /// The first caption, trimmed, if any.
    pub(crate) fn into_caption(self) -> Option<String> {
        let first = match self {
            Self::List(items) => items.into_iter().next(),
            Self::Single(item) => Some(item),
        };
        first
            .map(|item| item.generated_text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}

/// Error body, e.g. `{"error": "Model is currently loading"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}
