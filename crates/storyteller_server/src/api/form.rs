//! Multipart form parsing.

use super::ApiError;
use crate::{ImageUpload, ProcessOptions};
use axum::extract::Multipart;
use storyteller_core::NarrativeOverrides;

/// Fields of an image form. Unknown fields are ignored.
#[derive(Debug, Default)]
pub(crate) struct ImageForm {
    pub(crate) file: Option<ImageUpload>,
    pub(crate) options: ProcessOptions,
}

impl ImageForm {
    /// The uploaded file, required by every image endpoint.
    pub(crate) fn require_file(&mut self) -> Result<ImageUpload, ApiError> {
        self.file
            .take()
            .ok_or_else(|| ApiError::bad_request("No file provided"))
    }
}

/// Read every field of `multipart`.
pub(crate) async fn read_image_form(mut multipart: Multipart) -> Result<ImageForm, ApiError> {
    let mut form = ImageForm::default();
    let mut overrides = NarrativeOverrides::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), format!("Malformed form: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::new(e.status(), format!("Malformed form: {}", e.body_text())))?;
            form.file = Some(ImageUpload::new(filename, data.to_vec()));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::new(e.status(), format!("Malformed form: {}", e.body_text())))?;

        match name.as_str() {
            "prompt_template" => overrides.template = Some(value),
            "max_tokens" => overrides.max_tokens = parse_number(&name, &value)?,
            "temperature" => overrides.temperature = parse_number(&name, &value)?,
            "tts" => form.options.tts = parse_bool(&value)?,
            "language" => form.options.language = non_blank(value),
            "audio_filename" => form.options.audio_filename = non_blank(value),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    form.options.overrides = overrides;
    Ok(form)
}

/// A blank numeric field counts as omitted; anything else must parse.
fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<Option<T>, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ApiError::bad_request(format!("Invalid value for {}: {:?}", name, value)))
}

fn parse_bool(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ApiError::bad_request(format!(
            "Invalid value for tts: {:?}",
            other
        ))),
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
