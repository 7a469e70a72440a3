//! Route handlers.

use super::form::read_image_form;
use super::{ApiError, AppState, DetailShape};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use storyteller_storage::AUDIO_MIME_TYPE;
use tracing::instrument;

#[derive(Debug, Serialize)]
pub(crate) struct UploadResponse {
    file_path: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CaptionResponse {
    file_path: String,
    caption: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NarrativeResponse {
    file_path: String,
    caption: String,
    narrative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_file: Option<String>,
}

/// Health check endpoint.
pub(crate) async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

#[instrument(skip_all)]
pub(crate) async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let result: Result<_, ApiError> = async move {
        let file = read_image_form(multipart).await?.require_file()?;
        Ok(state.pipeline().upload_only(file).await?)
    }
    .await;
    let stored = result.map_err(|e| e.with_shape(DetailShape::Plain))?;

    Ok(Json(UploadResponse {
        file_path: stored.path().display().to_string(),
    }))
}

#[instrument(skip_all)]
pub(crate) async fn process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CaptionResponse>, ApiError> {
    let result: Result<_, ApiError> = async move {
        let file = read_image_form(multipart).await?.require_file()?;
        Ok(state.pipeline().caption_only(file).await?)
    }
    .await;
    let outcome = result.map_err(|e| e.with_shape(DetailShape::Plain))?;

    Ok(Json(CaptionResponse {
        file_path: outcome.file_path().display().to_string(),
        caption: outcome.caption().clone(),
    }))
}

#[instrument(skip_all)]
pub(crate) async fn process_with_narrative(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<NarrativeResponse>, ApiError> {
    let mut form = read_image_form(multipart).await?;
    let file = form.require_file()?;
    let outcome = state.pipeline().process(file, &form.options).await?;

    Ok(Json(NarrativeResponse {
        file_path: outcome.file_path().display().to_string(),
        caption: outcome.caption().clone(),
        narrative: outcome.narrative().clone(),
        audio_file: outcome
            .audio_file()
            .as_ref()
            .map(|path| path.display().to_string()),
    }))
}

#[instrument(skip(state))]
pub(crate) async fn get_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.pipeline().audio_store();
    let path = store.resolve_audio_path(&filename).await?;
    let bytes = store.read(&path).await?;

    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, AUDIO_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
