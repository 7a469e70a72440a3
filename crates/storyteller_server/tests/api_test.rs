//! Router tests driven through `tower::ServiceExt::oneshot`.

mod test_utils;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use storyteller_error::{CaptionErrorKind, SpeechErrorKind};
use storyteller_server::{AppState, create_router};
use test_utils::{Fixture, MockCaptioner, MockSpeaker, MockTextGenerator};
use tower::ServiceExt;

const BOUNDARY: &str = "storyteller-test-boundary";
const MAX_UPLOAD: usize = 1024 * 1024;

fn router(fixture: &Fixture) -> Router {
    create_router(AppState::new(fixture.pipeline.clone()), MAX_UPLOAD)
}

/// Multipart body with an optional file part and any number of text parts.
fn multipart_body(filename: Option<&str>, data: &[u8], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(filename) = filename {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

fn error_message(body: &Value) -> &str {
    body["detail"]["error"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;

    let response = router(&fixture).oneshot(get("/health")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_upload_returns_file_path() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(Some("photo.JPG"), b"jpeg", &[]);

    let response = router(&fixture).oneshot(post("/upload/", body)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await?;
    let path = json["file_path"].as_str().unwrap_or_default();
    assert!(path.ends_with(".jpg"), "{path}");
    assert!(std::path::Path::new(path).exists());
    Ok(())
}

#[tokio::test]
async fn test_upload_rejects_disallowed_type() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(Some("notes.txt"), b"hello", &[]);

    let response = router(&fixture).oneshot(post("/upload/", body)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(json["detail"].as_str().unwrap_or_default().contains("not allowed"));
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_bad_request() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(None, b"", &[("tts", "true")]);

    let response = router(&fixture)
        .oneshot(post("/process_with_narrative/", body))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_process_returns_caption() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(Some("scene.png"), b"png", &[]);

    let response = router(&fixture).oneshot(post("/process/", body)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await?;
    assert_eq!(json["caption"], "a red square");
    assert!(json.get("narrative").is_none());
    assert_eq!(fixture.generator.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_process_caption_failure_has_plain_detail() -> anyhow::Result<()> {
    let fixture = Fixture::with(
        MockCaptioner::new_error(CaptionErrorKind::Inference {
            status: 400,
            message: "cannot identify image file".into(),
        }),
        MockTextGenerator::new_success("unused"),
        MockSpeaker::new_success(b"ID3"),
    )?;
    let body = multipart_body(Some("corrupted.jpg"), b"not a jpeg", &[]);

    let response = router(&fixture).oneshot(post("/process/", body)).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await?;
    let detail = json["detail"].as_str().unwrap_or_default();
    assert!(detail.starts_with("Failed to process image"), "{detail}");
    Ok(())
}

#[tokio::test]
async fn test_process_with_narrative_without_tts() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(
        Some("scene.png"),
        b"png",
        &[("temperature", "0"), ("max_tokens", "120")],
    );

    let response = router(&fixture)
        .oneshot(post("/process_with_narrative/", body))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await?;
    assert_eq!(json["caption"], "a red square");
    assert_eq!(json["narrative"], "The square waited.");
    assert!(json.get("audio_file").is_none());

    let request = fixture.generator.last_request().expect("generator called");
    assert_eq!(*request.temperature(), 0.0);
    assert_eq!(*request.max_tokens(), 120);
    Ok(())
}

#[tokio::test]
async fn test_process_with_narrative_and_tts_then_download() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let app = router(&fixture);
    let body = multipart_body(Some("scene.png"), b"png", &[("tts", "true")]);

    let response = app
        .clone()
        .oneshot(post("/process_with_narrative/", body))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await?;
    let audio_file = json["audio_file"].as_str().unwrap_or_default().to_string();
    let name = std::path::Path::new(&audio_file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    assert!(name.starts_with("audio_") && name.ends_with(".mp3"), "{name}");

    let response = app.oneshot(get(&format!("/audio/{name}"))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"{name}\"").as_str()
    );
    let bytes = response.into_body().collect().await?.to_bytes();
    assert_eq!(&bytes[..], b"ID3fake");
    Ok(())
}

#[tokio::test]
async fn test_invalid_number_is_bad_request() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(Some("scene.png"), b"png", &[("max_tokens", "lots")]);

    let response = router(&fixture)
        .oneshot(post("/process_with_narrative/", body))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_invalid_language_is_server_error() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let body = multipart_body(
        Some("scene.png"),
        b"png",
        &[("tts", "true"), ("language", "invalid_lang")],
    );

    let response = router(&fixture)
        .oneshot(post("/process_with_narrative/", body))
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await?;
    assert!(error_message(&json).contains("invalid_lang"));
    Ok(())
}

#[tokio::test]
async fn test_speech_backend_failure_is_server_error() -> anyhow::Result<()> {
    let fixture = Fixture::with(
        MockCaptioner::new_success("a lighthouse"),
        MockTextGenerator::new_success("It was dark."),
        MockSpeaker::new_error(SpeechErrorKind::Http("timed out".into())),
    )?;
    let body = multipart_body(Some("scene.png"), b"png", &[("tts", "true")]);

    let response = router(&fixture)
        .oneshot(post("/process_with_narrative/", body))
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await?;
    assert!(error_message(&json).starts_with("Failed to convert text to speech"));
    Ok(())
}

#[tokio::test]
async fn test_audio_traversal_is_bad_request() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    std::fs::write(fixture.dir.path().join("secret.mp3"), b"secret")?;

    let response = router(&fixture)
        .oneshot(get("/audio/..%2Fsecret.mp3"))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(error_message(&json).starts_with("Invalid file format"));
    Ok(())
}

#[tokio::test]
async fn test_audio_wrong_extension_is_bad_request() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;

    let response = router(&fixture).oneshot(get("/audio/clip.wav")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(error_message(&json).contains("MP3"));
    Ok(())
}

#[tokio::test]
async fn test_audio_missing_is_not_found() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;

    let response = router(&fixture).oneshot(get("/audio/missing.mp3")).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await?;
    assert!(error_message(&json).contains("not found"));
    Ok(())
}

#[tokio::test]
async fn test_audio_directory_is_bad_request() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    std::fs::create_dir(fixture.audio_dir().join("adir.mp3"))?;

    let response = router(&fixture).oneshot(get("/audio/adir.mp3")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert!(error_message(&json).contains("Invalid audio file"));
    Ok(())
}

#[tokio::test]
async fn test_oversized_body_is_rejected() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let app = create_router(AppState::new(fixture.pipeline.clone()), 64);
    let big = vec![0u8; 4096];
    let body = multipart_body(Some("scene.png"), &big, &[]);

    let response = app.oneshot(post("/upload/", body)).await?;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    Ok(())
}

#[tokio::test]
async fn test_reused_audio_filename_is_conflict() -> anyhow::Result<()> {
    let fixture = Fixture::happy()?;
    let app = router(&fixture);
    let fields = [("tts", "true"), ("audio_filename", "bedtime")];

    let first = app
        .clone()
        .oneshot(post(
            "/process_with_narrative/",
            multipart_body(Some("scene.png"), b"png", &fields),
        ))
        .await?;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post(
            "/process_with_narrative/",
            multipart_body(Some("scene.png"), b"png", &fields),
        ))
        .await?;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = json_body(second).await?;
    assert!(error_message(&json).contains("already exists"));
    Ok(())
}
