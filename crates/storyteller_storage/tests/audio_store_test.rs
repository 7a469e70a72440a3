//! Tests for audio persistence, retrieval and cleanup.

use std::time::{Duration, SystemTime};
use storyteller_error::StorytellerErrorKind;
use storyteller_storage::{
    AudioPathErrorKind, AudioStore, StorageErrorKind, validate_audio_filename,
};
use tempfile::TempDir;

fn store() -> anyhow::Result<(TempDir, AudioStore)> {
    let dir = TempDir::new()?;
    let store = AudioStore::new(dir.path())?;
    Ok((dir, store))
}

#[tokio::test]
async fn test_save_generates_mp3_name() -> anyhow::Result<()> {
    let (_dir, store) = store()?;

    let clip = store.save(b"ID3audio", None).await?;

    assert!(clip.filename().starts_with("audio_"));
    assert!(clip.filename().ends_with(".mp3"));
    assert_eq!(*clip.size_bytes(), 8);
    assert_eq!(std::fs::read(clip.path())?, b"ID3audio");
    Ok(())
}

#[tokio::test]
async fn test_save_appends_extension_to_custom_name() -> anyhow::Result<()> {
    let (_dir, store) = store()?;

    let clip = store.save(b"x", Some("bedtime")).await?;
    assert_eq!(clip.filename(), "bedtime.mp3");

    let clip = store.save(b"x", Some("chapter1.mp3")).await?;
    assert_eq!(clip.filename(), "chapter1.mp3");
    Ok(())
}

#[tokio::test]
async fn test_save_rejects_escaping_custom_name() -> anyhow::Result<()> {
    let (dir, store) = store()?;

    let err = store.save(b"x", Some("../escape")).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StorytellerErrorKind::AudioPath(e) if matches!(e.kind, AudioPathErrorKind::Malformed(_))
    ));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_resolve_returns_saved_file() -> anyhow::Result<()> {
    let (_dir, store) = store()?;
    let clip = store.save(b"ID3", None).await?;

    let path = store.resolve_audio_path(clip.filename()).await?;

    assert_eq!(&path, clip.path());
    Ok(())
}

#[tokio::test]
async fn test_resolve_rejects_traversal_before_probing() -> anyhow::Result<()> {
    let (_dir, store) = store()?;

    for name in ["../secret.mp3", "sub/clip.mp3", "sub\\clip.mp3", "..mp3"] {
        let err = store.resolve_audio_path(name).await.unwrap_err();
        assert!(matches!(err.kind, AudioPathErrorKind::Malformed(_)), "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn test_resolve_rejects_non_mp3() -> anyhow::Result<()> {
    let (dir, store) = store()?;
    std::fs::write(dir.path().join("clip.wav"), b"RIFF")?;

    let err = store.resolve_audio_path("clip.wav").await.unwrap_err();

    assert!(matches!(err.kind, AudioPathErrorKind::UnsupportedFormat(_)));
    assert!(err.kind.to_string().contains("Invalid file format"));
    Ok(())
}

#[tokio::test]
async fn test_resolve_missing_file_is_not_found() -> anyhow::Result<()> {
    let (_dir, store) = store()?;

    let err = store.resolve_audio_path("missing.mp3").await.unwrap_err();

    assert_eq!(
        err.kind,
        AudioPathErrorKind::NotFound("missing.mp3".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_resolve_directory_is_not_a_file() -> anyhow::Result<()> {
    let (dir, store) = store()?;
    std::fs::create_dir(dir.path().join("adir.mp3"))?;

    let err = store.resolve_audio_path("adir.mp3").await.unwrap_err();

    assert!(matches!(err.kind, AudioPathErrorKind::NotAFile(_)));
    assert!(err.kind.to_string().contains("Invalid audio file"));
    Ok(())
}

#[test]
fn test_validate_checks_shape_before_extension() {
    let err = validate_audio_filename("../notes.txt").unwrap_err();
    assert!(matches!(err.kind, AudioPathErrorKind::Malformed(_)));

    let err = validate_audio_filename("notes.txt").unwrap_err();
    assert!(matches!(err.kind, AudioPathErrorKind::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_cleanup_removes_only_stale_mp3_files() -> anyhow::Result<()> {
    let (dir, store) = store()?;

    let stale = store.save(b"old", None).await?;
    let other = dir.path().join("keep.txt");
    std::fs::write(&other, b"not audio")?;

    let long_ago = SystemTime::now() - Duration::from_secs(48 * 3600);
    std::fs::File::options()
        .write(true)
        .open(stale.path())?
        .set_modified(long_ago)?;
    std::fs::File::options()
        .write(true)
        .open(&other)?
        .set_modified(long_ago)?;

    let fresh = store.save(b"new", None).await?;

    let removed = store
        .cleanup_older_than(Duration::from_secs(24 * 3600))
        .await?;

    assert_eq!(removed, 1);
    assert!(!stale.path().exists());
    assert!(fresh.path().exists());
    assert!(other.exists());
    Ok(())
}

#[tokio::test]
async fn test_cleanup_on_empty_directory() -> anyhow::Result<()> {
    let (_dir, store) = store()?;

    assert_eq!(store.cleanup_older_than(Duration::ZERO).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_save_never_replaces_existing_artifact() -> anyhow::Result<()> {
    let (dir, store) = store()?;
    store.save(b"FIRST-ARTIFACT", Some("story")).await?;

    let err = store.save(b"SECOND", Some("story.mp3")).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        StorytellerErrorKind::AudioPath(e) if e.kind == AudioPathErrorKind::AlreadyExists("story.mp3".to_string())
    ));
    assert_eq!(std::fs::read(dir.path().join("story.mp3"))?, b"FIRST-ARTIFACT");
    Ok(())
}

#[tokio::test]
async fn test_save_rejects_quotes_and_control_characters() -> anyhow::Result<()> {
    let (dir, store) = store()?;

    for name in ["a\"b", "line\nbreak", "tab\there.mp3"] {
        let err = store.save(b"x", Some(name)).await.unwrap_err();
        assert!(
            matches!(
                err.kind(),
                StorytellerErrorKind::AudioPath(e) if matches!(e.kind, AudioPathErrorKind::Malformed(_))
            ),
            "{name:?}"
        );
    }
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_read_returns_saved_bytes() -> anyhow::Result<()> {
    let (_dir, store) = store()?;
    let clip = store.save(b"ID3bytes", None).await?;

    let path = store.resolve_audio_path(clip.filename()).await?;

    assert_eq!(store.read(&path).await?, b"ID3bytes");
    Ok(())
}

#[tokio::test]
async fn test_read_vanished_file_is_storage_error() -> anyhow::Result<()> {
    let (_dir, store) = store()?;
    let clip = store.save(b"ID3", None).await?;
    let path = store.resolve_audio_path(clip.filename()).await?;
    std::fs::remove_file(&path)?;

    let err = store.read(&path).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        StorytellerErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::FileRead(_))
    ));
    Ok(())
}
