//! Service configuration.
//!
//! Configuration is loaded with the following precedence (lowest to highest):
//! 1. Bundled defaults (include_str! from storyteller.toml)
//! 2. User config in home directory (~/.config/storyteller/storyteller.toml)
//! 3. User config in current directory (./storyteller.toml)
//! 4. An explicit file passed on the command line
//! 5. Environment variables such as `STORYTELLER_SPEECH__LANGUAGE=fr`
//!
//! API keys left unset fall back to `OPENAI_API_KEY` and
//! `HUGGINGFACE_API_KEY`.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storyteller_core::{GenerationParams, LanguageCode};
use storyteller_error::{ConfigError, ConfigErrorKind, StorytellerResult};
use storyteller_models::{GoogleTtsConfig, HuggingFaceConfig, OpenAiConfig};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../storyteller.toml");

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "STORYTELLER";

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Largest accepted multipart body in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Artifact directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where uploaded images are written
    pub upload_dir: PathBuf,
    /// Where synthesized audio is written and served from
    pub audio_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("data/sample_images"),
            audio_dir: PathBuf::from("data/audio"),
        }
    }
}

/// Text generation backend and narrative defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSection {
    /// Base URL of an OpenAI-compatible server
    pub base_url: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Default token limit for narratives
    pub max_tokens: u32,
    /// Default sampling temperature
    pub temperature: f32,
    /// Default prompt template
    pub prompt_template: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiSection {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            base_url: OpenAiConfig::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: OpenAiConfig::DEFAULT_MODEL.to_string(),
            max_tokens: *params.max_tokens(),
            temperature: *params.temperature(),
            prompt_template: params.template().clone(),
            timeout_secs: OpenAiConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Image captioning backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptioningSection {
    /// Base URL of the inference API
    pub base_url: String,
    /// API token
    pub api_key: Option<String>,
    /// Image-to-text model
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CaptioningSection {
    fn default() -> Self {
        Self {
            base_url: HuggingFaceConfig::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: HuggingFaceConfig::DEFAULT_MODEL.to_string(),
            timeout_secs: HuggingFaceConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Speech synthesis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSection {
    /// Base URL of the TTS endpoint
    pub base_url: String,
    /// Language used when a request does not name one
    pub language: String,
    /// Per-chunk request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SpeechSection {
    fn default() -> Self {
        Self {
            base_url: GoogleTtsConfig::DEFAULT_BASE_URL.to_string(),
            language: LanguageCode::default().to_string(),
            timeout_secs: GoogleTtsConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Audio retention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Audio files older than this are deleted by cleanup
    pub max_age_hours: u64,
    /// Seconds between cleanup runs; 0 disables the task
    pub cleanup_interval_secs: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            max_age_hours: 24,
            cleanup_interval_secs: 3600,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g., "info", "storyteller_server=debug")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete service configuration.
///
/// # Example
///
/// ```no_run
/// use storyteller_server::AppConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AppConfig::load(None)?;
/// config.validate()?;
/// println!("listening on {}:{}", config.server.host, config.server.port);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Artifact directories
    pub storage: StorageConfig,
    /// Text generation
    pub openai: OpenAiSection,
    /// Image captioning
    pub captioning: CaptioningSection,
    /// Speech synthesis
    pub speech: SpeechSection,
    /// Audio retention
    pub audio: AudioConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// `extra` is an optional file that overrides the discovered ones but
    /// not the environment.
    ///
    /// # Errors
    ///
    /// Returns error if a layer cannot be read or the result does not
    /// deserialize.
    #[instrument]
    pub fn load(extra: Option<&Path>) -> StorytellerResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyteller/storyteller.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyteller").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config = Self::build(builder)?;
        config.apply_key_fallbacks();
        Ok(config)
    }

    /// Parse a single TOML document layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the document does not parse or deserialize.
    pub fn from_toml_str(toml: &str) -> StorytellerResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StorytellerResult<Self> {
        let config = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Deserialize(e.to_string())))?;
        Ok(config)
    }

    fn apply_key_fallbacks(&mut self) {
        if self.openai.api_key.is_none() {
            self.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.captioning.api_key.is_none() {
            self.captioning.api_key = std::env::var("HUGGINGFACE_API_KEY").ok();
        }
    }

    /// Check values that deserialize fine but cannot run.
    ///
    /// # Errors
    ///
    /// Returns error naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::new(ConfigErrorKind::invalid(
                "server.port",
                "must not be 0",
            )));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::new(ConfigErrorKind::invalid(
                "server.max_upload_bytes",
                "must not be 0",
            )));
        }

        self.generation_params()
            .validate()
            .map_err(|e| ConfigError::new(ConfigErrorKind::invalid("openai", e)))?;

        self.default_language()?;
        Ok(())
    }

    /// Narrative defaults from the `openai` section.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::builder()
            .template(self.openai.prompt_template.clone())
            .max_tokens(self.openai.max_tokens)
            .temperature(self.openai.temperature)
            .build()
    }

    /// Parsed `speech.language`.
    ///
    /// # Errors
    ///
    /// Returns error if the configured code is malformed.
    pub fn default_language(&self) -> Result<LanguageCode, ConfigError> {
        LanguageCode::parse(&self.speech.language)
            .map_err(|e| ConfigError::new(ConfigErrorKind::invalid("speech.language", e)))
    }

    /// Client settings for the text generation backend.
    pub fn openai_config(&self) -> OpenAiConfig {
        let mut config = OpenAiConfig::new(&self.openai.base_url, &self.openai.model)
            .with_timeout_secs(self.openai.timeout_secs);
        if let Some(key) = &self.openai.api_key {
            config = config.with_api_key(key);
        }
        config
    }

    /// Client settings for the captioning backend.
    pub fn captioning_config(&self) -> HuggingFaceConfig {
        let mut config = HuggingFaceConfig::new(&self.captioning.base_url, &self.captioning.model)
            .with_timeout_secs(self.captioning.timeout_secs);
        if let Some(key) = &self.captioning.api_key {
            config = config.with_api_key(key);
        }
        config
    }

    /// Client settings for the speech backend.
    pub fn speech_config(&self) -> GoogleTtsConfig {
        GoogleTtsConfig::new(&self.speech.base_url).with_timeout_secs(self.speech.timeout_secs)
    }
}
