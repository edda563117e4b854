//! Configuration for the podcast pipeline.
//!
//! All credentials come from the environment and are validated
//! present-and-non-empty before any pipeline work begins. The remaining
//! settings are the fixed constants every synthesis and analysis job is
//! submitted with.

use crate::error::{PodcastError, Result};
use std::path::PathBuf;

/// Default endpoint for the hosted media-function service.
const DEFAULT_HOSTED_API_URL: &str = "https://mango.sievedata.com";

/// Default interval between job-status polls, in milliseconds.
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Reference audio sample supplied to every synthesis job, independent of
/// dialogue content.
const REFERENCE_AUDIO_URL: &str = "https://storage.googleapis.com/sieve-prod-us-central1-public-file-upload-bucket/482b91af-e737-48ea-b76d-4bb22d77fb56/caa0664b-f530-4406-858a-99837eb4b354-input-reference_audio.wav";

/// Azure OpenAI connection details, read from the environment.
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    /// API key (`AZURE_OPENAI_API_KEY`).
    pub api_key: String,
    /// API version query parameter (`AZURE_API_VERSION`).
    pub api_version: String,
    /// Resource endpoint URL (`AZURE_OPEN_API_URL`).
    pub endpoint: String,
    /// Deployment name the chat model is served under (`AZURE_DEPLOYMENT_NAME`).
    pub deployment: String,
}

impl AzureOpenAiConfig {
    /// Read and validate the Azure OpenAI environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastError::Config`] naming the first variable that is
    /// missing or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require_env("AZURE_OPENAI_API_KEY")?,
            api_version: require_env("AZURE_API_VERSION")?,
            endpoint: require_env("AZURE_OPEN_API_URL")?,
            deployment: require_env("AZURE_DEPLOYMENT_NAME")?,
        })
    }
}

/// Hosted media-function service (download / transcript analysis / TTS jobs).
#[derive(Debug, Clone)]
pub struct HostedServiceConfig {
    /// Service base URL (`SIEVE_API_URL`, optional).
    pub api_url: String,
    /// Service API key (`SIEVE_API_KEY`).
    pub api_key: String,
    /// Interval between job-status polls, in milliseconds.
    pub poll_interval_ms: u64,
}

impl HostedServiceConfig {
    /// Read and validate the hosted-service environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastError::Config`] when `SIEVE_API_KEY` is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        let api_url = match std::env::var("SIEVE_API_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_HOSTED_API_URL.to_owned(),
        };
        Ok(Self {
            api_url,
            api_key: require_env("SIEVE_API_KEY")?,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        })
    }
}

/// Voice and prosody settings applied to every synthesis job.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Voice id used for turns spoken by the male speaker.
    pub male_voice: String,
    /// Voice id used for all other turns.
    pub female_voice: String,
    /// URL of the fixed reference audio sample.
    pub reference_audio_url: String,
    /// Emotion preset.
    pub emotion: String,
    /// Speaking pace preset.
    pub pace: String,
    /// Voice stability, 0–1.
    pub stability: f64,
    /// Style exaggeration, 0–1.
    pub style: f64,
    /// Whether to request word-level timestamps.
    pub word_timestamps: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            male_voice: "cartesia-friendly-reading-man".to_owned(),
            female_voice: "cartesia-australian-woman".to_owned(),
            reference_audio_url: REFERENCE_AUDIO_URL.to_owned(),
            emotion: "normal".to_owned(),
            pace: "normal".to_owned(),
            stability: 0.9,
            style: 0.4,
            word_timestamps: false,
        }
    }
}

/// Options bundle for the transcript analyzer function.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Model backend the analyzer runs its own summarization with.
    pub llm_backend: String,
    /// Whether to generate chapter markers.
    pub generate_chapters: bool,
    /// Whether to generate highlight clips.
    pub generate_highlights: bool,
    /// Maximum summary length, in sentences.
    pub max_summary_length: u32,
    /// Maximum generated title length.
    pub max_title_length: u32,
    /// Number of tags to generate.
    pub num_tags: u32,
    /// Whether to denoise audio before transcription.
    pub denoise_audio: bool,
    /// Whether to run voice activity detection.
    pub use_vad: bool,
    /// Whether to trade accuracy for speed.
    pub speed_boost: bool,
    /// Phrase used to rank highlight candidates.
    pub highlight_search_phrases: String,
    /// Whether results come back as a JSON file instead of inline objects.
    pub return_as_json_file: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            llm_backend: "gpt-4o-2024-08-06".to_owned(),
            generate_chapters: false,
            generate_highlights: false,
            max_summary_length: 10,
            max_title_length: 10,
            num_tags: 5,
            denoise_audio: false,
            use_vad: false,
            speed_boost: true,
            highlight_search_phrases: "Most interesting".to_owned(),
            return_as_json_file: false,
        }
    }
}

/// Top-level configuration, constructed once at startup and passed by
/// reference into each collaborator.
#[derive(Debug, Clone)]
pub struct PodcastConfig {
    /// Azure OpenAI connection details.
    pub azure: AzureOpenAiConfig,
    /// Hosted media-function service details.
    pub hosted: HostedServiceConfig,
    /// Voice and prosody settings.
    pub synthesis: SynthesisConfig,
    /// Transcript analyzer options.
    pub analyzer: AnalyzerOptions,
    /// Path the final podcast WAV is written to.
    pub output_path: PathBuf,
}

impl PodcastConfig {
    /// Build the full configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastError::Config`] for the first required variable that
    /// is missing or empty. No collaborator is constructed before this
    /// succeeds.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            azure: AzureOpenAiConfig::from_env()?,
            hosted: HostedServiceConfig::from_env()?,
            synthesis: SynthesisConfig::default(),
            analyzer: AnalyzerOptions::default(),
            output_path: PathBuf::from("output.wav"),
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PodcastError::Config(format!(
            "{name} environment variable not set"
        ))),
    }
}
