//! Error types for the podcast pipeline.

/// Top-level error type for the video-to-podcast system.
#[derive(Debug, thiserror::Error)]
pub enum PodcastError {
    /// Configuration error (missing or empty environment variable).
    #[error("config error: {0}")]
    Config(String),

    /// Hosted media-function job error (push, poll, or output fetch).
    #[error("hosted function error: {0}")]
    Hosted(String),

    /// Video download error.
    #[error("download error: {0}")]
    Download(String),

    /// Transcript analysis / summarization error.
    #[error("summarize error: {0}")]
    Summarize(String),

    /// Language model completion error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Schema-constrained completion output failed to decode or validate.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// Speech synthesis error.
    #[error("TTS error: {0}")]
    Tts(String),

    /// Audio concatenation error.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PodcastError>;
