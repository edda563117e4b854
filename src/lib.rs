//! Vodcast: turns a video URL into a two-voice commentary podcast.
//!
//! Every computational step runs on a remote service; the local pipeline
//! sequences them:
//!
//! Download → Summarize → Dialogue (LLM) → Structure (schema call) →
//! Voice assignment → TTS jobs → ffmpeg concatenation
//!
//! # Architecture
//!
//! - **Hosted functions**: video download, transcript analysis, and speech
//!   synthesis run as jobs on a remote queue ([`hosted`], [`media`], [`tts`])
//! - **Completion gateway**: Azure OpenAI chat completions, free-form and
//!   schema-constrained ([`llm`], [`prompt`])
//! - **Structuring**: typed dialogue turns with post-decode validation
//!   ([`dialogue`])
//! - **Assembly**: per-turn clips concatenated losslessly with ffmpeg
//!   ([`audio`])
//!
//! Turn order established at structuring time is preserved through voice
//! assignment, job submission, and collection, and determines concatenation
//! order in the final artifact.

pub mod audio;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod hosted;
pub mod llm;
pub mod media;
pub mod pipeline;
pub mod prompt;
pub mod tts;
pub mod voice;

pub use config::PodcastConfig;
pub use error::{PodcastError, Result};
pub use pipeline::{PodcastPipeline, PodcastRequest};
