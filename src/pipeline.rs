//! Pipeline coordination: sequences the remote stages into one podcast.
//!
//! Control flow is strictly linear — download → summarize → dialogue →
//! voices → synthesis → concatenation — and each stage consumes only the
//! previous stage's output. The only concurrency is the synthesis fan-out
//! inside the dispatch stage.

use crate::audio::{Assembler, FfmpegAssembler};
use crate::config::PodcastConfig;
use crate::error::Result;
use crate::hosted::HostedClient;
use crate::llm::{AzureOpenAiClient, CompletionApi};
use crate::tts::{HostedSpeechService, SpeechService};
use crate::{dialogue, media, tts, voice};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// One podcast request.
#[derive(Debug, Clone)]
pub struct PodcastRequest {
    /// Source video URL.
    pub url: String,
    /// Name of the male speaker in the invented conversation.
    pub male_name: String,
    /// Name of the female speaker in the invented conversation.
    pub female_name: String,
    /// Maximum summary length, in sentences.
    pub max_summary_length: u32,
}

impl PodcastRequest {
    /// A request for `url` with the default speakers and summary length.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            male_name: "sam".to_owned(),
            female_name: "jane".to_owned(),
            max_summary_length: 10,
        }
    }
}

/// The assembled pipeline: configuration plus one handle per collaborator.
pub struct PodcastPipeline {
    config: PodcastConfig,
    hosted: Arc<HostedClient>,
    llm: Arc<dyn CompletionApi>,
    speech: Arc<dyn SpeechService>,
    assembler: Arc<dyn Assembler>,
    work_dir: PathBuf,
}

impl PodcastPipeline {
    /// Build the pipeline with its production collaborators and a fresh
    /// work directory for intermediate files.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the work directory cannot be created.
    pub fn new(config: PodcastConfig) -> Result<Self> {
        let work_dir = std::env::temp_dir().join(format!("vodcast-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&work_dir)?;

        let hosted = Arc::new(HostedClient::new(&config.hosted));
        let llm = Arc::new(AzureOpenAiClient::new(&config.azure));
        let speech = Arc::new(HostedSpeechService::new(
            Arc::clone(&hosted),
            config.synthesis.clone(),
            work_dir.clone(),
        ));

        Ok(Self {
            config,
            hosted,
            llm,
            speech,
            assembler: Arc::new(FfmpegAssembler),
            work_dir,
        })
    }

    /// Build the pipeline with explicit collaborators. Used by tests to
    /// substitute deterministic stubs.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the work directory cannot be created.
    pub fn with_components(
        config: PodcastConfig,
        llm: Arc<dyn CompletionApi>,
        speech: Arc<dyn SpeechService>,
        assembler: Arc<dyn Assembler>,
        work_dir: PathBuf,
    ) -> Result<Self> {
        std::fs::create_dir_all(&work_dir)?;
        let hosted = Arc::new(HostedClient::new(&config.hosted));
        Ok(Self {
            config,
            hosted,
            llm,
            speech,
            assembler,
            work_dir,
        })
    }

    /// Directory intermediate files (video, per-turn clips) are written to.
    #[must_use]
    pub fn work_dir(&self) -> &PathBuf {
        &self.work_dir
    }

    /// Run the full pipeline for one request and return the podcast path.
    ///
    /// # Errors
    ///
    /// The first stage failure propagates; no partial podcast is produced.
    pub async fn run(&self, request: &PodcastRequest) -> Result<PathBuf> {
        let video = media::download_video(&self.hosted, &request.url, &self.work_dir).await?;
        let summary = media::summarize_video(
            &self.hosted,
            &video.remote_url,
            &self.config.analyzer,
            request.max_summary_length,
        )
        .await?;
        self.run_from_summary(&summary, request).await
    }

    /// Run the generation half of the pipeline from an existing summary:
    /// dialogue, structuring, voices, synthesis, concatenation.
    ///
    /// # Errors
    ///
    /// The first stage failure propagates; no partial podcast is produced.
    pub async fn run_from_summary(
        &self,
        summary: &str,
        request: &PodcastRequest,
    ) -> Result<PathBuf> {
        let turns = dialogue::generate_structured_conversation(
            self.llm.as_ref(),
            summary,
            &request.male_name,
            &request.female_name,
        )
        .await?;

        let voiced = voice::assign_voices(turns, &request.male_name, &self.config.synthesis);
        let jobs = tts::submit_all(self.speech.as_ref(), &voiced);
        let clips = tts::collect_all(jobs).await?;

        let output = self
            .assembler
            .concatenate(&clips, &self.config.output_path)
            .await?;
        info!("podcast written to {}", output.display());
        Ok(output)
    }
}
