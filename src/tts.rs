//! Speech synthesis job dispatch.
//!
//! Fire-and-collect: one synthesis job per dialogue turn is submitted
//! without waiting, then results are collected in dialogue order. Collection
//! order equals submission order equals turn order — the final concatenation
//! depends on exactly this guarantee. Fan-out is unbounded: every turn's job
//! is in flight at once on the remote side.

use crate::config::SynthesisConfig;
use crate::error::{PodcastError, Result};
use crate::hosted::HostedClient;
use crate::voice::VoicedTurn;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Hosted speech-synthesis function.
pub const TTS_FUNCTION: &str = "sieve/tts";

/// Handle to an in-flight synthesis job.
///
/// Created at submission, resolved exactly once, then discarded.
pub struct SpeechJob {
    handle: tokio::task::JoinHandle<Result<PathBuf>>,
}

impl SpeechJob {
    /// Wrap a future driving one synthesis job. The future starts running
    /// immediately; submission itself never blocks.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<PathBuf>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Block until the job finishes and return the synthesized clip path.
    ///
    /// # Errors
    ///
    /// Propagates the job's own error, or [`PodcastError::Tts`] when the
    /// driving task panicked.
    pub async fn resolve(self) -> Result<PathBuf> {
        self.handle
            .await
            .map_err(|e| PodcastError::Tts(format!("synthesis task panicked: {e}")))?
    }
}

/// Speech synthesis capability: one non-blocking job per turn.
///
/// A trait seam so ordering tests can substitute jobs with controlled
/// completion latency.
pub trait SpeechService: Send + Sync {
    /// Submit one synthesis job. `index` is the turn's position in the
    /// conversation and names the output clip.
    fn submit(&self, index: usize, voice: &str, text: &str) -> SpeechJob;
}

/// Synthesis backed by the hosted TTS function.
pub struct HostedSpeechService {
    client: Arc<HostedClient>,
    synthesis: SynthesisConfig,
    work_dir: PathBuf,
}

impl HostedSpeechService {
    /// Create a service writing per-turn clips into `work_dir`.
    #[must_use]
    pub fn new(client: Arc<HostedClient>, synthesis: SynthesisConfig, work_dir: PathBuf) -> Self {
        Self {
            client,
            synthesis,
            work_dir,
        }
    }
}

impl SpeechService for HostedSpeechService {
    fn submit(&self, index: usize, voice: &str, text: &str) -> SpeechJob {
        let client = Arc::clone(&self.client);
        let synthesis = self.synthesis.clone();
        let voice = voice.to_owned();
        let text = text.to_owned();
        let dest = self.work_dir.join(format!("turn_{index:03}.wav"));

        SpeechJob::spawn(async move {
            let inputs = serde_json::json!({
                "voice": voice,
                "text": text,
                "reference_audio": {"url": synthesis.reference_audio_url},
                "emotion": synthesis.emotion,
                "pace": synthesis.pace,
                "stability": synthesis.stability,
                "style": synthesis.style,
                "word_timestamps": synthesis.word_timestamps,
            });

            let outputs = client.run(TTS_FUNCTION, inputs).await?;
            let url = outputs
                .iter()
                .find_map(|output| output["url"].as_str())
                .ok_or_else(|| {
                    PodcastError::Tts(format!("synthesis job for turn {index} returned no audio"))
                })?;

            client.fetch_to_file(url, &dest).await?;
            Ok(dest)
        })
    }
}

/// Submit one synthesis job per voiced turn, preserving turn order.
#[must_use]
pub fn submit_all(service: &dyn SpeechService, turns: &[VoicedTurn]) -> Vec<SpeechJob> {
    let jobs: Vec<SpeechJob> = turns
        .iter()
        .enumerate()
        .map(|(index, voiced)| {
            debug!(
                "submitting turn {index} ({} chars, voice {})",
                voiced.turn.dialogue.len(),
                voiced.voice
            );
            service.submit(index, &voiced.voice, &voiced.turn.dialogue)
        })
        .collect();
    info!("submitted {} synthesis jobs", jobs.len());
    jobs
}

/// Collect job results in submission order.
///
/// The first failure propagates immediately; jobs submitted after it are
/// dropped without remote cancellation.
///
/// # Errors
///
/// Propagates the first failing job's error.
pub async fn collect_all(jobs: Vec<SpeechJob>) -> Result<Vec<PathBuf>> {
    let mut clips = Vec::with_capacity(jobs.len());
    for job in jobs {
        clips.push(job.resolve().await?);
    }
    Ok(clips)
}
