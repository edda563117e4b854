//! Video download and transcript analysis collaborators.
//!
//! Both are hosted functions: the downloader turns a source URL into a video
//! file, and the analyzer turns that file into (among other things) a plain
//! text summary. Only their narrow request/response contracts live here.

use crate::config::AnalyzerOptions;
use crate::error::{PodcastError, Result};
use crate::hosted::HostedClient;
use std::path::{Path, PathBuf};
use tracing::info;

/// Hosted function that resolves a video URL to an MP4 file.
pub const DOWNLOAD_FUNCTION: &str = "sieve/youtube_to_mp4";

/// Hosted function that transcribes and summarizes a video file.
pub const ANALYZER_FUNCTION: &str = "sieve/video_transcript_analyzer";

/// A downloaded video: the service-side file URL handed to the analyzer and
/// the fetched local copy.
#[derive(Debug, Clone)]
pub struct DownloadedVideo {
    /// File URL on the hosted service.
    pub remote_url: String,
    /// Local path of the fetched copy.
    pub local_path: PathBuf,
}

/// Download the video behind `url` into `work_dir`.
///
/// # Errors
///
/// Returns [`PodcastError::Download`] when the job produces no file, and
/// propagates hosted-service failures.
pub async fn download_video(
    client: &HostedClient,
    url: &str,
    work_dir: &Path,
) -> Result<DownloadedVideo> {
    info!("downloading video: {url}");
    let outputs = client
        .run(DOWNLOAD_FUNCTION, serde_json::json!({ "url": url }))
        .await?;

    let remote_url = outputs
        .iter()
        .find_map(|output| output["url"].as_str())
        .ok_or_else(|| PodcastError::Download("download job returned no file".to_owned()))?
        .to_owned();

    let local_path = work_dir.join("source.mp4");
    client.fetch_to_file(&remote_url, &local_path).await?;
    info!("video downloaded to {}", local_path.display());

    Ok(DownloadedVideo {
        remote_url,
        local_path,
    })
}

/// Summarize a downloaded video via the transcript analyzer.
///
/// The analyzer emits a sequence of result objects; the first one carrying a
/// `summary` field wins. `max_summary_length` overrides the configured
/// default for this request.
///
/// # Errors
///
/// Returns [`PodcastError::Summarize`] when no result object carries a
/// summary, and propagates hosted-service failures.
pub async fn summarize_video(
    client: &HostedClient,
    video_url: &str,
    options: &AnalyzerOptions,
    max_summary_length: u32,
) -> Result<String> {
    let inputs = serde_json::json!({
        "file": {"url": video_url},
        "llm_backend": options.llm_backend,
        "generate_chapters": options.generate_chapters,
        "generate_highlights": options.generate_highlights,
        "max_summary_length": max_summary_length,
        "max_title_length": options.max_title_length,
        "num_tags": options.num_tags,
        "denoise_audio": options.denoise_audio,
        "use_vad": options.use_vad,
        "speed_boost": options.speed_boost,
        "highlight_search_phrases": options.highlight_search_phrases,
        "return_as_json_file": options.return_as_json_file,
    });

    let outputs = client.run(ANALYZER_FUNCTION, inputs).await?;
    let summary = outputs
        .iter()
        .find_map(|output| output["summary"].as_str())
        .ok_or_else(|| {
            PodcastError::Summarize("transcript analyzer returned no summary".to_owned())
        })?
        .to_owned();

    info!("video summary generated");
    Ok(summary)
}
