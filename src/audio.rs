//! Audio assembly: lossless concatenation of per-turn clips.
//!
//! The final podcast is produced by ffmpeg's concat filter, taking each
//! input as an audio-only stream and writing one PCM16 little-endian WAV.
//! Any ffmpeg failure is fatal: stderr is captured, logged, and embedded in
//! the error.

use crate::error::{PodcastError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Clip concatenation capability.
///
/// A trait seam so pipeline tests can observe the clip list without running
/// ffmpeg.
#[async_trait]
pub trait Assembler: Send + Sync {
    /// Concatenate `clips` in list order into one WAV at `output`.
    async fn concatenate(&self, clips: &[PathBuf], output: &Path) -> Result<PathBuf>;
}

/// ffmpeg-backed assembler.
pub struct FfmpegAssembler;

#[async_trait]
impl Assembler for FfmpegAssembler {
    async fn concatenate(&self, clips: &[PathBuf], output: &Path) -> Result<PathBuf> {
        let args = concat_args(clips, output)?;
        debug!("ffmpeg {}", args.join(" "));

        let result = tokio::process::Command::new("ffmpeg")
            .args(&args)
            .output()
            .await
            .map_err(|e| PodcastError::Assembly(format!("failed to spawn ffmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            error!("ffmpeg failed: {stderr}");
            return Err(PodcastError::Assembly(format!(
                "ffmpeg exited with {}: {stderr}",
                result.status
            )));
        }

        info!("concatenated {} clips into {}", clips.len(), output.display());
        Ok(output.to_path_buf())
    }
}

/// Build the ffmpeg argument list for concatenating `clips` into `output`.
///
/// One `-i` per clip, the concat filter with video disabled and one audio
/// stream, PCM 16-bit signed little-endian output, overwrite enabled.
///
/// # Errors
///
/// Returns [`PodcastError::Assembly`] for an empty clip list — an empty
/// playlist cannot be concatenated.
pub fn concat_args(clips: &[PathBuf], output: &Path) -> Result<Vec<String>> {
    if clips.is_empty() {
        return Err(PodcastError::Assembly(
            "cannot concatenate an empty clip list".to_owned(),
        ));
    }

    let mut args = vec!["-y".to_owned()];
    for clip in clips {
        args.push("-i".to_owned());
        args.push(clip.display().to_string());
    }
    args.push("-filter_complex".to_owned());
    args.push(format!("concat=n={}:v=0:a=1", clips.len()));
    args.push("-acodec".to_owned());
    args.push("pcm_s16le".to_owned());
    args.push("-f".to_owned());
    args.push("wav".to_owned());
    args.push(output.display().to_string());
    Ok(args)
}

/// Duration of a WAV file in seconds.
///
/// # Errors
///
/// Returns [`PodcastError::Assembly`] when the file cannot be read as WAV.
pub fn wav_duration_seconds(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| PodcastError::Assembly(format!("cannot read {}: {e}", path.display())))?;
    let spec = reader.spec();
    let frames = f64::from(reader.duration());
    Ok(frames / f64::from(spec.sample_rate))
}
