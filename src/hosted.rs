//! Client for the hosted media-function service.
//!
//! Video download, transcript analysis, and speech synthesis all run as jobs
//! on a remote queue: a push returns a job id, and the job is polled until it
//! reaches a terminal status. Outputs are plain JSON objects; functions that
//! produce files report them as `{"url": ...}` entries fetched separately.
//!
//! No retries, no local timeout: the poll loop runs until the service
//! reports a terminal status, and any transport error propagates unmodified.

use crate::config::HostedServiceConfig;
use crate::error::{PodcastError, Result};
use futures_util::StreamExt;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Response to a job push.
#[derive(Debug, Deserialize)]
struct PushResponse {
    id: String,
}

/// Job status snapshot returned by the poll endpoint.
#[derive(Debug, Deserialize)]
struct JobStatus {
    status: String,
    #[serde(default)]
    outputs: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the hosted job queue.
///
/// Cheap to clone-by-reference: one instance is constructed at startup and
/// shared across the download, analysis, and synthesis stages.
pub struct HostedClient {
    config: HostedServiceConfig,
    http: reqwest::Client,
}

impl HostedClient {
    /// Create a new client. No network traffic happens here.
    #[must_use]
    pub fn new(config: &HostedServiceConfig) -> Self {
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// Submit a job without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastError::Hosted`] on transport failure, a non-success
    /// status, or an unparseable push response.
    pub async fn push(&self, function: &str, inputs: serde_json::Value) -> Result<String> {
        let url = format!("{}/v2/push", self.base_url());
        debug!("pushing job for {function}");

        let response = self
            .http
            .post(&url)
            .header("X-API-Key", &self.config.api_key)
            .json(&serde_json::json!({
                "function": function,
                "inputs": inputs,
            }))
            .send()
            .await
            .map_err(|e| PodcastError::Hosted(format!("push for {function} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PodcastError::Hosted(format!(
                "push for {function} returned {status}: {body}"
            )));
        }

        let push: PushResponse = response
            .json()
            .await
            .map_err(|e| PodcastError::Hosted(format!("invalid push response: {e}")))?;
        debug!("job {} queued for {function}", push.id);
        Ok(push.id)
    }

    /// Block until a job reaches a terminal status and return its outputs.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastError::Hosted`] when the job finishes in an error
    /// state or the poll itself fails.
    pub async fn wait(&self, job_id: &str) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/v2/jobs/{job_id}", self.base_url());
        loop {
            let response = self
                .http
                .get(&url)
                .header("X-API-Key", &self.config.api_key)
                .send()
                .await
                .map_err(|e| PodcastError::Hosted(format!("poll for job {job_id} failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(PodcastError::Hosted(format!(
                    "poll for job {job_id} returned {status}: {body}"
                )));
            }

            let job: JobStatus = response
                .json()
                .await
                .map_err(|e| PodcastError::Hosted(format!("invalid job status: {e}")))?;

            match job.status.as_str() {
                "finished" => return Ok(job.outputs),
                "error" => {
                    return Err(PodcastError::Hosted(format!(
                        "job {job_id} failed: {}",
                        job.error.unwrap_or_else(|| "unknown error".to_owned())
                    )));
                }
                other => {
                    debug!("job {job_id} is {other}");
                    tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
                }
            }
        }
    }

    /// Submit a job and block until its outputs are available.
    ///
    /// # Errors
    ///
    /// Propagates push and poll failures.
    pub async fn run(
        &self,
        function: &str,
        inputs: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>> {
        let job_id = self.push(function, inputs).await?;
        self.wait(&job_id).await
    }

    /// Stream a job output file to a local path.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastError::Hosted`] on transport failure and
    /// [`PodcastError::Io`] on write failure.
    pub async fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PodcastError::Hosted(format!("fetch of {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PodcastError::Hosted(format!(
                "fetch of {url} returned {status}"
            )));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| PodcastError::Hosted(format!("fetch of {url} aborted: {e}")))?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        debug!("fetched {url} to {}", dest.display());
        Ok(())
    }
}
