//! Azure OpenAI chat-completions gateway.
//!
//! One blocking call per prompt, no retries, no fallback model. The
//! schema-constrained variant forces the model to answer as a named virtual
//! function and decodes the returned argument payload as JSON.

use crate::config::AzureOpenAiConfig;
use crate::error::{PodcastError, Result};
use async_trait::async_trait;
use tracing::debug;

/// System message framing the free-text completion call.
const CHAT_SYSTEM_PROMPT: &str = "Assistant is a large language model trained by OpenAI.";

/// System message framing the schema-constrained call. Empty-string field
/// values are forbidden by instruction; the structurer still validates.
const SCHEMA_SYSTEM_PROMPT: &str = "Do not put any empty string value for the provided json.";

/// Chat-completion capability consumed by the dialogue structurer.
///
/// A trait seam so tests can substitute a deterministic stub for the remote
/// endpoint.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// One free-text completion call.
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String>;

    /// One schema-constrained call: forces the model to return arguments for
    /// the named function and decodes them as JSON.
    async fn complete_with_schema(
        &self,
        prompt: &str,
        function: serde_json::Value,
        function_name: &str,
    ) -> Result<serde_json::Value>;
}

/// Azure OpenAI client.
///
/// Constructed once at startup from validated configuration and passed by
/// reference wherever a completion capability is needed.
pub struct AzureOpenAiClient {
    config: AzureOpenAiConfig,
    http: reqwest::Client,
}

impl AzureOpenAiClient {
    /// Create a new client. No network traffic happens here.
    #[must_use]
    pub fn new(config: &AzureOpenAiConfig) -> Self {
        Self {
            config: config.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        let base = self.config.endpoint.trim_end_matches('/');
        format!(
            "{base}/openai/deployments/{}/chat/completions",
            self.config.deployment
        )
    }

    async fn send(&self, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = self.completions_url();
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PodcastError::Llm(format!("chat completion request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PodcastError::Llm(format!("failed to read completion response: {e}")))?;

        if !status.is_success() {
            return Err(PodcastError::Llm(format!(
                "chat completion returned {status}: {text}"
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| PodcastError::Llm(format!("invalid completion response: {e}")))
    }
}

#[async_trait]
impl CompletionApi for AzureOpenAiClient {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String> {
        let body = serde_json::json!({
            "messages": [
                {"role": "system", "content": CHAT_SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
            "temperature": temperature,
        });

        let response = self.send(body).await?;
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| {
                PodcastError::Llm("completion response carried no message content".to_owned())
            })
    }

    async fn complete_with_schema(
        &self,
        prompt: &str,
        function: serde_json::Value,
        function_name: &str,
    ) -> Result<serde_json::Value> {
        let body = serde_json::json!({
            "messages": [
                {"role": "system", "content": SCHEMA_SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
            "functions": [function],
            "function_call": {"name": function_name},
        });

        let response = self.send(body).await?;
        let arguments = response["choices"][0]["message"]["function_call"]["arguments"]
            .as_str()
            .ok_or_else(|| {
                PodcastError::DataFormat(
                    "completion response carried no function_call arguments".to_owned(),
                )
            })?;

        serde_json::from_str(arguments).map_err(|e| {
            PodcastError::DataFormat(format!("function_call arguments are not valid JSON: {e}"))
        })
    }
}
