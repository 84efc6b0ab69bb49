use super::{HostedGenerateRequest, HostedGenerateResponse, InferenceBackend};
use crate::{Error, Result, config::HostedApiConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Hosted generation endpoint authenticated with a bearer credential.
pub struct HostedApiBackend {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
}

impl HostedApiBackend {
    pub fn from_config(config: &HostedApiConfig) -> Result<Self> {
        let api_key = config.resolve_credential()?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl InferenceBackend for HostedApiBackend {
    fn name(&self) -> &'static str {
        "hosted_api"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Posting prompt ({} chars) to {}", prompt.len(), self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&HostedGenerateRequest {
                prompt,
                max_tokens: self.max_tokens,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Hosted API rejected request with status {}", status);
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: HostedGenerateResponse = serde_json::from_str(&body)
            .map_err(|e| Error::parsing(format!("invalid hosted API body: {e}")))?;

        envelope
            .text
            .ok_or_else(|| Error::parsing("hosted API response has no `text` field"))
    }
}
