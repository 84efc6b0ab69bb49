use super::{DaemonGenerateRequest, DaemonGenerateResponse, InferenceBackend};
use crate::{Error, Result, config::DaemonConfig};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on a single daemon generation.
pub const DAEMON_TIMEOUT: Duration = Duration::from_secs(300);

/// Locally served model daemon exposing `POST /api/generate`.
pub struct DaemonBackend {
    http: reqwest::Client,
    url: String,
    model: String,
}

impl DaemonBackend {
    pub fn from_config(config: &DaemonConfig) -> Result<Self> {
        Self::with_timeout(config, DAEMON_TIMEOUT)
    }

    fn with_timeout(config: &DaemonConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: format!("{}/api/generate", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl InferenceBackend for DaemonBackend {
    fn name(&self) -> &'static str {
        "daemon"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Posting prompt to {} with model {}", self.url, self.model);

        let response = self
            .http
            .post(&self.url)
            .json(&DaemonGenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            warn!("Daemon returned status {}", status);
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: DaemonGenerateResponse = serde_json::from_str(&body)
            .map_err(|e| Error::parsing(format!("invalid daemon body: {e}")))?;

        envelope
            .into_text()
            .ok_or_else(|| Error::parsing("daemon response has neither `response` nor `output`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn daemon_config(base_url: String) -> DaemonConfig {
        DaemonConfig {
            base_url,
            model: "llama3".to_string(),
        }
    }

    #[test]
    fn test_url_joins_generate_path() {
        let backend =
            DaemonBackend::from_config(&daemon_config("http://localhost:11434/".to_string()))
                .unwrap();
        assert_eq!(backend.url, "http://localhost:11434/api/generate");
    }

    #[tokio::test]
    async fn test_slow_daemon_is_connectivity_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "late"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let backend =
            DaemonBackend::with_timeout(&daemon_config(server.uri()), Duration::from_millis(50))
                .unwrap();
        let err = backend.generate("prompt").await.unwrap_err();
        assert_eq!(err.kind(), "connectivity");
    }

    #[tokio::test]
    async fn test_sends_model_and_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_json(json!({"model": "llama3", "prompt": "hi", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = DaemonBackend::from_config(&daemon_config(server.uri())).unwrap();
        assert_eq!(backend.generate("hi").await.unwrap(), "ok");
    }
}
