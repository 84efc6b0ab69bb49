use petwise::{
    Result,
    analysis::Analyzer,
    config::{
        BackendConfig, Config, DaemonConfig, HostedApiConfig, LogsConfig, PromptConfig,
        PromptStyle, ServerConfig,
    },
    server::handlers::AppState,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

use super::mocks::MockBackend;

pub const EXAMPLE_REPLY: &str =
    "Possible sprain; rest and monitor; see a vet if limping persists beyond 48h.";

/// Create a test configuration pointing at a daemon
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8501,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            session_idle_secs: 600,
        },
        backend: BackendConfig::Daemon(DaemonConfig {
            base_url: base_url.to_string(),
            model: "llama3".to_string(),
        }),
        prompt: PromptConfig {
            style: PromptStyle::Structured,
        },
    }
}

/// Hosted API settings whose credential variable is guaranteed to be unset
pub fn hosted_config(endpoint: &str, api_key: Option<&str>) -> HostedApiConfig {
    HostedApiConfig {
        endpoint: endpoint.to_string(),
        api_key: api_key.map(str::to_string),
        api_key_env: format!("PETWISE_TEST_UNSET_{}", uuid::Uuid::new_v4().simple()),
        max_tokens: 300,
    }
}

pub fn analyzer_with(backend: &MockBackend) -> Analyzer {
    Analyzer::new(Arc::new(backend.clone()), PromptStyle::Structured)
}

pub fn app_state_with(backend: &MockBackend) -> AppState {
    AppState::new(analyzer_with(backend))
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// True when `value` looks like `MM:SS`
pub fn is_mm_ss(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9000
  logs:
    level: "debug"

backend:
  kind: daemon
  base_url: "http://localhost:11434"
  model: "mistral"

prompt:
  style: plain
"#;

pub const SAMPLE_HOSTED_CONFIG_YAML: &str = r#"
backend:
  kind: hosted_api
  endpoint: "https://inference.example.com/v1/generate"
  api_key: "sk-test"
  max_tokens: 128
"#;

pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
backend:
  kind: daemon
"#;
