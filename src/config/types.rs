use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    /// Sessions untouched for this long are dropped along with their history.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// The single text-generation backend a deployment talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    LocalPipeline(LocalPipelineConfig),
    HostedApi(HostedApiConfig),
    Daemon(DaemonConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalPipelineConfig {
    #[serde(default = "default_pipeline_model")]
    pub model: String,
    /// Address of the locally served completions endpoint the pipeline drives.
    #[serde(default = "default_pipeline_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_do_sample")]
    pub do_sample: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedApiConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_daemon_base_url")]
    pub base_url: String,
    #[serde(default = "default_daemon_model")]
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub style: PromptStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    Plain,
    #[default]
    Structured,
}

impl BackendConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LocalPipeline(_) => "local_pipeline",
            Self::HostedApi(_) => "hosted_api",
            Self::Daemon(_) => "daemon",
        }
    }
}

impl HostedApiConfig {
    /// Resolves the bearer credential: inline `api_key` first, then the
    /// environment variable named by `api_key_env`.
    pub fn resolve_credential(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }

        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            Ok(_) => Err(Error::config(format!(
                "hosted API credential in '{}' is empty",
                self.api_key_env
            ))),
            Err(std::env::VarError::NotPresent) => Err(Error::config(format!(
                "hosted API credential missing: set backend.api_key or '{}'",
                self.api_key_env
            ))),
            Err(std::env::VarError::NotUnicode(_)) => Err(Error::config(format!(
                "hosted API credential in '{}' is not valid unicode",
                self.api_key_env
            ))),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            base_url: default_daemon_base_url(),
            model: default_daemon_model(),
        }
    }
}

impl Default for LocalPipelineConfig {
    fn default() -> Self {
        Self {
            model: default_pipeline_model(),
            base_url: default_pipeline_base_url(),
            max_length: default_max_length(),
            do_sample: default_do_sample(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_secs() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pipeline_model() -> String {
    "google/flan-t5-small".to_string()
}

fn default_pipeline_base_url() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_max_length() -> u32 {
    200
}

fn default_do_sample() -> bool {
    true
}

fn default_api_key_env() -> String {
    "PETWISE_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_daemon_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_daemon_model() -> String {
    "llama3".to_string()
}
