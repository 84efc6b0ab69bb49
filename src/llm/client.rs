use super::{DaemonBackend, HostedApiBackend, LocalPipelineBackend};
use crate::{Result, config::BackendConfig};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// A text-generation service that turns one prompt into one piece of text.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Builds the configured backend. Credentials are resolved here, so a
/// missing key fails before any request can be made.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn InferenceBackend>> {
    let backend: Arc<dyn InferenceBackend> = match config {
        BackendConfig::LocalPipeline(pipeline) => {
            Arc::new(LocalPipelineBackend::from_config(pipeline)?)
        }
        BackendConfig::HostedApi(hosted) => Arc::new(HostedApiBackend::from_config(hosted)?),
        BackendConfig::Daemon(daemon) => Arc::new(DaemonBackend::from_config(daemon)?),
    };

    info!("Using {} inference backend", backend.name());
    Ok(backend)
}
