use super::{Candidate, GenerationParams, InferenceBackend};
use crate::{Error, Result, config::LocalPipelineConfig};
use async_openai::{Client, config::OpenAIConfig, types::CreateCompletionRequestArgs};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};
use tracing::{debug, info};

/// A loaded text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<Candidate>>;
}

/// Completion model served by a local OpenAI-compatible runtime
/// (llama.cpp server, vLLM, text-generation-inference).
pub struct CompletionPipeline {
    client: Client<OpenAIConfig>,
    model: String,
}

impl CompletionPipeline {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        // Local runtimes ignore the key, but the client insists on sending one.
        let openai_config = OpenAIConfig::new()
            .with_api_base(base_url)
            .with_api_key("local");

        Self {
            client: Client::with_config(openai_config),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for CompletionPipeline {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<Candidate>> {
        let request = CreateCompletionRequestArgs::default()
            .model(&self.model)
            .prompt(prompt.to_string())
            .max_tokens(params.max_length)
            .temperature(params.temperature())
            .build()?;

        let response = self.client.completions().create(request).await?;

        debug!(
            "Pipeline {} returned {} candidates",
            self.model,
            response.choices.len()
        );

        Ok(response
            .choices
            .into_iter()
            .map(|choice| Candidate {
                generated_text: choice.text,
            })
            .collect())
    }
}

static PIPELINES: LazyLock<RwLock<HashMap<String, Arc<dyn TextGenerator>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Returns the process-wide handle for the configured model, loading it on
/// first use. Handles are never replaced once cached.
pub fn load_pipeline(config: &LocalPipelineConfig) -> Result<Arc<dyn TextGenerator>> {
    let key = format!("{}@{}", config.model, config.base_url);

    {
        let cache = PIPELINES
            .read()
            .map_err(|e| Error::internal(format!("Pipeline cache poisoned: {e}")))?;
        if let Some(pipeline) = cache.get(&key) {
            debug!("Reusing cached pipeline {}", key);
            return Ok(Arc::clone(pipeline));
        }
    }

    let mut cache = PIPELINES
        .write()
        .map_err(|e| Error::internal(format!("Pipeline cache poisoned: {e}")))?;
    let pipeline = cache
        .entry(key.clone())
        .or_insert_with(|| {
            info!("Loading pipeline {}", key);
            Arc::new(CompletionPipeline::new(&config.model, &config.base_url))
                as Arc<dyn TextGenerator>
        })
        .clone();

    Ok(pipeline)
}

/// Runs prompts through a cached in-process pipeline handle and keeps the
/// first candidate.
pub struct LocalPipelineBackend {
    pipeline: Arc<dyn TextGenerator>,
    params: GenerationParams,
}

impl LocalPipelineBackend {
    pub fn new(pipeline: Arc<dyn TextGenerator>, params: GenerationParams) -> Self {
        Self { pipeline, params }
    }

    pub fn from_config(config: &LocalPipelineConfig) -> Result<Self> {
        let params = GenerationParams {
            max_length: config.max_length,
            do_sample: config.do_sample,
        };
        Ok(Self::new(load_pipeline(config)?, params))
    }
}

#[async_trait]
impl InferenceBackend for LocalPipelineBackend {
    fn name(&self) -> &'static str {
        "local_pipeline"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let candidates = self.pipeline.generate(prompt, &self.params).await?;

        candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.generated_text)
            .ok_or_else(|| Error::parsing("pipeline produced no candidates"))
    }
}
