use super::{
    Analysis, AnalysisEvent, AnalysisStateMachine, Elapsed, PromptBuilder, SymptomRequest,
};
use crate::{
    Error, Result,
    config::{BackendConfig, PromptStyle},
    llm::{InferenceBackend, create_backend},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const BLANK_SYMPTOMS_WARNING: &str = "Please describe your pet's symptoms before analyzing.";

/// Turns a symptom submission into exactly one backend call.
pub struct Analyzer {
    backend: Arc<dyn InferenceBackend>,
    prompt: PromptBuilder,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn InferenceBackend>, style: PromptStyle) -> Self {
        Self {
            backend,
            prompt: PromptBuilder::new(style),
        }
    }

    pub fn from_config(backend: &BackendConfig, style: PromptStyle) -> Result<Self> {
        Ok(Self::new(create_backend(backend)?, style))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn infer(&self, request: &SymptomRequest) -> Result<Analysis> {
        if request.is_blank() {
            debug!("Rejecting blank symptom description for {}", request.species);
            return Err(Error::validation(BLANK_SYMPTOMS_WARNING));
        }

        let prompt = self.prompt.build(request);
        let mut fsm = AnalysisStateMachine::new();
        fsm.transition(AnalysisEvent::Dispatch)?;

        info!(
            "Analyzing {} symptoms via {} backend",
            request.species,
            self.backend.name()
        );

        let started = Instant::now();
        let outcome = self.backend.generate(&prompt).await;
        let elapsed = Elapsed::new(started.elapsed());

        match outcome {
            Ok(generated_text) => {
                fsm.transition(AnalysisEvent::BackendResponded)?;
                info!("Analysis complete in {}", elapsed);
                Ok(Analysis {
                    generated_text,
                    elapsed,
                })
            }
            Err(e) => {
                fsm.transition(AnalysisEvent::BackendFailed)?;
                match &e {
                    Error::Parsing { detail } => {
                        warn!("Analysis failed after {}: {}", elapsed, detail)
                    }
                    other => warn!("Analysis failed after {}: {}", elapsed, other),
                }
                Err(e)
            }
        }
    }
}
