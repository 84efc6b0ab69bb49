use async_trait::async_trait;
use petwise::{Error, Result, llm::InferenceBackend};
use std::sync::{Arc, Mutex};

/// Scripted backend: hands out queued outcomes and records every prompt.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub responses: Arc<Mutex<Vec<Result<String>>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::analysis("No more mock responses available"));
        }
        responses.remove(0)
    }
}
