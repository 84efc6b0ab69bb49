use serde::{Deserialize, Serialize};

/// Knobs passed to the local pipeline on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_length: u32,
    pub do_sample: bool,
}

impl GenerationParams {
    pub fn temperature(&self) -> f32 {
        if self.do_sample { 0.7 } else { 0.0 }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 200,
            do_sample: true,
        }
    }
}

/// One output produced by a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub generated_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostedGenerateRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostedGenerateResponse {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaemonGenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonGenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl DaemonGenerateResponse {
    pub fn into_text(self) -> Option<String> {
        self.response.or(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_daemon_request_is_non_streaming() {
        let request = DaemonGenerateRequest {
            model: "llama3",
            prompt: "Pet type: Dog",
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"model": "llama3", "prompt": "Pet type: Dog", "stream": false})
        );
    }

    #[test]
    fn test_daemon_response_prefers_response_field() {
        let body: DaemonGenerateResponse =
            serde_json::from_value(json!({"response": "rest", "output": "ignored"})).unwrap();
        assert_eq!(body.into_text().as_deref(), Some("rest"));
    }

    #[test]
    fn test_daemon_response_falls_back_to_output() {
        let body: DaemonGenerateResponse =
            serde_json::from_value(json!({"output": "hydrate", "done": true})).unwrap();
        assert_eq!(body.into_text().as_deref(), Some("hydrate"));
    }

    #[test]
    fn test_daemon_response_without_text() {
        let body: DaemonGenerateResponse = serde_json::from_value(json!({"done": true})).unwrap();
        assert!(body.into_text().is_none());
    }

    #[test]
    fn test_hosted_request_shape() {
        let request = HostedGenerateRequest {
            prompt: "Symptoms: sneezing",
            max_tokens: 300,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"prompt": "Symptoms: sneezing", "max_tokens": 300})
        );
    }

    #[test]
    fn test_sampling_temperature() {
        let sampled = GenerationParams::default();
        let greedy = GenerationParams {
            do_sample: false,
            ..sampled
        };
        assert_eq!(sampled.temperature(), 0.7);
        assert_eq!(greedy.temperature(), 0.0);
    }
}
