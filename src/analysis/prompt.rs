use super::SymptomRequest;
use crate::config::PromptStyle;

const STRUCTURED_INSTRUCTIONS: &str = "You are a careful veterinary assistant. Based on the pet type and symptoms above, respond with:\n\
1. Possible causes\n\
2. Home care suggestions\n\
3. When to see a veterinarian\n\
Keep the answer short and remind the owner that this is not a diagnosis.";

/// Composes the single prompt string sent to a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    style: PromptStyle,
}

impl PromptBuilder {
    pub fn new(style: PromptStyle) -> Self {
        Self { style }
    }

    pub fn build(&self, request: &SymptomRequest) -> String {
        let head = format!(
            "Pet type: {}\nSymptoms: {}\n",
            request.species,
            request.symptom_text.trim()
        );

        match self.style {
            PromptStyle::Plain => format!("{head}Provide a helpful AI analysis:"),
            PromptStyle::Structured => format!("{head}{STRUCTURED_INSTRUCTIONS}"),
        }
    }
}
