mod analyzer;
pub mod fsm;
mod prompt;
mod types;

pub use analyzer::{Analyzer, BLANK_SYMPTOMS_WARNING};
pub use fsm::{AnalysisEvent, AnalysisState, AnalysisStateMachine};
pub use prompt::PromptBuilder;
pub use types::{Analysis, Elapsed, Species, SymptomRequest};
