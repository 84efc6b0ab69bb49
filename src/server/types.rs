use crate::analysis::Species;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub species: Species,
    pub symptoms: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub generated_text: String,
    /// `MM:SS`
    pub elapsed: String,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    pub session_id: Uuid,
    pub urgency: u32,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}
