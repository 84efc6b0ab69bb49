use super::types::{
    AnalyzeRequest, AnalyzeResponse, ErrorResponse, SaveHistoryRequest, SessionResponse,
};
use crate::{
    Error,
    analysis::{Analyzer, SymptomRequest},
    history::{HistoryEntry, SessionStore, Urgency},
};
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("page.html");

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

fn error_response(e: Error) -> ApiError {
    let status = match &e {
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Backend { .. } | Error::Parsing { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Request failed ({}): {}", e.kind(), e);
    } else {
        warn!("Request rejected ({}): {}", e.kind(), e);
    }

    (
        status,
        Json(ErrorResponse {
            kind: e.kind(),
            error: e.to_string(),
        }),
    )
}

/// Malformed bodies still answer with `{error, kind}` so the page can render them.
fn rejection_response(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    let message = rejection.body_text();
    warn!("Rejected request body ({}): {}", status, message);

    (
        status,
        Json(ErrorResponse {
            kind: "validation",
            error: message,
        }),
    )
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session_id = state.sessions.create().map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(SessionResponse { session_id })))
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.end(session_id).map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_response)?;
    info!("Received analysis request for species: {}", request.species);

    if let Some(id) = request.session_id {
        if !state.sessions.contains(id).map_err(error_response)? {
            return Err(error_response(Error::SessionNotFound {
                session_id: id.to_string(),
            }));
        }
    }

    let symptom_request = SymptomRequest::new(request.species, request.symptoms);
    let analysis = match state.analyzer.infer(&symptom_request).await {
        Ok(analysis) => analysis,
        Err(e) => {
            // A failed submission replaces whatever the session could have saved.
            if let Some(id) = request.session_id {
                state
                    .sessions
                    .record_outcome(id, &symptom_request, None)
                    .map_err(error_response)?;
            }
            return Err(error_response(e));
        }
    };

    // New sessions are only opened once there is a result to hand back.
    let session_id = match request.session_id {
        Some(id) => id,
        None => state.sessions.create().map_err(error_response)?,
    };
    state
        .sessions
        .record_outcome(session_id, &symptom_request, Some(&analysis))
        .map_err(error_response)?;

    Ok(Json(AnalyzeResponse {
        session_id,
        elapsed: analysis.elapsed.to_string(),
        elapsed_seconds: analysis.elapsed.as_secs_f64(),
        generated_text: analysis.generated_text,
    }))
}

pub async fn save_history(
    State(state): State<AppState>,
    payload: Result<Json<SaveHistoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    let Json(request) = payload.map_err(rejection_response)?;
    let urgency = Urgency::new(request.urgency).map_err(error_response)?;
    let entry = state
        .sessions
        .save(request.session_id, urgency)
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state.sessions.history(session_id).map_err(error_response)?;
    Ok(Json(entries))
}
