pub mod handlers;
pub mod types;

use crate::{Result, analysis::Analyzer, config::Config, history::SessionStore};
use axum::{
    Router,
    routing::{delete, get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/:session_id", delete(handlers::end_session))
        .route(
            "/api/sessions/:session_id/history",
            get(handlers::list_history),
        )
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/history", post(handlers::save_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Fails here, before binding, when the backend cannot be built.
    let analyzer = Analyzer::from_config(&config.backend, config.prompt.style)?;
    info!("Analyzer ready with {} backend", analyzer.backend_name());

    let state = AppState::new(analyzer);
    spawn_session_reaper(
        Arc::clone(&state.sessions),
        Duration::from_secs(config.server.session_idle_secs),
    );
    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops sessions whose page went away without ending them.
pub fn spawn_session_reaper(
    sessions: Arc<SessionStore>,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = SESSION_SWEEP_INTERVAL.min(max_idle.max(Duration::from_secs(1)));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(e) = sessions.expire_idle(max_idle) {
                warn!("Session sweep failed: {}", e);
            }
        }
    })
}
