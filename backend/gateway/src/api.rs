//! JSON API driving the diagnosis page.
//!
//! One session per server: the page is a single-user surface and the
//! lifecycle has exactly one current image. The session mutex is held across
//! the inference await, which is what keeps a second analyze call from
//! starting while one is in flight.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::warn;

use plantguard_core::{DiagnosisError, Session, ViewState};
use plantguard_inference::DiagnosisPipeline;
use plantguard_report::{render_report_html, view_model};

/// Shared application state for API handlers.
pub struct AppState {
    pub session: Mutex<Session>,
    pub pipeline: DiagnosisPipeline,
}

impl AppState {
    pub fn new(pipeline: DiagnosisPipeline) -> Self {
        Self {
            session: Mutex::new(Session::new()),
            pipeline,
        }
    }
}

/// Build the Axum router with the page and all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/upload", post(upload))
        .route("/api/analyze", post(analyze))
        .route("/api/reset", post(reset))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "plantguard",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Current view model, plus server-rendered card markup when a result is up.
fn state_payload(session: &Session) -> Json<Value> {
    let vm = view_model(session.state());
    let html = match session.state() {
        ViewState::Result { record, .. } => Some(render_report_html(record)),
        _ => None,
    };
    Json(json!({
        "view": vm.view,
        "preview": vm.preview,
        "canAnalyze": vm.can_analyze,
        "report": vm.report,
        "error": vm.error,
        "html": html,
    }))
}

fn error_response(err: &DiagnosisError) -> (StatusCode, Json<Value>) {
    let status = match err {
        DiagnosisError::InvalidMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        DiagnosisError::InvalidTransition { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = state.session.lock().await;
    state_payload(&session)
}

/// Accept raw image bytes; Content-Type is the declared media type and an
/// optional `X-Filename` header covers extension-based detection.
async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let declared = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let filename = headers
        .get("x-filename")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("upload");

    let mut session = state.session.lock().await;
    plantguard_media::submit_file(&mut session, filename, declared, body).map_err(|e| {
        warn!(error = %e, "upload rejected");
        error_response(&e)
    })?;
    Ok(state_payload(&session))
}

/// Run the pipeline for the current image. 409 outside Previewing.
async fn analyze(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut session = state.session.lock().await;
    let image = session.begin_analysis().map_err(|e| error_response(&e))?;

    let outcome = state.pipeline.analyze(&image).await;
    if let Err(err) = &outcome {
        warn!(error = %err, "analysis failed");
    }
    // The session was left in Loading by begin_analysis, so finish cannot
    // hit an invalid transition here.
    session.finish(outcome).map_err(|e| error_response(&e))?;
    Ok(state_payload(&session))
}

async fn reset(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.lock().await;
    plantguard_media::reset(&mut session);
    state_payload(&session)
}
