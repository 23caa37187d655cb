//! API handlers
//!
//! All handlers return `Response` via [`envelope::ok`] or a [`Failure`];
//! viewer errors render themselves with their own status.
//! The session lock is held for the whole of an interaction, so events are
//! applied one at a time in arrival order.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::envelope::{self, Failure, FailureCode};
use crate::model::ModelSummary;
use crate::plot::{make_figure, Figure};
use crate::viewer::{Selection, Session, SessionStats, ViewerEvent};

/// Shared state for every handler.
#[derive(Clone)]
pub struct ViewerState {
    pub session: Arc<Mutex<Session>>,
    /// Present when the viewer was built from a model directory
    pub model: Option<Arc<ModelSummary>>,
}

impl ViewerState {
    pub fn new(session: Session, model: Option<ModelSummary>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            model: model.map(Arc::new),
        }
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub stats: SessionStats,
}

#[derive(Debug, Serialize)]
pub struct WellEntry {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct SurfaceEntry {
    pub name: String,
    pub color: String,
    pub has_error: bool,
    pub visible: bool,
    pub error_visible: bool,
}

#[derive(Debug, Serialize)]
pub struct CrossSectionResponse<'a> {
    pub selection: &'a Selection,
    pub fence_samples: usize,
    pub fence_length: f64,
    pub figure: Figure,
}

fn cross_section_response(session: &Session) -> Response {
    let (Some(fence), Some(section)) = (session.fence(), session.cross_section()) else {
        return Failure::new(
            FailureCode::NotReady,
            "No cross-section yet: select a well or draw a polyline",
        )
        .into_response();
    };
    envelope::ok(CrossSectionResponse {
        selection: session.selection(),
        fence_samples: fence.len(),
        fence_length: fence.total_length(),
        figure: make_figure(section, session.setup().zunit()),
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health(State(state): State<ViewerState>) -> Response {
    let session = state.session.lock().await;
    envelope::ok(HealthResponse {
        status: "ok",
        stats: session.stats(),
    })
}

/// GET /api/v1/wells
pub async fn list_wells(State(state): State<ViewerState>) -> Response {
    let session = state.session.lock().await;
    let selected = session.selection().well.as_deref();
    let wells: Vec<WellEntry> = session
        .setup()
        .wells()
        .iter()
        .map(|w| WellEntry {
            name: w.name.clone(),
            selected: selected == Some(w.name.as_str()),
        })
        .collect();
    envelope::ok(wells)
}

/// GET /api/v1/surfaces
pub async fn list_surfaces(State(state): State<ViewerState>) -> Response {
    let session = state.session.lock().await;
    let selection = session.selection();
    let surfaces: Vec<SurfaceEntry> = session
        .setup()
        .surfaces()
        .iter()
        .map(|s| SurfaceEntry {
            name: s.name.clone(),
            color: s.color.clone(),
            has_error: s.error_path.is_some(),
            visible: selection.surfaces.contains(&s.name),
            error_visible: selection.errors.contains(&s.name),
        })
        .collect();
    envelope::ok(surfaces)
}

/// GET /api/v1/model
pub async fn get_model(State(state): State<ViewerState>) -> Response {
    match &state.model {
        Some(summary) => envelope::ok(summary.as_ref()),
        None => Failure::new(
            FailureCode::NotFound,
            "Viewer was not started from a model directory",
        )
        .into_response(),
    }
}

/// GET /api/v1/cross-section
pub async fn get_cross_section(State(state): State<ViewerState>) -> Response {
    let session = state.session.lock().await;
    cross_section_response(&session)
}

/// POST /api/v1/events
pub async fn post_event(
    State(state): State<ViewerState>,
    payload: Result<Json<ViewerEvent>, JsonRejection>,
) -> Response {
    let Json(event) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            let message = format!("Invalid event: {}", rejection.body_text());
            return Failure::new(FailureCode::BadEvent, message).into_response();
        }
    };

    let mut session = state.session.lock().await;
    let outcome = session.handle(event).map(|_| ());
    match outcome {
        Ok(()) => {
            debug!(stats = ?session.stats(), "Viewer event applied");
            cross_section_response(&session)
        }
        Err(e) => {
            warn!(error = %e, "Viewer event rejected");
            e.into_response()
        }
    }
}
