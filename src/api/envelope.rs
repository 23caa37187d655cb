//! JSON envelope for viewer responses.
//!
//! Successes serialize as `{ "data": ..., "meta": ... }` and failures as
//! `{ "error": { "code", "message" }, "meta": ... }`. Viewer errors carry
//! their own HTTP status through [`IntoResponse`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::section::SectionError;
use crate::viewer::ViewerError;

#[derive(Debug, Serialize)]
pub struct Meta {
    pub timestamp: String,
    pub version: &'static str,
}

impl Meta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
struct DataBody<T> {
    data: T,
    meta: Meta,
}

/// Wrap `data` in a 200 envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    let body = DataBody {
        data,
        meta: Meta::now(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

// ============================================================================
// Failures
// ============================================================================

/// Why a viewer request could not be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    /// Malformed event or geometry
    BadEvent,
    /// Well, surface or model that the viewer does not know
    NotFound,
    /// No fence or cross-section has been built yet
    NotReady,
    /// A model file could not be read or did not match the fence
    DataError,
}

impl FailureCode {
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadEvent => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotReady => StatusCode::CONFLICT,
            Self::DataError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&ViewerError> for FailureCode {
    fn from(e: &ViewerError) -> Self {
        match e {
            ViewerError::UnknownWell(_) | ViewerError::UnknownSurface(_) => Self::NotFound,
            ViewerError::NoErrorSurface(_)
            | ViewerError::Section(SectionError::InvalidGeometry(_)) => Self::BadEvent,
            ViewerError::NoFence | ViewerError::NoWells => Self::NotReady,
            ViewerError::Section(SectionError::MismatchedFence(_))
            | ViewerError::Surface(_)
            | ViewerError::Well(_)
            | ViewerError::Model(_)
            | ViewerError::Setup(_) => Self::DataError,
        }
    }
}

#[derive(Debug, Serialize)]
struct FailureDetail {
    code: FailureCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct FailureBody {
    error: FailureDetail,
    meta: Meta,
}

/// A failed request, rendered with the status its code implies.
#[derive(Debug)]
pub struct Failure {
    pub code: FailureCode,
    pub message: String,
}

impl Failure {
    pub fn new(code: FailureCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = FailureBody {
            error: FailureDetail {
                code: self.code,
                message: self.message,
            },
            meta: Meta::now(),
        };
        (self.code.status(), Json(body)).into_response()
    }
}

impl From<&ViewerError> for Failure {
    fn from(e: &ViewerError) -> Self {
        Self::new(FailureCode::from(e), e.to_string())
    }
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        Failure::from(&self).into_response()
    }
}
