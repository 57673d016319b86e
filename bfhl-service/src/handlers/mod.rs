//! HTTP handlers for the bfhl service.

pub mod bfhl;
pub mod health;
pub mod metrics;

pub use bfhl::bfhl;
pub use health::{health_check, readiness_check};
pub use metrics::metrics;

use crate::models::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failure envelope with the given status.
pub fn failure_response(official_email: &str, status: StatusCode, error: &str) -> Response {
    (status, Json(Envelope::failure(official_email, error))).into_response()
}
