use crate::error::{BfhlError, INTERNAL_SERVER_ERROR};
use crate::handlers::failure_response;
use crate::models::Envelope;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::any::Any;

pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const NOT_JSON: &str = "Expected a JSON request body";
pub const INVALID_JSON: &str = "Invalid JSON body";

/// `POST /bfhl`: one key in, one envelope out.
pub async fn bfhl(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let official_email = state.config.official_email.as_str();

    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(official_email, rejection),
    };

    match state.dispatcher.dispatch(&body).await {
        Ok(data) => (StatusCode::OK, Json(Envelope::success(official_email, data))).into_response(),
        Err(e) => error_response(official_email, &e),
    }
}

fn error_response(official_email: &str, err: &BfhlError) -> Response {
    failure_response(official_email, err.status_code(), err.public_message())
}

fn rejection_response(official_email: &str, rejection: JsonRejection) -> Response {
    let status = rejection.status();
    let message = match status {
        StatusCode::PAYLOAD_TOO_LARGE => BODY_TOO_LARGE,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => NOT_JSON,
        _ => INVALID_JSON,
    };

    tracing::warn!(status = %status, reason = %rejection.body_text(), "Rejected request body");
    failure_response(official_email, status, message)
}

/// Panic handler for `CatchPanicLayer`: log the payload, answer with the
/// generic 500 envelope.
pub fn panic_response(official_email: &str, payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(panic = detail, "Handler panicked");
    failure_response(
        official_email,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_SERVER_ERROR,
    )
}
