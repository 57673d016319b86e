use crate::handlers::failure_response;
use crate::models::Envelope;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Liveness: always 200 with the configured email.
pub async fn health_check(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(Envelope::ok(&state.config.official_email)),
    )
        .into_response()
}

/// Readiness: 503 while the text provider cannot be used.
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let provider = state.dispatcher.text_provider();
    match provider.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Envelope::ok(&state.config.official_email)),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "Text provider not ready");
            failure_response(
                &state.config.official_email,
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
            )
        }
    }
}
