use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::render;
use crate::state::AppState;

const TEXT_EXPOSITION: &str = "text/plain; version=0.0.4";

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_metrics(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshots.load();

    match render::render(&snapshot) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_EXPOSITION)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics exposition");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
