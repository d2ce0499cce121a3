//! Request handlers for the relay endpoints

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use chatrelay_core::{ChatRequest, ChatResponse};
use serde::Serialize;
use tracing::warn;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Relay one message; every failure becomes a `{"detail"}` body
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected unreadable chat body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let response = state.relay.chat(request).await?;
    Ok(Json(response))
}
