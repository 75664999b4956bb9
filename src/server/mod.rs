//! Axum HTTP surface for the chat and style-intake endpoints.
//!
//! Every handler failure is logged server-side and collapsed into
//! `500 {"error": ...}`: no differentiated status codes, no retry guidance.
//! Requests are isolated; a failed request never poisons the process.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::chat::ChatService;
use crate::types::RagError;

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/style/add", post(add_style))
        .with_state(state)
}

/// Binds and serves until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> Result<(), RagError> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, build_router(state).into_make_service())
        .await
        .map_err(RagError::Io)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Prior turns; accepted for compatibility, unused in generation.
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct StyleAddRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Wrapper turning any [`RagError`] into the uniform error response.
#[derive(Debug)]
pub struct AppError(pub RagError);

impl From<RagError> for AppError {
    fn from(err: RagError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": self.0.to_string()})),
        )
            .into_response()
    }
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let answer = state.chat.answer(&request.message).await?;
    Ok(Json(ChatResponse { answer }))
}

async fn add_style(
    State(state): State<AppState>,
    Json(request): Json<StyleAddRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let text = request.text.ok_or(RagError::MissingField("text"))?;
    state.chat.add_style_exemplar(text, request.meta).await?;
    Ok(Json(StatusResponse { status: "ok" }))
}
