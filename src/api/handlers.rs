//! HTTP request handlers

use super::assets::{get_index_html, static_files};
use super::types::{ChatPayload, ChatRequest, ChatResponse, ErrorResponse};
use super::AppState;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::StreamExt;
use std::convert::Infallible;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let static_service = static_files(&state.static_dir);

    Router::new()
        // Landing page
        .route("/", get(serve_index))
        // Streamed reply
        .route("/chat", post(chat))
        // Whole reply in one JSON body
        .route("/chat/complete", post(chat_complete))
        // Frontend files
        .nest_service("/static", static_service)
        .with_state(state)
}

// ============================================================
// Landing Page
// ============================================================

async fn serve_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    get_index_html(&state.static_dir).await.map(Html).map_err(|e| {
        tracing::error!(error = %e, "Error serving index.html");
        AppError::Internal("Error serving index.html".to_string())
    })
}

// ============================================================
// Chat
// ============================================================

fn parse_chat(payload: Result<Json<ChatPayload>, JsonRejection>) -> Result<ChatRequest, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    payload.validate().map_err(AppError::MissingFields)
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = parse_chat(payload)?;
    tracing::info!(session_id = %request.session_id, "Chat request received");

    let session = state.sessions.resolve(&request.session_id).await;
    let fragments = state.streamer.stream(session, request.message);
    let body = Body::from_stream(fragments.map(Ok::<_, Infallible>));

    Ok((
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response())
}

async fn chat_complete(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request = parse_chat(payload)?;
    tracing::info!(session_id = %request.session_id, "Single-shot chat request received");

    let session = state.sessions.resolve(&request.session_id).await;
    let message = state
        .streamer
        .reply(&session, &request.message)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ChatResponse {
        message,
        session_id: request.session_id,
    }))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    MissingFields(Vec<&'static str>),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::MissingFields(fields) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::missing(fields))
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}
