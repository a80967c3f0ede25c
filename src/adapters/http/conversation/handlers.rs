//! HTTP handlers for conversation endpoints.
//!
//! These handlers connect Axum routes to the dialog manager.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{DialogManager, EngineError};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};

use super::dto::{ConversationResponse, ErrorResponse, SendMessageRequest, TurnResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for conversation handlers.
#[derive(Clone)]
pub struct ConversationAppState {
    pub manager: Arc<DialogManager>,
}

impl ConversationAppState {
    pub fn new(manager: Arc<DialogManager>) -> Self {
        Self { manager }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/conversations/:conversation_id/messages - Process a user message
pub async fn post_message(
    State(state): State<ConversationAppState>,
    Path(conversation_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let id = parse_id(&conversation_id)?;
    let report = state.manager.process_message(&id, request.text).await?;
    Ok(Json(TurnResponse::from(report)))
}

/// POST /api/conversations/:conversation_id/join - A member joined
pub async fn join_conversation(
    State(state): State<ConversationAppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let id = parse_id(&conversation_id)?;
    let report = state.manager.join(&id).await?;
    Ok(Json(TurnResponse::from(report)))
}

/// DELETE /api/conversations/:conversation_id - Forget a conversation
pub async fn delete_conversation(
    State(state): State<ConversationAppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let id = parse_id(&conversation_id)?;
    state.manager.reset(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/conversations/:conversation_id - Get stored conversation state
pub async fn get_conversation(
    State(state): State<ConversationAppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let id = parse_id(&conversation_id)?;
    match state.manager.snapshot(&id).await? {
        Some(record) => Ok(Json(ConversationResponse::from(record))),
        None => Err(ConversationApiError::NotFound(id)),
    }
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn parse_id(raw: &str) -> Result<ConversationId, ConversationApiError> {
    ConversationId::new(raw).map_err(|e| ConversationApiError::BadRequest(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub enum ConversationApiError {
    BadRequest(String),
    NotFound(ConversationId),
    Engine(EngineError),
}

impl From<EngineError> for ConversationApiError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl IntoResponse for ConversationApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ConversationApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message),
            ),
            ConversationApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(
                    ErrorCode::ConversationNotFound.to_string(),
                    format!("Conversation not found: {}", id),
                ),
            ),
            ConversationApiError::Engine(err) => {
                let error = DomainError::from(err);
                let status = match error.code {
                    ErrorCode::ConversationNotFound => StatusCode::NOT_FOUND,
                    ErrorCode::CorruptState | ErrorCode::InvalidStateTransition => {
                        StatusCode::CONFLICT
                    }
                    ErrorCode::ValidationFailed
                    | ErrorCode::EmptyField
                    | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
                    ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, ErrorResponse::new(error.code.to_string(), error.message))
            }
        };
        (status, Json(body)).into_response()
    }
}
