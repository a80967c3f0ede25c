//! Axum routes for conversation endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    delete_conversation, get_conversation, health, join_conversation, post_message,
    ConversationAppState,
};

/// Creates routes for conversation endpoints.
///
/// - POST   /conversations/:conversation_id/messages - Process a user message
/// - POST   /conversations/:conversation_id/join - Greet a joining member
/// - GET    /conversations/:conversation_id - Stored conversation state
/// - DELETE /conversations/:conversation_id - Forget the conversation
pub fn conversation_routes() -> Router<ConversationAppState> {
    Router::new()
        .route("/conversations/:conversation_id/messages", post(post_message))
        .route("/conversations/:conversation_id/join", post(join_conversation))
        .route(
            "/conversations/:conversation_id",
            get(get_conversation).delete(delete_conversation),
        )
}

/// Combined router with conversation routes under /api and a health check.
pub fn conversation_router(state: ConversationAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", conversation_routes())
        .with_state(state)
}
