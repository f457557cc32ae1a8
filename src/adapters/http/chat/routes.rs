//! HTTP routes for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    close_chat, current_chat, open_chat, send_attachment, send_message, ChatHandlers,
};

/// Creates the chat router.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", get(current_chat))
        .route("/open", post(open_chat))
        .route("/message", post(send_message))
        .route("/attachment", post(send_attachment))
        .route("/close", post(close_chat))
        .with_state(handlers)
}
