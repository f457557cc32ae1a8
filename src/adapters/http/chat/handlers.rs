//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::adapters::http::domain_error_response;
use crate::application::SessionOrchestrator;
use crate::domain::foundation::{ChatSessionId, DomainError};

use super::dto::{CloseRequest, MessageRequest, OpenChatRequest};

#[derive(Clone)]
pub struct ChatHandlers {
    orchestrator: Arc<SessionOrchestrator>,
}

impl ChatHandlers {
    pub fn new(orchestrator: Arc<SessionOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// POST /api/chat/open - open a conversation, replacing any open one.
pub async fn open_chat(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<OpenChatRequest>,
) -> Response {
    match handlers.orchestrator.open_conversation(req.into()).await {
        Ok(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST /api/chat/message - submit a typed message.
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<MessageRequest>,
) -> Response {
    match handlers
        .orchestrator
        .submit_message(req.session_id, &req.message)
        .await
    {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST /api/chat/attachment - multipart upload with `session_id` and
/// `file` parts.
pub async fn send_attachment(
    State(handlers): State<ChatHandlers>,
    mut multipart: Multipart,
) -> Response {
    let mut session_id: Option<ChatSessionId> = None;
    let mut file: Option<(Vec<u8>, String, String)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "malformed multipart upload");
                return domain_error_response(DomainError::validation(
                    "Malformed multipart request",
                ));
            }
        };

        match field.name() {
            Some("session_id") => {
                let text = match field.text().await {
                    Ok(text) => text,
                    Err(_) => {
                        return domain_error_response(DomainError::validation(
                            "session_id part must be text",
                        ))
                    }
                };
                session_id = match text.parse() {
                    Ok(id) => Some(id),
                    Err(_) => {
                        return domain_error_response(DomainError::validation(
                            "session_id is not a valid UUID",
                        ))
                    }
                };
            }
            Some("file") => {
                let name = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(_) => {
                        return domain_error_response(DomainError::validation(
                            "Failed to read file part",
                        ))
                    }
                };
                file = Some((bytes, name, content_type));
            }
            _ => {}
        }
    }

    let Some(session_id) = session_id else {
        return domain_error_response(DomainError::validation("session_id part is required"));
    };
    let Some((content, name, content_type)) = file else {
        return domain_error_response(DomainError::validation("file part is required"));
    };

    match handlers
        .orchestrator
        .submit_attachment(session_id, &content, &name, &content_type)
        .await
    {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST /api/chat/close - close the conversation. Idempotent.
pub async fn close_chat(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<CloseRequest>,
) -> Response {
    handlers.orchestrator.close_conversation(req.session_id).await;
    StatusCode::NO_CONTENT.into_response()
}

/// GET /api/chat - snapshot of the open conversation, if any.
pub async fn current_chat(State(handlers): State<ChatHandlers>) -> Response {
    match handlers.orchestrator.current().await {
        Some(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        None => domain_error_response(DomainError::session_not_found(
            "No conversation is open",
        )),
    }
}
