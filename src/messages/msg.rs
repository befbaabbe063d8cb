use std::sync::Arc;

use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::{
    db::{Message, MessageKind, NewMessage},
    json::{FieldOrder, ValidJson},
    store::ChatStore,
    AppError, AppResult,
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(min = 1, message = "Sender id is required"))]
    pub sender_id: String,
    #[validate(length(min = 1, message = "Sender username is required"))]
    pub sender_username: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl FieldOrder for SendMessageRequest {
    const FIELDS: &'static [&'static str] = &["content", "sender_id", "sender_username"];
}

fn parse_kind(kind: Option<&str>) -> AppResult<Option<MessageKind>> {
    match kind {
        None | Some("") => Ok(None),
        Some(kind) => kind
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation("Invalid message type".to_owned())),
    }
}

#[debug_handler(state = crate::AppState)]
pub async fn send_msg(
    State(store): State<Arc<dyn ChatStore>>,
    ValidJson(SendMessageRequest { content, sender_id, sender_username, kind }): ValidJson<SendMessageRequest>,
) -> AppResult<Json<Message>> {
    let kind = parse_kind(kind.as_deref())?;

    let msg = store
        .create_message(NewMessage { content, sender_id, sender_username, kind })
        .await;
    tracing::debug!(id = %msg.id, sender = %msg.sender_username, kind = %msg.kind, "message posted");

    Ok(Json(msg))
}
