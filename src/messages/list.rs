use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{config::Config, db::Message, store::ChatStore, AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesQuery {
    /// RFC 3339; only messages strictly newer are returned.
    pub after: Option<String>,
    pub limit: Option<usize>,
}

#[debug_handler(state = crate::AppState)]
pub async fn list_msgs(
    State(store): State<Arc<dyn ChatStore>>,
    State(config): State<Arc<Config>>,
    query: Result<Query<ListMessagesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Message>>> {
    let Query(ListMessagesQuery { after, limit }) =
        query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let msgs = match after.as_deref().filter(|after| !after.is_empty()) {
        Some(after) => {
            let after = OffsetDateTime::parse(after, &Rfc3339)
                .map_err(|err| AppError::Validation(format!("Invalid `after` timestamp: {err}")))?;
            store.get_messages_after(after).await
        }
        None => {
            let limit = limit
                .unwrap_or(config.chat.history_limit)
                .clamp(1, config.chat.max_history_limit.max(1));
            store.get_messages(limit).await
        }
    };

    Ok(Json(msgs))
}
