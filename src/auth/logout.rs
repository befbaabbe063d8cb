use std::sync::Arc;

use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    json::{FieldOrder, ValidJson},
    presence,
    store::ChatStore,
    AppResult,
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct LogoutRequest {
    pub user_id: Option<String>,
    pub username: String,
}

impl FieldOrder for LogoutRequest {
    const FIELDS: &'static [&'static str] = &[];
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[debug_handler(state = crate::AppState)]
pub async fn logout(
    State(store): State<Arc<dyn ChatStore>>,
    ValidJson(LogoutRequest { user_id, username }): ValidJson<LogoutRequest>,
) -> AppResult<Json<LogoutResponse>> {
    if let Some(user_id) = user_id.as_deref().filter(|id| !id.is_empty()) {
        presence::logout(store.as_ref(), user_id, &username).await;
    }

    Ok(Json(LogoutResponse { success: true }))
}
