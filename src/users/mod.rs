use std::sync::Arc;

use axum::{debug_handler, extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{db::User, store::ChatStore, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/online", get(online))
}

#[derive(Debug, Serialize)]
pub struct OnlineUsers {
    pub count: usize,
    pub users: Vec<User>,
}

#[debug_handler(state = crate::AppState)]
pub async fn online(State(store): State<Arc<dyn ChatStore>>) -> AppResult<Json<OnlineUsers>> {
    let users = store.get_online_users().await;

    Ok(Json(OnlineUsers { count: users.len(), users }))
}
