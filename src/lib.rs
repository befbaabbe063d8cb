pub mod appresult;
pub mod auth;
pub mod config;
pub mod db;
pub mod json;
pub mod messages;
pub mod presence;
pub mod store;
pub mod users;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
use crate::config::Config;
use store::{ChatStore, MemStore};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<dyn ChatStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn ChatStore>, config: Config) -> Self {
        Self { store, config: Arc::new(config) }
    }

    /// Fresh in-memory room.
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(MemStore::new()), config)
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))

        .merge(messages::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())

        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}
