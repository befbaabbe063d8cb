mod login;
mod logout;

use axum::{routing::post, Router};

use crate::AppState;

pub use login::{login, LoginRequest, LoginResponse};
pub use logout::{logout, LogoutRequest, LogoutResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}
