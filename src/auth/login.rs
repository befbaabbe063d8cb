use std::sync::Arc;

use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    config::Config,
    db::User,
    json::{FieldOrder, ValidJson},
    presence,
    store::ChatStore,
    AppError, AppResult,
};

pub const MAX_USERNAME_LEN: usize = 50;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl FieldOrder for LoginRequest {
    const FIELDS: &'static [&'static str] = &["username", "password"];
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    let message = if len == 0 {
        "Username is required"
    } else if len > MAX_USERNAME_LEN {
        "Username too long"
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new("length");
    err.message = Some(message.into());
    Err(err)
}

#[debug_handler(state = crate::AppState)]
pub async fn login(
    State(store): State<Arc<dyn ChatStore>>,
    State(config): State<Arc<Config>>,
    ValidJson(LoginRequest { username, password }): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if password != config.chat.password {
        tracing::debug!(username, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let user = presence::login(store.as_ref(), &username).await?;

    Ok(Json(LoginResponse { user }))
}
