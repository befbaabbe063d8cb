mod list;
mod msg;

use axum::{routing::get, Router};

use crate::AppState;

pub use list::{list_msgs, ListMessagesQuery};
pub use msg::{send_msg, SendMessageRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list_msgs).post(send_msg))
}
