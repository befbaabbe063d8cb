mod memory;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::db::{Message, NewMessage, User};

pub use memory::MemStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username `{0}` already exists")]
    UsernameTaken(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: &str) -> Option<User>;

    /// Exact, case-sensitive match.
    async fn get_user_by_username(&self, username: &str) -> Option<User>;

    /// Creates an online user with a fresh id. Fails if the username is already known.
    async fn create_user(&self, username: &str) -> Result<User, StoreError>;

    /// Writes `is_online` and bumps `last_seen`. Returns the previous flag,
    /// or `None` when no user has this id.
    async fn update_user_online_status(&self, id: &str, is_online: bool) -> Option<bool>;

    async fn get_online_users(&self) -> Vec<User>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create_message(&self, message: NewMessage) -> Message;

    /// The newest `limit` messages, oldest first.
    async fn get_messages(&self, limit: usize) -> Vec<Message>;

    /// Every message strictly newer than `after`, oldest first.
    async fn get_messages_after(&self, after: OffsetDateTime) -> Vec<Message>;
}

pub trait ChatStore: UserRepository + MessageRepository {}

impl<T: UserRepository + MessageRepository> ChatStore for T {}
