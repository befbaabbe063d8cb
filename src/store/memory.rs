use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{Message, NewMessage, User};

use super::{MessageRepository, StoreError, UserRepository};

#[derive(Default)]
struct Users {
    by_id: HashMap<String, User>,
    // username -> id, written under the same lock as `by_id`
    by_username: HashMap<String, String>,
}

/// Process-lifetime store. Messages are kept in insertion order, which is
/// also timestamp order since timestamps never go backwards.
#[derive(Default)]
pub struct MemStore {
    users: RwLock<Users>,
    messages: RwLock<Vec<Message>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemStore {
    async fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().await.by_id.get(id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned()
    }

    async fn create_user(&self, username: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.by_username.contains_key(username) {
            return Err(StoreError::UsernameTaken(username.to_owned()));
        }

        let user = User {
            id: Uuid::now_v7().to_string(),
            username: username.to_owned(),
            is_online: true,
            last_seen: OffsetDateTime::now_utc(),
        };
        users.by_username.insert(user.username.clone(), user.id.clone());
        users.by_id.insert(user.id.clone(), user.clone());

        Ok(user)
    }

    async fn update_user_online_status(&self, id: &str, is_online: bool) -> Option<bool> {
        let mut users = self.users.write().await;
        let user = users.by_id.get_mut(id)?;

        let was_online = user.is_online;
        user.is_online = is_online;
        user.last_seen = OffsetDateTime::now_utc();

        Some(was_online)
    }

    async fn get_online_users(&self) -> Vec<User> {
        let mut online: Vec<User> = self
            .users
            .read()
            .await
            .by_id
            .values()
            .filter(|user| user.is_online)
            .cloned()
            .collect();
        online.sort_by(|a, b| a.username.cmp(&b.username));
        online
    }
}

#[async_trait]
impl MessageRepository for MemStore {
    async fn create_message(&self, message: NewMessage) -> Message {
        let mut messages = self.messages.write().await;

        let now = OffsetDateTime::now_utc();
        let timestamp = match messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        let message = Message {
            id: Uuid::now_v7(),
            content: message.content,
            sender_id: message.sender_id,
            sender_username: message.sender_username,
            kind: message.kind.unwrap_or_default(),
            timestamp,
        };
        messages.push(message.clone());

        message
    }

    async fn get_messages(&self, limit: usize) -> Vec<Message> {
        let messages = self.messages.read().await;
        let start = messages.len().saturating_sub(limit);
        messages[start..].to_vec()
    }

    async fn get_messages_after(&self, after: OffsetDateTime) -> Vec<Message> {
        let messages = self.messages.read().await;
        let start = messages.partition_point(|msg| msg.timestamp <= after);
        messages[start..].to_vec()
    }
}
