//! Login and logout as store mutations plus the join/leave notices other
//! users see in the feed. One online session per username.

use crate::{
    appresult::{AppError, AppResult},
    db::{MessageKind, NewMessage, User},
    store::ChatStore,
};

pub async fn login(store: &dyn ChatStore, username: &str) -> AppResult<User> {
    let user = match store.get_user_by_username(username).await {
        Some(user) if user.is_online => return Err(AppError::UsernameTaken),
        Some(user) => {
            // a concurrent login may have flipped the flag since the lookup
            if store.update_user_online_status(&user.id, true).await == Some(true) {
                return Err(AppError::UsernameTaken);
            }
            tracing::info!(user_id = %user.id, username, "user rejoined");
            announce(store, MessageKind::Join, &user.id, username, "rejoined the chat").await;

            store
                .get_user(&user.id)
                .await
                .ok_or_else(|| anyhow::anyhow!("user {} vanished during login", user.id))?
        }
        None => {
            let user = store.create_user(username).await?;
            tracing::info!(user_id = %user.id, username, "user created");
            announce(store, MessageKind::Join, &user.id, username, "joined the chat").await;
            user
        }
    };

    Ok(user)
}

/// Marks `user_id` offline and posts a leave notice under `username`.
/// Unknown ids are not an error; the notice is posted regardless.
pub async fn logout(store: &dyn ChatStore, user_id: &str, username: &str) {
    if store.update_user_online_status(user_id, false).await.is_none() {
        tracing::debug!(%user_id, "logout for unknown user");
    } else if let Some(stored) = store.get_user(user_id).await {
        if stored.username != username {
            tracing::warn!(%user_id, stored = %stored.username, claimed = username, "logout username mismatch");
        }
    }

    tracing::info!(%user_id, username, "user left");
    announce(store, MessageKind::Leave, user_id, username, "left the chat").await;
}

async fn announce(store: &dyn ChatStore, kind: MessageKind, user_id: &str, username: &str, what: &str) {
    store
        .create_message(NewMessage::system(kind, user_id, username, format!("{username} {what}")))
        .await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::store::{MemStore, MessageRepository, UserRepository};

    use super::*;

    async fn feed(store: &MemStore) -> Vec<(MessageKind, String)> {
        store
            .get_messages(usize::MAX)
            .await
            .into_iter()
            .map(|msg| (msg.kind, msg.content))
            .collect()
    }

    #[tokio::test]
    async fn login_logout_relogin_cycle() {
        let store = MemStore::new();

        let alice = login(&store, "alice").await.unwrap();
        assert!(alice.is_online);
        assert_eq!(feed(&store).await, [(MessageKind::Join, "alice joined the chat".to_owned())]);

        assert!(matches!(login(&store, "alice").await, Err(AppError::UsernameTaken)));

        logout(&store, &alice.id, "alice").await;
        assert!(!store.get_user(&alice.id).await.unwrap().is_online);

        let again = login(&store, "alice").await.unwrap();
        assert_eq!(again.id, alice.id);
        assert!(again.is_online);
        assert_eq!(
            feed(&store).await,
            [
                (MessageKind::Join, "alice joined the chat".to_owned()),
                (MessageKind::Leave, "alice left the chat".to_owned()),
                (MessageKind::Join, "alice rejoined the chat".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn logout_of_unknown_user_still_posts_leave() {
        let store = MemStore::new();
        let ghost = "abc123";

        logout(&store, ghost, "ghost").await;

        let msgs = store.get_messages(10).await;
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].sender_id, ghost);
        assert_eq!(msgs[0].content, "ghost left the chat");
        assert!(store.get_online_users().await.is_empty());
    }

    #[tokio::test]
    async fn logout_trusts_claimed_username() {
        let store = MemStore::new();
        let alice = login(&store, "alice").await.unwrap();

        logout(&store, &alice.id, "mallory").await;

        let last = store.get_messages(1).await.pop().unwrap();
        assert_eq!(last.sender_username, "mallory");
        assert_eq!(last.content, "mallory left the chat");
    }

    #[tokio::test]
    async fn concurrent_logins_admit_one_session() {
        let store = Arc::new(MemStore::new());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { login(store.as_ref(), "carol").await.is_ok() })
            })
            .collect();

        let mut admitted = 0;
        for task in tasks {
            if task.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(store.get_messages(usize::MAX).await.len(), 1);
    }
}
