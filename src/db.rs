use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque; generated by the store.
    pub id: String,
    pub username: String,
    pub is_online: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub last_seen: OffsetDateTime,

    // unique: id
    // unique: username
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Message,
    Join,
    Leave,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Message => "message",
            MessageKind::Join => "join",
            MessageKind::Leave => "leave",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message type `{0}`")]
pub struct UnknownMessageKind(pub String);

impl FromStr for MessageKind {
    type Err = UnknownMessageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(MessageKind::Message),
            "join" => Ok(MessageKind::Join),
            "leave" => Ok(MessageKind::Leave),
            other => Err(UnknownMessageKind(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub content: String,

    /// Not checked against known users.
    pub sender_id: String,
    /// Name at send time, never re-read from the sender's record.
    pub sender_username: String,

    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,

    // unique: id
}

/// Insertable shape of a [`Message`]; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub content: String,
    pub sender_id: String,
    pub sender_username: String,
    pub kind: Option<MessageKind>,
}

impl NewMessage {
    pub fn system(kind: MessageKind, user_id: &str, username: &str, content: String) -> Self {
        Self {
            content,
            sender_id: user_id.to_owned(),
            sender_username: username.to_owned(),
            kind: Some(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_wire_names() {
        let msg = Message {
            id: Uuid::nil(),
            content: "hi".to_owned(),
            sender_id: "abc123".to_owned(),
            sender_username: "alice".to_owned(),
            kind: MessageKind::Join,
            timestamp: OffsetDateTime::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "join");
        assert_eq!(value["senderUsername"], "alice");
        assert_eq!(value["senderId"], "abc123");
        assert_eq!(value["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn kind_parses_known_names_only() {
        assert_eq!("leave".parse::<MessageKind>(), Ok(MessageKind::Leave));
        assert!("LEAVE".parse::<MessageKind>().is_err());
        assert_eq!(MessageKind::default(), MessageKind::Message);
    }
}
