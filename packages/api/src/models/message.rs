//! Live-chat messages and direct messages.

use serde::{Deserialize, Serialize};

/// A message in the shared chat room.
///
/// `reply_to` embeds a full copy of the parent message, as the socket server
/// stores and rebroadcasts it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Box<ChatMessage>>,
    #[serde(default)]
    pub verified: bool,
}

/// One side of a direct message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
}

/// A direct message between two users.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectMessage {
    #[serde(default)]
    pub id: String,
    pub sender: Participant,
    pub receiver: Participant,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Summary of a conversation with one other user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_username: String,
    #[serde(default)]
    pub user_image: String,
    #[serde(default)]
    pub last_message: Option<DirectMessage>,
}

/// Body of `POST /api/messages`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendDirectMessage {
    pub sender_id: String,
    pub receiver_username: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_reply_is_embedded_copy() {
        let parent = ChatMessage {
            id: "m1".into(),
            name: "Ann".into(),
            text: "first".into(),
            ..Default::default()
        };
        let reply = ChatMessage {
            id: "m2".into(),
            text: "second".into(),
            reply_to: Some(Box::new(parent)),
            ..Default::default()
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["replyTo"]["id"], "m1");
        assert_eq!(value["replyTo"]["text"], "first");
        assert_eq!(value["avatarUrl"], "");
    }

    #[test]
    fn test_conversation_decodes_last_message() {
        let json = r#"{
            "id": "c1",
            "userId": "u2",
            "userName": "Bo",
            "userUsername": "bo",
            "userImage": "",
            "lastMessage": {
                "sender": {"id": "u2", "name": "Bo", "username": "bo", "imageURL": ""},
                "receiver": {"id": "u1", "name": "Ann", "username": "ann", "imageURL": ""},
                "content": "hey",
                "timestamp": "2025-03-01T10:00:00.000Z"
            }
        }"#;
        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conv.user_username, "bo");
        assert_eq!(conv.last_message.unwrap().content, "hey");
    }
}
