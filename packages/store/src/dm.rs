//! Direct-message view helpers.

use api::{Conversation, DirectMessage, SendDirectMessage};

use crate::error::ValidationError;

pub const SENT: &str = "Message sent!";

/// Keep the current selection, or pick the first conversation when there is
/// none.
pub fn initial_selection(conversations: &[Conversation], selected: Option<&str>) -> Option<String> {
    match selected {
        Some(id) => Some(id.to_string()),
        None => conversations.first().map(|c| c.user_id.clone()),
    }
}

pub fn build_message(
    sender_id: &str,
    receiver_username: &str,
    content: &str,
) -> Result<SendDirectMessage, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(SendDirectMessage {
        sender_id: sender_id.to_string(),
        receiver_username: receiver_username.to_string(),
        content: content.to_string(),
    })
}

/// Messages sent by the current user align right.
pub fn is_outgoing(message: &DirectMessage, current_user_id: &str) -> bool {
    message.sender.id == current_user_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(user_id: &str) -> Conversation {
        Conversation {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_conversation_is_selected() {
        let convs = vec![conv("u2"), conv("u3")];
        assert_eq!(initial_selection(&convs, None).as_deref(), Some("u2"));
        assert_eq!(initial_selection(&convs, Some("u3")).as_deref(), Some("u3"));
        assert_eq!(initial_selection(&[], None), None);
    }

    #[test]
    fn test_empty_message_is_rejected() {
        assert_eq!(build_message("u1", "bo", "  "), Err(ValidationError::EmptyMessage));
        let msg = build_message("u1", "bo", " hey ").unwrap();
        assert_eq!(msg.content, "hey");
        assert_eq!(msg.receiver_username, "bo");
    }

    #[test]
    fn test_outgoing_alignment() {
        let mut m = DirectMessage::default();
        m.sender.id = "u1".into();
        assert!(is_outgoing(&m, "u1"));
        assert!(!is_outgoing(&m, "u2"));
    }
}
