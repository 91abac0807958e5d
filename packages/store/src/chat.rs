//! # Live chat log
//!
//! Local view of the shared chat room. The socket delivers a backlog snapshot
//! once and then single pushes; [`ChatLog::apply`] folds both into the list.
//!
//! A second backlog replaces the list wholesale, dropping any pushes received
//! since the first one. Messages are never reordered or deduplicated.
//!
//! Sending never appends locally: [`ChatLog::compose`] only builds the outgoing
//! message and consumes the pending reply. The message shows up once the
//! server echoes it back.

use api::{ChatEvent, ChatMessage, User};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ValidationError;

pub const MAX_MESSAGE_CHARS: usize = 250;

/// Characters of the parent shown inside a rendered reply.
pub const REPLY_EXCERPT_CHARS: usize = 20;

/// Characters of the pending reply target shown above the input.
pub const PENDING_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    pending_reply: Option<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Backlog(messages) => self.messages = messages,
            ChatEvent::Received(message) => self.messages.push(message),
            ChatEvent::Connected | ChatEvent::Closed => {}
        }
    }

    /// Set the pending reply to a copy of `message`. Replying to your own
    /// messages is not offered.
    pub fn select_reply(&mut self, message: &ChatMessage, current_username: &str) -> bool {
        if message.username == current_username {
            return false;
        }
        self.pending_reply = Some(message.clone());
        true
    }

    pub fn cancel_reply(&mut self) {
        self.pending_reply = None;
    }

    pub fn pending_reply(&self) -> Option<&ChatMessage> {
        self.pending_reply.as_ref()
    }

    /// Build the outgoing message for `text`. On success the pending reply is
    /// consumed; on a validation error nothing changes.
    pub fn compose(
        &mut self,
        text: &str,
        sender: &User,
        now: DateTime<Utc>,
    ) -> Result<ChatMessage, ValidationError> {
        let text = validate_message(text)?;
        Ok(ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            name: sender.name.clone(),
            username: sender.username.clone(),
            avatar_url: sender.image_url.clone(),
            text: text.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            reply_to: self.pending_reply.take().map(Box::new),
            verified: sender.verified,
        })
    }

    /// The parent to render above `message`: the live copy in the log when it
    /// is still there, else the copy embedded at send time.
    pub fn resolve_parent<'a>(&'a self, message: &'a ChatMessage) -> Option<&'a ChatMessage> {
        let embedded = message.reply_to.as_deref()?;
        Some(
            self.messages
                .iter()
                .find(|m| m.id == embedded.id)
                .unwrap_or(embedded),
        )
    }
}

/// Trimmed text, if it is sendable.
pub fn validate_message(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooLong {
            max: MAX_MESSAGE_CHARS,
        });
    }
    Ok(trimmed)
}

/// First `max` characters of `text`, with `...` when it was cut.
pub fn excerpt(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// `n / 250`
pub fn char_counter(input: &str) -> String {
    format!("{} / {}", input.chars().count(), MAX_MESSAGE_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, username: &str, text: &str) -> ChatMessage {
        ChatMessage {
            id: id.into(),
            name: username.to_uppercase(),
            username: username.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    fn sender() -> User {
        User {
            id: "u1".into(),
            name: "Ann".into(),
            username: "ann".into(),
            image_url: "https://img/ann.png".into(),
            verified: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_backlog_then_pushes_keep_arrival_order() {
        let mut log = ChatLog::new();
        log.apply(ChatEvent::Backlog(vec![msg("a", "bo", "1"), msg("b", "bo", "2")]));
        log.apply(ChatEvent::Received(msg("c", "cy", "3")));
        log.apply(ChatEvent::Received(msg("a", "bo", "dup")));
        let ids: Vec<_> = log.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "a"]);
    }

    #[test]
    fn test_second_backlog_replaces_list() {
        let mut log = ChatLog::new();
        log.apply(ChatEvent::Backlog(vec![msg("a", "bo", "1")]));
        log.apply(ChatEvent::Received(msg("b", "bo", "2")));
        log.apply(ChatEvent::Backlog(vec![msg("z", "bo", "9")]));
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].id, "z");
    }

    #[test]
    fn test_invalid_text_is_not_composed() {
        let mut log = ChatLog::new();
        log.select_reply(&msg("a", "bo", "hi"), "ann");
        assert_eq!(
            log.compose("   ", &sender(), Utc::now()),
            Err(ValidationError::EmptyMessage)
        );
        let long = "x".repeat(251);
        assert_eq!(
            log.compose(&long, &sender(), Utc::now()),
            Err(ValidationError::MessageTooLong { max: 250 })
        );
        // Failed sends keep the pending reply.
        assert!(log.pending_reply().is_some());
        assert!(log.compose(&"x".repeat(250), &sender(), Utc::now()).is_ok());
    }

    #[test]
    fn test_compose_takes_value_copy_of_reply() {
        let mut log = ChatLog::new();
        let mut parent = msg("a", "bo", "original");
        log.apply(ChatEvent::Backlog(vec![parent.clone()]));
        assert!(log.select_reply(&parent, "ann"));

        // Later edits to the source do not leak into the pending copy.
        parent.text = "edited".into();

        let now = DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let out = log.compose("  gm  ", &sender(), now).unwrap();
        assert_eq!(out.text, "gm");
        assert_eq!(out.timestamp, "2025-03-01T10:00:00.000Z");
        assert_eq!(out.avatar_url, "https://img/ann.png");
        assert!(out.verified);
        assert_eq!(out.reply_to.as_ref().unwrap().text, "original");
        assert_eq!(uuid::Uuid::parse_str(&out.id).unwrap().get_version_num(), 4);
        assert!(log.pending_reply().is_none());
        // Nothing is appended locally.
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_cannot_reply_to_own_message() {
        let mut log = ChatLog::new();
        assert!(!log.select_reply(&msg("a", "ann", "mine"), "ann"));
        assert!(log.pending_reply().is_none());
    }

    #[test]
    fn test_resolve_parent_prefers_live_copy() {
        let mut log = ChatLog::new();
        let mut reply = msg("b", "cy", "re");
        reply.reply_to = Some(Box::new(msg("a", "bo", "stale")));
        log.apply(ChatEvent::Backlog(vec![msg("a", "bo", "live"), reply.clone()]));
        assert_eq!(log.resolve_parent(&reply).unwrap().text, "live");

        log.apply(ChatEvent::Backlog(vec![reply.clone()]));
        assert_eq!(log.resolve_parent(&reply).unwrap().text, "stale");
        assert!(log.resolve_parent(&msg("c", "bo", "x")).is_none());
    }

    #[test]
    fn test_excerpts() {
        assert_eq!(excerpt("short", REPLY_EXCERPT_CHARS), "short");
        assert_eq!(
            excerpt("exactly twenty chars", REPLY_EXCERPT_CHARS),
            "exactly twenty chars"
        );
        assert_eq!(
            excerpt("this one is clearly longer", REPLY_EXCERPT_CHARS),
            "this one is clearly ..."
        );
        assert_eq!(excerpt("ñññ", 2), "ññ...");
        assert_eq!(char_counter("héllo"), "5 / 250");
    }
}
