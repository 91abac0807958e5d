//! Direct message endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Conversation, DirectMessage, SendDirectMessage};

impl ApiClient {
    pub async fn conversations(&self, user_id: &str) -> Result<Vec<Conversation>> {
        self.get(self.url(&["api", "messages", "conversations", user_id])?)
            .await
    }

    /// All messages exchanged between two users, oldest first.
    pub async fn thread(&self, user_id: &str, other_id: &str) -> Result<Vec<DirectMessage>> {
        self.get(self.url(&["api", "messages", "between", user_id, other_id])?)
            .await
    }

    pub async fn send_direct_message(&self, message: &SendDirectMessage) -> Result<()> {
        self.send_unit(Method::POST, self.url(&["api", "messages"])?, Some(message))
            .await
    }
}
