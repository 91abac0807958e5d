//! Ranked aggregates. Each list is already sorted by the backend.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Post, RankedUser};

impl ApiClient {
    pub async fn most_liked_posts(&self) -> Result<Vec<Post>> {
        self.get(self.url(&["api", "posts", "most-liked"])?).await
    }

    pub async fn most_retruthed_posts(&self) -> Result<Vec<Post>> {
        self.get(self.url(&["api", "posts", "most-retruths"])?).await
    }

    pub async fn most_followed_users(&self) -> Result<Vec<RankedUser>> {
        self.get(self.url(&["api", "users", "most-followers"])?).await
    }

    pub async fn most_contributing_users(&self) -> Result<Vec<RankedUser>> {
        self.get(self.url(&["api", "users", "most-contributions"])?).await
    }

    pub async fn most_posting_users(&self) -> Result<Vec<RankedUser>> {
        self.get(self.url(&["api", "users", "most-posts"])?).await
    }
}
