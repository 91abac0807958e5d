//! Feed and post mutation endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Comment, LikeRequest, Post, RetruthRequest};

impl ApiClient {
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.get(self.url(&["api", "posts"])?).await
    }

    /// Create a client-built post. The response body is not used.
    pub async fn create_post(&self, post: &Post) -> Result<()> {
        self.send_unit(Method::POST, self.url(&["api", "posts"])?, Some(post))
            .await
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.send_unit::<()>(
            Method::DELETE,
            self.url(&["api", "posts", post_id])?,
            None,
        )
        .await
    }

    /// Like or unlike. Returns the post with the authoritative like list.
    pub async fn like_post(&self, post_id: &str, req: &LikeRequest) -> Result<Post> {
        self.send(
            Method::PATCH,
            self.url(&["api", "posts", post_id, "like"])?,
            req,
        )
        .await
    }

    pub async fn retruth_post(&self, post_id: &str, req: &RetruthRequest) -> Result<Post> {
        self.send(
            Method::PATCH,
            self.url(&["api", "posts", post_id, "retruth"])?,
            req,
        )
        .await
    }

    pub async fn add_comment(&self, post_id: &str, comment: &Comment) -> Result<()> {
        self.send_unit(
            Method::POST,
            self.url(&["api", "posts", post_id, "comments"])?,
            Some(comment),
        )
        .await
    }

    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<()> {
        self.send_unit::<()>(
            Method::DELETE,
            self.url(&["api", "posts", post_id, "comments", comment_id])?,
            None,
        )
        .await
    }

    pub async fn like_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        req: &LikeRequest,
    ) -> Result<Comment> {
        self.send(
            Method::PATCH,
            self.url(&["api", "posts", post_id, "comments", comment_id, "like"])?,
            req,
        )
        .await
    }
}
