//! User profile endpoints.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::{check, decode, ApiClient};
use crate::error::Result;
use crate::models::{FollowRequest, ProfileUpdate, User};

impl ApiClient {
    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.get(self.url(&["api", "users", id])?).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.get(self.url(&["api", "users", "username", username])?)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get(self.url(&["api", "users"])?).await
    }

    pub async fn follow(&self, username: &str, follower: &FollowRequest) -> Result<()> {
        self.send_unit(
            Method::POST,
            self.url(&["api", "users", username, "follow"])?,
            Some(follower),
        )
        .await
    }

    pub async fn unfollow(&self, username: &str, follower: &FollowRequest) -> Result<()> {
        self.send_unit(
            Method::POST,
            self.url(&["api", "users", username, "unfollow"])?,
            Some(follower),
        )
        .await
    }

    /// Mark `username` as verified after a confirmed payment.
    pub async fn verify_user(&self, username: &str) -> Result<()> {
        self.send_unit::<()>(
            Method::PATCH,
            self.url(&["api", "users", "verify", username])?,
            None,
        )
        .await
    }

    /// Multipart profile update. Returns the updated user.
    pub async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<User> {
        let mut form = Form::new()
            .text("currentEmail", update.current_email)
            .text("name", update.name)
            .text("username", update.username)
            .text("email", update.email);
        if let Some(image) = update.image {
            let mut part = Part::bytes(image.bytes).file_name(image.file_name);
            if let Some(content_type) = image.content_type.as_deref() {
                part = part.mime_str(content_type)?;
            }
            form = form.part("image", part);
        }
        let resp = self
            .http
            .put(self.url(&["api", "users", id])?)
            .multipart(form)
            .send()
            .await?;
        decode(check(resp).await?).await
    }
}
