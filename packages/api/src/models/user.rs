//! # User records as served by the backend
//!
//! Defines the shapes a Trench Social user takes on the wire:
//!
//! ## [`User`]
//!
//! The full profile returned by `GET /api/users/{id}` and
//! `GET /api/users/username/{username}`. It carries the follower and following
//! lists inline. Each entry is itself a `User`, but the backend only fills the
//! first level, so nested lists usually arrive empty or missing. Missing lists
//! decode as empty vectors.
//!
//! ## [`LoginUser`]
//!
//! The `user` object inside the login response. Only `id` is relied upon; the
//! rest is kept verbatim so it can be persisted as the returning-session
//! snapshot.
//!
//! ## [`FollowRequest`]
//!
//! The denormalized follower snapshot sent with follow and unfollow calls.

use serde::{Deserialize, Serialize};

/// A user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub followers: Vec<User>,
    #[serde(default)]
    pub following: Vec<User>,
    #[serde(default)]
    pub verified: bool,
}

impl User {
    /// Display handle with the leading `@`.
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    /// Whether the user with `user_id` appears in this user's followers.
    pub fn is_followed_by(&self, user_id: &str) -> bool {
        self.followers.iter().any(|f| f.id == user_id)
    }
}

/// The `user` object returned by `POST /api/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginUser {
    pub id: String,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// Response body of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: LoginUser,
}

/// A user row in the follower/contribution/post-count leaderboards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub comment_count: u64,
}

/// Body of `POST /api/users/{username}/follow` and `/unfollow`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub follower_id: String,
    pub follower_name: String,
    pub follower_username: String,
    #[serde(rename = "followerImageURL")]
    pub follower_image_url: String,
}

impl From<&User> for FollowRequest {
    fn from(user: &User) -> Self {
        Self {
            follower_id: user.id.clone(),
            follower_name: user.name.clone(),
            follower_username: user.username.clone(),
            follower_image_url: user.image_url.clone(),
        }
    }
}

/// Fields of the multipart profile update. The image travels as raw bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub current_email: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub image: Option<ImageUpload>,
}

/// A file chosen in the browser for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decodes_backend_shape() {
        let json = r#"{
            "id": "u1",
            "name": "Ann",
            "username": "ann",
            "email": "ann@example.com",
            "imageURL": "https://img/ann.png",
            "createdAt": "2025-03-01T10:00:00.000Z",
            "followers": [{"id": "u2", "name": "Bo", "username": "bo"}],
            "verified": true
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.image_url, "https://img/ann.png");
        assert_eq!(user.followers.len(), 1);
        assert!(user.following.is_empty());
        assert!(user.is_followed_by("u2"));
        assert!(!user.is_followed_by("u3"));
        assert_eq!(user.handle(), "@ann");
    }

    #[test]
    fn test_follow_request_field_names() {
        let user = User {
            id: "u1".into(),
            name: "Ann".into(),
            username: "ann".into(),
            image_url: "pic".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(FollowRequest::from(&user)).unwrap();
        assert_eq!(value["followerId"], "u1");
        assert_eq!(value["followerUsername"], "ann");
        assert_eq!(value["followerImageURL"], "pic");
    }

    #[test]
    fn test_ranked_user_keeps_counters() {
        let json = r#"{"id": "u1", "name": "Ann", "username": "ann", "postCount": 4, "commentCount": 7}"#;
        let ranked: RankedUser = serde_json::from_str(json).unwrap();
        assert_eq!(ranked.user.username, "ann");
        assert_eq!(ranked.post_count + ranked.comment_count, 11);
    }

    #[test]
    fn test_login_user_preserves_extra_fields() {
        let json = r#"{"user": {"id": "u1", "email": "ann@example.com"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.user.id, "u1");
        assert_eq!(resp.user.rest["email"], "ann@example.com");
    }
}
