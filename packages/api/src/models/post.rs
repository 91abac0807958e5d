//! Posts, comments and the bodies of their mutation endpoints.

use serde::{Deserialize, Serialize};

use super::User;

/// A post in the global feed. Author fields are copied onto the post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub likes: Vec<User>,
    #[serde(default)]
    pub retruths: Vec<User>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub verified: bool,
}

/// A comment on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub likes: Vec<User>,
}

/// Body of `PATCH /api/posts/{id}/like` and the comment-like endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_id: String,
    pub unlike: bool,
}

/// Body of `PATCH /api/posts/{id}/retruth`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RetruthRequest {
    pub user_id: String,
    pub unretruth: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_without_images_omits_field() {
        let post = Post {
            id: "p1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("images").is_none());
        assert!(value.get("imageURL").is_some());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_post_decodes_nested_comments() {
        let json = r#"{
            "id": "p1",
            "name": "Ann",
            "username": "ann",
            "text": "gm",
            "likes": [{"id": "u2"}],
            "retruths": [],
            "comments": [{"id": "c1", "text": "gm back", "likes": []}],
            "createdAt": "2025-03-01T10:00:00.000Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.likes[0].id, "u2");
        assert_eq!(post.comments[0].text, "gm back");
        assert!(post.images.is_none());
        assert!(!post.verified);
    }
}
