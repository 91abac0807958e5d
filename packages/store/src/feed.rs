//! # Feed patches
//!
//! Every feed mutation is a server round trip. Nothing changes locally before
//! the response; afterwards exactly one post (or one comment of one post) is
//! patched in place. These helpers build the request bodies and apply the
//! patches.

use api::{Comment, LikeRequest, Post, RetruthRequest, User};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ValidationError;

pub const MAX_IMAGES: usize = 5;

pub fn has_liked(post: &Post, user_id: &str) -> bool {
    post.likes.iter().any(|u| u.id == user_id)
}

pub fn has_retruthed(post: &Post, user_id: &str) -> bool {
    post.retruths.iter().any(|u| u.id == user_id)
}

pub fn comment_liked(comment: &Comment, user_id: &str) -> bool {
    comment.likes.iter().any(|u| u.id == user_id)
}

/// The opposite of the user's current like state.
pub fn like_request(post: &Post, user_id: &str) -> LikeRequest {
    LikeRequest {
        user_id: user_id.to_string(),
        unlike: has_liked(post, user_id),
    }
}

pub fn retruth_request(post: &Post, user_id: &str) -> RetruthRequest {
    RetruthRequest {
        user_id: user_id.to_string(),
        unretruth: has_retruthed(post, user_id),
    }
}

pub fn comment_like_request(comment: &Comment, user_id: &str) -> LikeRequest {
    LikeRequest {
        user_id: user_id.to_string(),
        unlike: comment_liked(comment, user_id),
    }
}

fn find_post<'a>(posts: &'a mut [Post], post_id: &str) -> Option<&'a mut Post> {
    posts.iter_mut().find(|p| p.id == post_id)
}

/// Take the server's like list for that post. Everything else stays.
pub fn apply_like(posts: &mut [Post], updated: Post) {
    if let Some(post) = find_post(posts, &updated.id) {
        post.likes = updated.likes;
    }
}

pub fn apply_retruth(posts: &mut [Post], updated: Post) {
    if let Some(post) = find_post(posts, &updated.id) {
        post.retruths = updated.retruths;
    }
}

pub fn add_comment(posts: &mut [Post], post_id: &str, comment: Comment) {
    if let Some(post) = find_post(posts, post_id) {
        post.comments.push(comment);
    }
}

pub fn remove_comment(posts: &mut [Post], post_id: &str, comment_id: &str) {
    if let Some(post) = find_post(posts, post_id) {
        post.comments.retain(|c| c.id != comment_id);
    }
}

pub fn replace_comment(posts: &mut [Post], post_id: &str, updated: Comment) {
    if let Some(post) = find_post(posts, post_id) {
        if let Some(slot) = post.comments.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
        }
    }
}

pub fn remove_post(posts: &mut Vec<Post>, post_id: &str) {
    posts.retain(|p| p.id != post_id);
}

pub fn prepend_post(posts: &mut Vec<Post>, post: Post) {
    posts.insert(0, post);
}

/// Only the author may delete.
pub fn can_delete(author_username: &str, current: Option<&User>) -> bool {
    current.is_some_and(|u| u.username == author_username)
}

/// Posts written by `username`, in feed order.
pub fn posts_by(posts: &[Post], username: &str) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.username == username)
        .cloned()
        .collect()
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a new post for `author`. Text and images cannot both be empty.
pub fn build_post(
    author: &User,
    text: &str,
    images: Vec<String>,
    now: DateTime<Utc>,
) -> Result<Post, ValidationError> {
    let text = text.trim();
    if text.is_empty() && images.is_empty() {
        return Err(ValidationError::EmptyPost);
    }
    if images.len() > MAX_IMAGES {
        return Err(ValidationError::TooManyImages { max: MAX_IMAGES });
    }
    Ok(Post {
        id: uuid::Uuid::new_v4().to_string(),
        name: author.name.clone(),
        username: author.username.clone(),
        image_url: author.image_url.clone(),
        text: text.to_string(),
        likes: Vec::new(),
        retruths: Vec::new(),
        comments: Vec::new(),
        created_at: timestamp(now),
        images: (!images.is_empty()).then_some(images),
        verified: author.verified,
    })
}

pub fn build_comment(
    author: &User,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Comment, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(Comment {
        id: uuid::Uuid::new_v4().to_string(),
        name: author.name.clone(),
        username: author.username.clone(),
        image_url: author.image_url.clone(),
        text: text.to_string(),
        created_at: timestamp(now),
        likes: Vec::new(),
    })
}

/// Whether a picked file may be attached, given `attached` images so far.
pub fn accepts_image(content_type: &str, attached: usize) -> bool {
    content_type.starts_with("image/") && attached < MAX_IMAGES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            name: id.to_uppercase(),
            username: id.into(),
            ..Default::default()
        }
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.into(),
            username: "ann".into(),
            text: "gm".into(),
            ..Default::default()
        }
    }

    /// What the backend does with a like request.
    fn server_like(mut post: Post, req: &LikeRequest) -> Post {
        if req.unlike {
            post.likes.retain(|u| u.id != req.user_id);
        } else {
            post.likes.push(user(&req.user_id));
        }
        post
    }

    #[test]
    fn test_like_toggle_twice_restores_membership() {
        let mut feed = vec![post("p1"), post("p2")];
        let before = feed[0].likes.clone();

        for _ in 0..2 {
            let req = like_request(&feed[0], "bo");
            let updated = server_like(feed[0].clone(), &req);
            apply_like(&mut feed, updated);
        }
        assert_eq!(feed[0].likes, before);

        let req = like_request(&feed[0], "bo");
        assert!(!req.unlike);
        let updated = server_like(feed[0].clone(), &req);
        apply_like(&mut feed, updated);
        assert!(has_liked(&feed[0], "bo"));
        assert!(like_request(&feed[0], "bo").unlike);
        assert!(feed[1].likes.is_empty());
    }

    #[test]
    fn test_apply_only_touches_that_list() {
        let mut feed = vec![post("p1")];
        let mut updated = post("p1");
        updated.text = "server text".into();
        updated.retruths.push(user("cy"));
        apply_retruth(&mut feed, updated);
        assert_eq!(feed[0].text, "gm");
        assert!(has_retruthed(&feed[0], "cy"));
        assert!(retruth_request(&feed[0], "cy").unretruth);
    }

    #[test]
    fn test_comment_patches_are_scoped_to_one_post() {
        let mut feed = vec![post("p1"), post("p2")];
        let comment = build_comment(&user("bo"), " nice ", Utc::now()).unwrap();
        assert_eq!(comment.text, "nice");
        add_comment(&mut feed, "p2", comment.clone());
        assert!(feed[0].comments.is_empty());
        assert_eq!(feed[1].comments.len(), 1);

        let mut liked = comment.clone();
        liked.likes.push(user("ann"));
        replace_comment(&mut feed, "p2", liked);
        assert!(comment_liked(&feed[1].comments[0], "ann"));

        remove_comment(&mut feed, "p2", &comment.id);
        assert!(feed[1].comments.is_empty());
        assert_eq!(build_comment(&user("bo"), "  ", Utc::now()), Err(ValidationError::EmptyComment));
    }

    #[test]
    fn test_build_post_validation() {
        let ann = user("ann");
        assert_eq!(
            build_post(&ann, "  ", vec![], Utc::now()),
            Err(ValidationError::EmptyPost)
        );
        let six = vec!["data:image/png;base64,AA==".to_string(); 6];
        assert_eq!(
            build_post(&ann, "", six, Utc::now()),
            Err(ValidationError::TooManyImages { max: 5 })
        );

        let only_image = build_post(&ann, "", vec!["data:x".into()], Utc::now()).unwrap();
        assert_eq!(only_image.images.as_deref(), Some(&["data:x".to_string()][..]));

        let text_only = build_post(&ann, "gm", vec![], Utc::now()).unwrap();
        assert!(text_only.images.is_none());
        assert!(text_only.likes.is_empty() && text_only.comments.is_empty());
        assert_eq!(text_only.username, "ann");
    }

    #[test]
    fn test_prepend_and_remove() {
        let mut feed = vec![post("p1")];
        prepend_post(&mut feed, post("p0"));
        assert_eq!(feed[0].id, "p0");
        remove_post(&mut feed, "p1");
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_delete_rights_and_filters() {
        let ann = user("ann");
        assert!(can_delete("ann", Some(&ann)));
        assert!(!can_delete("bo", Some(&ann)));
        assert!(!can_delete("ann", None));

        let feed = vec![post("p1"), Post { username: "bo".into(), ..post("p2") }];
        assert_eq!(posts_by(&feed, "bo").len(), 1);

        assert!(accepts_image("image/png", 4));
        assert!(!accepts_image("image/png", 5));
        assert!(!accepts_image("application/pdf", 0));
    }
}
