use api::{Comment, Post};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use store::{feed, time};

use crate::icons::{FaCircleCheck, FaComment, FaHeart, FaRetweet, FaTrash};
use crate::session::{open_profile, use_api, use_session};
use crate::toast::use_toaster;
use crate::Icon;

/// How often relative timestamps are re-rendered.
const RELATIVE_TIME_REFRESH_MS: u64 = 30_000;

/// A list of posts. Every interaction patches `posts` in place once the
/// server answered.
#[component]
pub fn PostList(posts: Signal<Vec<Post>>, #[props(default = false)] allow_delete: bool) -> Element {
    let mut now = use_signal(Utc::now);

    use_hook(move || {
        spawn(async move {
            loop {
                crate::browser::sleep(RELATIVE_TIME_REFRESH_MS).await;
                now.set(Utc::now());
            }
        })
    });

    let list = posts();

    rsx! {
        div {
            class: "post-list",
            if list.is_empty() {
                p { class: "muted empty", "No posts yet." }
            }
            for post in list {
                PostCard {
                    key: "{post.id}",
                    post,
                    posts,
                    now: now(),
                    read_only: false,
                    allow_delete,
                }
            }
        }
    }
}

#[component]
pub fn PostCard(
    post: Post,
    posts: Signal<Vec<Post>>,
    now: DateTime<Utc>,
    #[props(default = false)] read_only: bool,
    #[props(default = true)] allow_delete: bool,
) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut show_comments = use_signal(|| false);
    let mut posts = posts;

    let me = session().user.clone();
    let member = session().is_member();
    let interactive = member && !read_only;
    let liked = me.as_ref().is_some_and(|u| feed::has_liked(&post, &u.id));
    let retruthed = me.as_ref().is_some_and(|u| feed::has_retruthed(&post, &u.id));
    let deletable = interactive && allow_delete && feed::can_delete(&post.username, me.as_ref());

    let on_like = {
        let api = api.clone();
        let post = post.clone();
        move |_| {
            let Some(user_id) = session.peek().user_id().map(str::to_string) else {
                return;
            };
            let req = feed::like_request(&post, &user_id);
            let api = api.clone();
            let id = post.id.clone();
            spawn(async move {
                match api.like_post(&id, &req).await {
                    Ok(updated) => feed::apply_like(&mut posts.write(), updated),
                    Err(e) => toaster.error(e.user_message("Failed to like post!")),
                }
            });
        }
    };

    let on_retruth = {
        let api = api.clone();
        let post = post.clone();
        move |_| {
            let Some(user_id) = session.peek().user_id().map(str::to_string) else {
                return;
            };
            let req = feed::retruth_request(&post, &user_id);
            let api = api.clone();
            let id = post.id.clone();
            spawn(async move {
                match api.retruth_post(&id, &req).await {
                    Ok(updated) => feed::apply_retruth(&mut posts.write(), updated),
                    Err(e) => toaster.error(e.user_message("Failed to retruth post!")),
                }
            });
        }
    };

    let on_delete = {
        let api = api.clone();
        let id = post.id.clone();
        move |_| {
            let api = api.clone();
            let id = id.clone();
            spawn(async move {
                match api.delete_post(&id).await {
                    Ok(()) => {
                        feed::remove_post(&mut posts.write(), &id);
                        toaster.success("Post deleted successfully!");
                    }
                    Err(e) => {
                        tracing::warn!(post = %id, "delete failed: {e}");
                        toaster.error("Failed to delete post!");
                    }
                }
            });
        }
    };

    let on_author = {
        let api = api.clone();
        let username = post.username.clone();
        move |_| {
            let api = api.clone();
            let username = username.clone();
            spawn(async move { open_profile(&api, session, toaster, &username).await });
        }
    };

    let images = post.images.clone().unwrap_or_default();

    rsx! {
        article {
            class: "post-card",
            header {
                class: "post-header",
                img { class: "avatar", src: "{post.image_url}", alt: "" }
                div {
                    class: "post-author",
                    onclick: on_author,
                    span { class: "post-name", "{post.name}" }
                    if post.verified {
                        span {
                            class: "verified-badge",
                            title: "Verified",
                            Icon { icon: FaCircleCheck, width: 12, height: 12 }
                        }
                    }
                    span { class: "muted", "@{post.username}" }
                }
                div {
                    class: "post-time",
                    title: "{time::full_time(&post.created_at)}",
                    span { "{time::post_time(&post.created_at)}" }
                    span { class: "muted", "{time::relative_time(&post.created_at, now)}" }
                }
            }

            if !post.text.is_empty() {
                p { class: "post-text", "{post.text}" }
            }
            if !images.is_empty() {
                div {
                    class: "post-images",
                    for (i, src) in images.into_iter().enumerate() {
                        img { key: "{i}", src: "{src}", alt: "" }
                    }
                }
            }

            footer {
                class: "post-actions",
                button {
                    class: if liked { "action liked" } else { "action" },
                    disabled: !interactive,
                    onclick: on_like,
                    Icon { icon: FaHeart, width: 14, height: 14 }
                    span { "{post.likes.len()}" }
                }
                button {
                    class: if retruthed { "action retruthed" } else { "action" },
                    disabled: !interactive,
                    onclick: on_retruth,
                    Icon { icon: FaRetweet, width: 14, height: 14 }
                    span { "{post.retruths.len()}" }
                }
                button {
                    class: "action",
                    onclick: move |_| show_comments.toggle(),
                    Icon { icon: FaComment, width: 14, height: 14 }
                    span { "{post.comments.len()}" }
                }
                if deletable {
                    button {
                        class: "action danger",
                        title: "Delete post",
                        onclick: on_delete,
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            }

            if show_comments() || read_only {
                Comments {
                    post_id: post.id.clone(),
                    comments: post.comments.clone(),
                    posts,
                    interactive,
                }
            }
        }
    }
}

#[component]
fn Comments(
    post_id: String,
    comments: Vec<Comment>,
    posts: Signal<Vec<Post>>,
    interactive: bool,
) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut draft = use_signal(String::new);
    let mut posts = posts;

    let on_add = {
        let api = api.clone();
        let post_id = post_id.clone();
        move |_| {
            let Some(me) = session.peek().user.clone() else {
                return;
            };
            let comment = match feed::build_comment(&me, &draft(), Utc::now()) {
                Ok(c) => c,
                Err(e) => {
                    toaster.error(e.to_string());
                    return;
                }
            };
            let api = api.clone();
            let post_id = post_id.clone();
            spawn(async move {
                match api.add_comment(&post_id, &comment).await {
                    Ok(()) => {
                        feed::add_comment(&mut posts.write(), &post_id, comment);
                        draft.set(String::new());
                        toaster.success("Comment added successfully!");
                    }
                    Err(e) => {
                        tracing::warn!(post = %post_id, "comment failed: {e}");
                        toaster.error("Failed to add comment!");
                    }
                }
            });
        }
    };

    let me = session().user.clone();

    rsx! {
        div {
            class: "comments",
            for comment in comments {
                CommentRow {
                    key: "{comment.id}",
                    post_id: post_id.clone(),
                    deletable: interactive && feed::can_delete(&comment.username, me.as_ref()),
                    liked: me.as_ref().is_some_and(|u| feed::comment_liked(&comment, &u.id)),
                    comment,
                    posts,
                    interactive,
                }
            }
            if interactive {
                div {
                    class: "comment-compose",
                    input {
                        r#type: "text",
                        placeholder: "Write a comment",
                        value: draft(),
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                    }
                    button { class: "btn primary small", onclick: on_add, "Reply" }
                }
            }
        }
    }
}

#[component]
fn CommentRow(
    post_id: String,
    comment: Comment,
    posts: Signal<Vec<Post>>,
    interactive: bool,
    deletable: bool,
    liked: bool,
) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut posts = posts;

    let on_like = {
        let api = api.clone();
        let post_id = post_id.clone();
        let comment = comment.clone();
        move |_| {
            let Some(user_id) = session.peek().user_id().map(str::to_string) else {
                return;
            };
            let req = feed::comment_like_request(&comment, &user_id);
            let api = api.clone();
            let post_id = post_id.clone();
            let comment_id = comment.id.clone();
            spawn(async move {
                match api.like_comment(&post_id, &comment_id, &req).await {
                    Ok(updated) => feed::replace_comment(&mut posts.write(), &post_id, updated),
                    Err(e) => toaster.error(e.user_message("Failed to like comment!")),
                }
            });
        }
    };

    let on_delete = {
        let api = api.clone();
        let post_id = post_id.clone();
        let comment_id = comment.id.clone();
        move |_| {
            let api = api.clone();
            let post_id = post_id.clone();
            let comment_id = comment_id.clone();
            spawn(async move {
                match api.delete_comment(&post_id, &comment_id).await {
                    Ok(()) => {
                        feed::remove_comment(&mut posts.write(), &post_id, &comment_id);
                        toaster.success("Comment deleted successfully!");
                    }
                    Err(e) => {
                        tracing::warn!(comment = %comment_id, "delete failed: {e}");
                        toaster.error("Failed to delete comment!");
                    }
                }
            });
        }
    };

    rsx! {
        div {
            class: "comment",
            img { class: "avatar small", src: "{comment.image_url}", alt: "" }
            div {
                class: "comment-body",
                div {
                    class: "comment-meta",
                    span { class: "post-name", "{comment.name}" }
                    span { class: "muted", "@{comment.username} · {time::post_time(&comment.created_at)}" }
                }
                p { "{comment.text}" }
            }
            button {
                class: if liked { "action liked" } else { "action" },
                disabled: !interactive,
                onclick: on_like,
                Icon { icon: FaHeart, width: 12, height: 12 }
                span { "{comment.likes.len()}" }
            }
            if deletable {
                button {
                    class: "action danger",
                    title: "Delete comment",
                    onclick: on_delete,
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}
