use api::{Post, RankedUser};
use chrono::Utc;
use dioxus::prelude::*;
use store::leaderboard::{ranked, Leaderboards, Metric, RankBadge};

use super::{ModalOverlay, PostCard};
use crate::session::{open_profile, use_api, use_session};
use crate::toast::use_toaster;

/// Five ranked lists, fetched one after the other on mount.
#[component]
pub fn LeaderboardView() -> Element {
    let api = use_api();
    let toaster = use_toaster();
    let mut boards = use_signal(Leaderboards::default);
    let mut loading = use_signal(|| true);
    let mut opened = use_signal(|| None::<Post>);

    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            let mut next = Leaderboards::default();
            let liked = api.most_liked_posts().await;
            next.most_liked = next.take(Metric::Likes, liked);
            let retruthed = api.most_retruthed_posts().await;
            next.most_retruthed = next.take(Metric::Retruths, retruthed);
            let followers = api.most_followed_users().await;
            next.most_followers = next.take(Metric::Followers, followers);
            let contributions = api.most_contributing_users().await;
            next.most_contributions = next.take(Metric::Contributions, contributions);
            let posts = api.most_posting_users().await;
            next.most_posts = next.take(Metric::Posts, posts);

            if let Some(message) = next.failure_toast() {
                toaster.error(message);
            }
            boards.set(next);
            loading.set(false);
        }
    });

    if loading() {
        return rsx! {
            p { class: "muted empty", "Loading leaderboards..." }
        };
    }

    let b = boards();

    rsx! {
        section {
            class: "leaderboards",
            PostBoard {
                metric: Metric::Likes,
                posts: b.most_liked.clone(),
                on_open: move |p| opened.set(Some(p)),
            }
            PostBoard {
                metric: Metric::Retruths,
                posts: b.most_retruthed.clone(),
                on_open: move |p| opened.set(Some(p)),
            }
            UserBoard { metric: Metric::Followers, users: b.most_followers.clone() }
            UserBoard { metric: Metric::Contributions, users: b.most_contributions.clone() }
            UserBoard { metric: Metric::Posts, users: b.most_posts.clone() }
        }

        if let Some(post) = opened() {
            ModalOverlay {
                wide: true,
                on_close: move |_| opened.set(None),
                ReadOnlyPost { post }
            }
        }
    }
}

fn badge_class(badge: &RankBadge) -> String {
    match badge.tier {
        Some(tier) => format!("rank-badge {tier}"),
        None => "rank-badge".to_string(),
    }
}

#[component]
fn PostBoard(metric: Metric, posts: Vec<Post>, on_open: EventHandler<Post>) -> Element {
    rsx! {
        div {
            class: "board",
            h3 { "{metric.title()}" }
            if posts.is_empty() {
                p { class: "muted", "Nothing ranked yet." }
            }
            ol {
                for (badge, post) in ranked(&posts) {
                    li {
                        key: "{post.id}",
                        class: "board-row",
                        onclick: {
                            let post = post.clone();
                            move |_| on_open.call(post.clone())
                        },
                        span { class: badge_class(&badge), "{badge.label}" }
                        div {
                            class: "board-entry",
                            span { class: "post-name", "@{post.username}" }
                            span { class: "muted ellipsis", "{post.text}" }
                        }
                        span { class: "board-value", "{metric.post_value(post)} {metric.unit()}" }
                    }
                }
            }
        }
    }
}

#[component]
fn UserBoard(metric: Metric, users: Vec<RankedUser>) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();

    rsx! {
        div {
            class: "board",
            h3 { "{metric.title()}" }
            if users.is_empty() {
                p { class: "muted", "Nothing ranked yet." }
            }
            ol {
                for (badge, entry) in ranked(&users) {
                    li {
                        key: "{entry.user.id}",
                        class: "board-row",
                        onclick: {
                            let api = api.clone();
                            let username = entry.user.username.clone();
                            move |_| {
                                let api = api.clone();
                                let username = username.clone();
                                spawn(async move { open_profile(&api, session, toaster, &username).await });
                            }
                        },
                        span { class: badge_class(&badge), "{badge.label}" }
                        img { class: "avatar small", src: "{entry.user.image_url}", alt: "" }
                        div {
                            class: "board-entry",
                            span { class: "post-name", "{entry.user.name}" }
                            span { class: "muted", "{entry.user.handle()}" }
                        }
                        span { class: "board-value", "{metric.user_value(entry)} {metric.unit()}" }
                    }
                }
            }
        }
    }
}

/// A leaderboard post, shown with its comments and no actions.
#[component]
fn ReadOnlyPost(post: Post) -> Element {
    let posts = use_signal(|| vec![post.clone()]);
    let current = posts.read().first().cloned().unwrap_or(post);

    rsx! {
        div {
            class: "modal-body",
            PostCard { post: current, posts, now: Utc::now(), read_only: true }
        }
    }
}
