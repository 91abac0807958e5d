use api::Post;
use base64::Engine;
use chrono::Utc;
use dioxus::prelude::*;
use store::feed;

use super::PostList;
use crate::icons::{FaImage, FaXmark};
use crate::session::{use_api, use_session};
use crate::toast::use_toaster;
use crate::Icon;

/// The home tab: composer and the global post stream, fetched on mount.
#[component]
pub fn FeedView() -> Element {
    let api = use_api();
    let toaster = use_toaster();
    let session = use_session();
    let mut posts = use_signal(Vec::<Post>::new);
    let mut loading = use_signal(|| true);

    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            match api.list_posts().await {
                Ok(list) => posts.set(list),
                Err(e) => toaster.error(e.user_message("Failed to load posts!")),
            }
            loading.set(false);
        }
    });

    rsx! {
        section {
            class: "feed",
            if session().is_member() {
                PostComposer { posts }
            }
            if loading() {
                p { class: "muted empty", "Loading..." }
            } else {
                PostList { posts }
            }
        }
    }
}

fn data_url(content_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{encoded}")
}

#[component]
fn PostComposer(posts: Signal<Vec<Post>>) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut text = use_signal(String::new);
    let mut images = use_signal(Vec::<String>::new);
    let mut posting = use_signal(|| false);
    let mut posts = posts;

    let on_files = move |evt: FormEvent| {
        let files = evt.files();
        spawn(async move {
            for file in files {
                let content_type = file.content_type().unwrap_or_default();
                if !feed::accepts_image(&content_type, images.peek().len()) {
                    tracing::debug!(file = %file.name(), "skipping attachment");
                    continue;
                }
                match file.read_bytes().await {
                    Ok(bytes) => images.write().push(data_url(&content_type, &bytes)),
                    Err(e) => tracing::warn!(file = %file.name(), "failed to read attachment: {e}"),
                }
            }
        });
    };

    let on_post = move |_| {
        let Some(me) = session.peek().user.clone() else {
            return;
        };
        let post = match feed::build_post(&me, &text(), images(), Utc::now()) {
            Ok(post) => post,
            Err(e) => {
                toaster.error(e.to_string());
                return;
            }
        };
        let api = api.clone();
        posting.set(true);
        spawn(async move {
            match api.create_post(&post).await {
                Ok(()) => {
                    feed::prepend_post(&mut posts.write(), post);
                    text.set(String::new());
                    images.set(Vec::new());
                    toaster.success("Post created successfully!");
                }
                Err(e) => {
                    tracing::warn!("create post failed: {e}");
                    toaster.error("Failed to create post!");
                }
            }
            posting.set(false);
        });
    };

    rsx! {
        div {
            class: "composer",
            textarea {
                rows: 3,
                placeholder: "What's happening in the trenches?",
                value: text(),
                oninput: move |evt: FormEvent| text.set(evt.value()),
            }
            if !images().is_empty() {
                div {
                    class: "composer-images",
                    for (i, src) in images().into_iter().enumerate() {
                        div {
                            key: "{i}",
                            class: "composer-image",
                            img { src: "{src}", alt: "" }
                            button {
                                class: "icon-button",
                                title: "Remove",
                                onclick: move |_| {
                                    if i < images.peek().len() {
                                        images.write().remove(i);
                                    }
                                },
                                Icon { icon: FaXmark, width: 10, height: 10 }
                            }
                        }
                    }
                }
            }
            div {
                class: "composer-actions",
                label {
                    class: "icon-button",
                    title: "Attach images (up to {feed::MAX_IMAGES})",
                    Icon { icon: FaImage, width: 16, height: 16 }
                    input {
                        r#type: "file",
                        accept: "image/*",
                        multiple: true,
                        hidden: true,
                        onchange: on_files,
                    }
                }
                button {
                    class: "btn primary",
                    disabled: posting(),
                    onclick: on_post,
                    if posting() { "Posting..." } else { "Post" }
                }
            }
        }
    }
}
