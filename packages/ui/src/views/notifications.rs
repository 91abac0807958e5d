use api::Notification;
use chrono::Utc;
use dioxus::prelude::*;
use store::time;

use crate::session::{open_profile, use_api, use_session};
use crate::toast::use_toaster;

/// Likes, follows, retruths and comments on the current user's content.
#[component]
pub fn NotificationsView() -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut items = use_signal(Vec::<Notification>::new);
    let mut loading = use_signal(|| true);

    let me = use_memo(move || session().user_id().map(str::to_string));

    let fetch_api = api.clone();
    let _ = use_resource(move || {
        let api = fetch_api.clone();
        async move {
            let Some(user_id) = me() else {
                return;
            };
            match api.notifications(&user_id).await {
                Ok(list) => items.set(list),
                Err(e) => toaster.error(e.user_message("Failed to load notifications!")),
            }
            loading.set(false);
        }
    });

    let now = Utc::now();

    rsx! {
        section {
            class: "notifications",
            h2 { "Notifications" }
            if loading() {
                p { class: "muted empty", "Loading..." }
            } else if items().is_empty() {
                p { class: "muted empty", "Nothing new." }
            }
            ul {
                for (i, n) in items().into_iter().enumerate() {
                    li {
                        key: "{i}",
                        class: "notification",
                        onclick: {
                            let api = api.clone();
                            let username = n.from_user.username.clone();
                            move |_| {
                                let api = api.clone();
                                let username = username.clone();
                                spawn(async move { open_profile(&api, session, toaster, &username).await });
                            }
                        },
                        img { class: "avatar small", src: "{n.from_user.image_url}", alt: "" }
                        span {
                            strong { "{n.from_user.name}" }
                            " {n.kind.action_text()}"
                        }
                        span { class: "muted small", "{time::relative_time(&n.created_at, now)}" }
                    }
                }
            }
        }
    }
}
