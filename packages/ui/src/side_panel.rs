use dioxus::prelude::*;
use store::{search, Tab};

use crate::icons::{
    FaBell, FaBug, FaEnvelope, FaHouse, FaMagnifyingGlass, FaRightFromBracket, FaTrophy, FaUser,
    FaVideo,
};
use crate::session::{open_profile, sign_out, use_api, use_session};
use crate::toast::use_toaster;
use crate::Icon;

const SIDE_PANEL_CSS: Asset = asset!("/assets/styling/side_panel.css");

/// Navigation, user search and logout.
#[component]
pub fn SidePanel(on_report: EventHandler<()>) -> Element {
    let session = use_session();
    let member = session().is_member();

    rsx! {
        document::Stylesheet { href: SIDE_PANEL_CSS }

        nav {
            class: "side-panel",

            div {
                class: "side-panel-brand",
                span { "Trench Social" }
                crate::ChatIndicator {}
            }

            UserSearch {}

            div {
                class: "side-panel-tabs",
                TabButton { tab: Tab::Home, Icon { icon: FaHouse, width: 16, height: 16 } }
                TabButton { tab: Tab::Messages, Icon { icon: FaEnvelope, width: 16, height: 16 } }
                TabButton { tab: Tab::Live, Icon { icon: FaVideo, width: 16, height: 16 } }
                TabButton { tab: Tab::Leaderboard, Icon { icon: FaTrophy, width: 16, height: 16 } }
                TabButton { tab: Tab::Profile, Icon { icon: FaUser, width: 16, height: 16 } }
                TabButton { tab: Tab::Notifications, Icon { icon: FaBell, width: 16, height: 16 } }
                button {
                    class: "side-panel-item",
                    onclick: move |_| on_report.call(()),
                    Icon { icon: FaBug, width: 16, height: 16 }
                    span { "Report" }
                }
            }

            div {
                class: "side-panel-bottom",
                if let Some(user) = session().user.clone() {
                    div {
                        class: "side-panel-user",
                        img { class: "avatar small", src: "{user.image_url}", alt: "" }
                        span { "{user.handle()}" }
                    }
                }
                button {
                    class: "side-panel-item",
                    onclick: move |_| async move { sign_out(session).await },
                    Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                    span { if member { "Logout" } else { "Log in" } }
                }
            }
        }
    }
}

#[component]
fn TabButton(tab: Tab, children: Element) -> Element {
    let mut session = use_session();
    let state = session();
    let active = state.tab == tab;
    let allowed = !tab.requires_account() || state.is_member();

    rsx! {
        button {
            class: if active { "side-panel-item active" } else { "side-panel-item" },
            disabled: !allowed,
            onclick: move |_| {
                session.write().select_tab(tab);
            },
            {children}
            span { "{tab.label()}" }
        }
    }
}

/// Search over every user, fetched once when the panel mounts.
#[component]
fn UserSearch() -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut query = use_signal(String::new);
    let mut users = use_signal(Vec::<api::User>::new);

    let fetch_api = api.clone();
    let _ = use_resource(move || {
        let api = fetch_api.clone();
        async move {
            match api.list_users().await {
                Ok(list) => users.set(list),
                Err(e) => {
                    tracing::warn!("failed to load users for search: {e}");
                    toaster.error(search::LOAD_FAILED);
                }
            }
        }
    });

    let results: Vec<api::User> = search::search_users(&users.read(), &query())
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div {
            class: "user-search",
            div {
                class: "user-search-input",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                input {
                    r#type: "text",
                    placeholder: "Search users",
                    value: query(),
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                }
            }
            if !results.is_empty() {
                ul {
                    class: "user-search-results",
                    for user in results {
                        li {
                            key: "{user.id}",
                            onclick: {
                                let api = api.clone();
                                let username = user.username.clone();
                                move |_| {
                                    let api = api.clone();
                                    let username = username.clone();
                                    query.set(String::new());
                                    spawn(async move {
                                        open_profile(&api, session, toaster, &username).await;
                                    });
                                }
                            },
                            img { class: "avatar small", src: "{user.image_url}", alt: "" }
                            span { class: "user-search-name", "{user.name}" }
                            span { class: "muted", "{user.handle()}" }
                        }
                    }
                }
            }
        }
    }
}
