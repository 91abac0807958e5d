use api::{FollowRequest, ImageUpload, Post, ProfileUpdate, User};
use dioxus::prelude::*;
use store::profile::{self, ProfileTab};
use store::{dm, feed, time};

use super::{ModalOverlay, PostList, VerifyDialog};
use crate::icons::{FaCircleCheck, FaEnvelope, FaPen};
use crate::session::{open_profile, reload_user, use_api, use_session};
use crate::toast::use_toaster;
use crate::Icon;

/// The profile tab: the viewed user's profile, or the current user's own.
#[component]
pub fn ProfileView() -> Element {
    let api = use_api();
    let mut session = use_session();
    let toaster = use_toaster();
    let mut posts = use_signal(Vec::<Post>::new);
    let mut tab = use_signal(ProfileTab::default);
    let mut show_edit = use_signal(|| false);
    let mut show_message = use_signal(|| false);
    let mut show_verify = use_signal(|| false);

    let username = use_memo(move || {
        session()
            .displayed_profile()
            .map(|u| u.username.clone())
    });

    // Posts of whichever profile is shown. The profile itself was fetched by
    // whoever opened it, so a failure here only logs.
    let fetch_api = api.clone();
    let _ = use_resource(move || {
        let api = fetch_api.clone();
        async move {
            let Some(username) = username() else {
                return;
            };
            match api.list_posts().await {
                Ok(all) => posts.set(feed::posts_by(&all, &username)),
                Err(e) => tracing::warn!(%username, "failed to load profile posts: {e}"),
            }
        }
    });

    let state = session();
    let Some(user) = state.displayed_profile().cloned() else {
        return rsx! {
            p { class: "muted empty", "Log in to see profiles." }
        };
    };
    let own = state.is_own_profile();
    let member = state.is_member();
    let following = profile::is_following(&user, state.user_id());

    let on_follow = {
        let api = api.clone();
        let target = user.username.clone();
        move |_| {
            let Some(me) = session.peek().user.clone() else {
                return;
            };
            let api = api.clone();
            let target = target.clone();
            spawn(async move {
                let req = FollowRequest::from(&me);
                let result = if following {
                    api.unfollow(&target, &req).await
                } else {
                    api.follow(&target, &req).await
                };
                match result {
                    Ok(()) => {
                        toaster.success(if following {
                            "Successfully unfollowed!"
                        } else {
                            "Successfully followed!"
                        });
                        match api.get_user_by_username(&target).await {
                            Ok(fresh) => session.write().refresh_profile(fresh),
                            Err(e) => tracing::warn!(%target, "refetch after follow failed: {e}"),
                        }
                        if let Err(e) = reload_user(&api, session).await {
                            tracing::warn!("refetch of current user failed: {e}");
                        }
                    }
                    Err(e) => {
                        let fallback = if following {
                            "Failed to unfollow user!"
                        } else {
                            "Failed to follow user!"
                        };
                        toaster.error(e.user_message(fallback));
                    }
                }
            });
        }
    };

    rsx! {
        section {
            class: "profile",
            header {
                class: "profile-header",
                img { class: "avatar large", src: "{user.image_url}", alt: "" }
                div {
                    class: "profile-identity",
                    h2 {
                        "{user.name}"
                        if user.verified {
                            span {
                                class: "verified-badge",
                                title: "Verified",
                                Icon { icon: FaCircleCheck, width: 16, height: 16 }
                            }
                        }
                    }
                    span { class: "muted", "{user.handle()}" }
                    span { class: "muted", "Joined {time::joined_date(&user.created_at)}" }
                    div {
                        class: "profile-counts",
                        span { strong { "{user.followers.len()}" } " followers" }
                        span { strong { "{user.following.len()}" } " following" }
                    }
                }
                div {
                    class: "profile-actions",
                    if own {
                        button {
                            class: "btn outline",
                            onclick: move |_| show_edit.set(true),
                            Icon { icon: FaPen, width: 12, height: 12 }
                            " Edit profile"
                        }
                        if !user.verified {
                            button {
                                class: "btn primary",
                                onclick: move |_| show_verify.set(true),
                                "Get Verified"
                            }
                        }
                    } else if member {
                        button {
                            class: if following { "btn outline" } else { "btn primary" },
                            onclick: on_follow,
                            if following { "Unfollow" } else { "Follow" }
                        }
                        button {
                            class: "btn outline",
                            onclick: move |_| show_message.set(true),
                            Icon { icon: FaEnvelope, width: 12, height: 12 }
                            " Send Message"
                        }
                    }
                }
            }

            div {
                class: "sub-tabs",
                for t in ProfileTab::ALL {
                    button {
                        key: "{t.label()}",
                        class: if tab() == t { "sub-tab active" } else { "sub-tab" },
                        onclick: move |_| tab.set(t),
                        "{t.label()}"
                    }
                }
            }

            match tab() {
                ProfileTab::Posts => rsx! {
                    PostList { posts, allow_delete: own }
                },
                other => rsx! {
                    PeopleList { people: profile::people(&user, other).to_vec() }
                },
            }
        }

        if show_edit() {
            ModalOverlay {
                on_close: move |_| show_edit.set(false),
                EditProfileDialog {
                    user: user.clone(),
                    on_close: move |_| show_edit.set(false),
                }
            }
        }
        if show_message() {
            ModalOverlay {
                on_close: move |_| show_message.set(false),
                SendMessageDialog {
                    receiver: user.username.clone(),
                    on_close: move |_| show_message.set(false),
                }
            }
        }
        if show_verify() {
            ModalOverlay {
                on_close: move |_| show_verify.set(false),
                VerifyDialog { on_close: move |_| show_verify.set(false) }
            }
        }
    }
}

/// Followers or following. One level only: each row opens that profile.
#[component]
fn PeopleList(people: Vec<User>) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();

    rsx! {
        if people.is_empty() {
            p { class: "muted empty", "Nobody here yet." }
        }
        ul {
            class: "people-list",
            for person in people {
                li {
                    key: "{person.id}",
                    onclick: {
                        let api = api.clone();
                        let username = person.username.clone();
                        move |_| {
                            let api = api.clone();
                            let username = username.clone();
                            spawn(async move { open_profile(&api, session, toaster, &username).await });
                        }
                    },
                    img { class: "avatar small", src: "{person.image_url}", alt: "" }
                    span { class: "post-name", "{person.name}" }
                    span { class: "muted", "{person.handle()}" }
                }
            }
        }
    }
}

#[component]
fn EditProfileDialog(user: User, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let mut session = use_session();
    let toaster = use_toaster();
    let mut name = use_signal(|| user.name.clone());
    let mut username = use_signal(|| user.username.clone());
    let mut email = use_signal(|| user.email.clone());
    let mut image = use_signal(|| None::<ImageUpload>);
    let mut saving = use_signal(|| false);

    let on_file = move |evt: FormEvent| {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        spawn(async move {
            match file.read_bytes().await {
                Ok(bytes) => image.set(Some(ImageUpload {
                    file_name: file.name(),
                    content_type: file.content_type(),
                    bytes: bytes.to_vec(),
                })),
                Err(e) => tracing::warn!("failed to read avatar: {e}"),
            }
        });
    };

    let on_save = move |_| {
        let update = ProfileUpdate {
            current_email: user.email.clone(),
            name: name().trim().to_string(),
            username: username().trim().to_string(),
            email: email().trim().to_string(),
            image: image(),
        };
        let api = api.clone();
        let id = user.id.clone();
        saving.set(true);
        spawn(async move {
            match api.update_profile(&id, update).await {
                Ok(updated) => {
                    session.write().refresh_profile(updated);
                    toaster.success("Profile updated successfully!");
                    on_close.call(());
                }
                Err(e) => toaster.error(e.user_message("Failed to update profile")),
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Edit profile" }
            div {
                class: "modal-field",
                label { r#for: "profile-name", "Name" }
                input {
                    id: "profile-name",
                    r#type: "text",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "profile-username", "Username" }
                input {
                    id: "profile-username",
                    r#type: "text",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "profile-email", "Email" }
                input {
                    id: "profile-email",
                    r#type: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                label { r#for: "profile-avatar", "Avatar" }
                input {
                    id: "profile-avatar",
                    r#type: "file",
                    accept: "image/*",
                    onchange: on_file,
                }
                if let Some(img) = image() {
                    span { class: "muted", "{img.file_name}" }
                }
            }
            div {
                class: "modal-actions",
                button {
                    class: "btn primary",
                    disabled: saving(),
                    onclick: on_save,
                    if saving() { "Saving..." } else { "Save" }
                }
                button {
                    class: "btn outline",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn SendMessageDialog(receiver: String, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut text = use_signal(String::new);

    let on_send = move |_| {
        let Some(sender_id) = session.peek().user_id().map(str::to_string) else {
            return;
        };
        let message = match dm::build_message(&sender_id, &receiver, &text()) {
            Ok(m) => m,
            Err(e) => {
                toaster.error(e.to_string());
                return;
            }
        };
        let api = api.clone();
        spawn(async move {
            match api.send_direct_message(&message).await {
                Ok(()) => {
                    toaster.success(dm::SENT);
                    on_close.call(());
                }
                Err(e) => {
                    tracing::warn!("direct message failed: {e}");
                    toaster.error("Failed to send message!");
                }
            }
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Message" }
            textarea {
                rows: 4,
                placeholder: "Say something nice",
                value: text(),
                oninput: move |evt: FormEvent| text.set(evt.value()),
            }
            div {
                class: "modal-actions",
                button { class: "btn primary", onclick: on_send, "Send" }
                button {
                    class: "btn outline",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
            }
        }
    }
}
