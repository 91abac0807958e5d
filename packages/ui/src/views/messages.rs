use api::{Conversation, DirectMessage};
use dioxus::prelude::*;
use store::{dm, time};

use crate::session::{open_profile, use_api, use_session};
use crate::toast::use_toaster;

/// Direct messages: the conversation list and the selected thread.
#[component]
pub fn MessagesView() -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut conversations = use_signal(Vec::<Conversation>::new);
    let mut selected = use_signal(|| None::<String>);
    let mut thread = use_signal(Vec::<DirectMessage>::new);
    let mut draft = use_signal(String::new);
    // Bumped after a send to refetch the thread.
    let mut revision = use_signal(|| 0u32);

    let me = use_memo(move || session().user_id().map(str::to_string));

    let list_api = api.clone();
    let _ = use_resource(move || {
        let api = list_api.clone();
        async move {
            let Some(user_id) = me() else {
                return;
            };
            match api.conversations(&user_id).await {
                Ok(list) => {
                    let pick = dm::initial_selection(&list, selected.peek().as_deref());
                    conversations.set(list);
                    selected.set(pick);
                }
                Err(e) => toaster.error(e.user_message("Failed to load conversations!")),
            }
        }
    });

    let thread_api = api.clone();
    let _ = use_resource(move || {
        let api = thread_api.clone();
        async move {
            let _ = revision();
            let (Some(user_id), Some(other_id)) = (me(), selected()) else {
                thread.set(Vec::new());
                return;
            };
            match api.thread(&user_id, &other_id).await {
                Ok(messages) => thread.set(messages),
                Err(e) => toaster.error(e.user_message("Failed to load messages!")),
            }
        }
    });

    let current = selected();
    let partner = conversations
        .read()
        .iter()
        .find(|c| Some(&c.user_id) == current.as_ref())
        .cloned();
    let my_id = me().unwrap_or_default();

    let send_api = api.clone();
    let send_to = partner.clone();
    let on_send = move |_| {
        let Some(partner) = send_to.clone() else {
            return;
        };
        let message = match dm::build_message(&my_id, &partner.user_username, &draft()) {
            Ok(m) => m,
            Err(e) => {
                toaster.error(e.to_string());
                return;
            }
        };
        let api = send_api.clone();
        spawn(async move {
            match api.send_direct_message(&message).await {
                Ok(()) => {
                    toaster.success(dm::SENT);
                    draft.set(String::new());
                    revision += 1;
                }
                Err(e) => {
                    tracing::warn!("direct message failed: {e}");
                    toaster.error("Failed to send message!");
                }
            }
        });
    };

    let my_id = me().unwrap_or_default();

    rsx! {
        section {
            class: "messages",
            aside {
                class: "conversation-list",
                if conversations().is_empty() {
                    p { class: "muted empty", "No conversations yet." }
                }
                for conv in conversations() {
                    div {
                        key: "{conv.user_id}",
                        class: if current.as_ref() == Some(&conv.user_id) { "conversation active" } else { "conversation" },
                        onclick: {
                            let id = conv.user_id.clone();
                            move |_| selected.set(Some(id.clone()))
                        },
                        img { class: "avatar small", src: "{conv.user_image}", alt: "" }
                        div {
                            class: "conversation-summary",
                            span { class: "post-name", "{conv.user_name}" }
                            if let Some(last) = &conv.last_message {
                                span { class: "muted ellipsis", "{last.content}" }
                            }
                        }
                    }
                }
            }

            div {
                class: "thread",
                if let Some(partner) = &partner {
                    header {
                        class: "thread-header",
                        onclick: {
                            let api = api.clone();
                            let username = partner.user_username.clone();
                            move |_| {
                                let api = api.clone();
                                let username = username.clone();
                                spawn(async move { open_profile(&api, session, toaster, &username).await });
                            }
                        },
                        img { class: "avatar small", src: "{partner.user_image}", alt: "" }
                        span { class: "post-name", "{partner.user_name}" }
                        span { class: "muted", "@{partner.user_username}" }
                    }
                }
                div {
                    class: "thread-messages",
                    for message in thread() {
                        div {
                            key: "{message.id}{message.timestamp}",
                            class: if dm::is_outgoing(&message, &my_id) { "dm outgoing" } else { "dm incoming" },
                            p { "{message.content}" }
                            span { class: "muted small", "{time::chat_time(&message.timestamp)}" }
                        }
                    }
                }
                if partner.is_some() {
                    div {
                        class: "thread-compose",
                        input {
                            r#type: "text",
                            placeholder: "Write a message",
                            value: draft(),
                            oninput: move |evt: FormEvent| draft.set(evt.value()),
                        }
                        button { class: "btn primary", onclick: on_send, "Send" }
                    }
                }
            }
        }
    }
}
