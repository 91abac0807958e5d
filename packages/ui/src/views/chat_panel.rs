//! The shared live chat room.
//!
//! The panel owns one socket for as long as it is mounted. Frames go through
//! [`ChatProtocol`], which answers pings and turns Socket.IO events into
//! [`ChatEvent`]s for the [`ChatLog`]. Outgoing messages are not added
//! locally; they show up when the server echoes them back.

use api::socket::{encode_send_message, websocket_url};
use api::{ChatEvent, ChatMessage, ChatProtocol};
use chrono::Utc;
use dioxus::prelude::*;
use futures::StreamExt;
use store::chat::{char_counter, excerpt, MAX_MESSAGE_CHARS, PENDING_EXCERPT_CHARS, REPLY_EXCERPT_CHARS};
use store::{time, ChatLog};

use crate::chat_indicator::ChatStatus;
use crate::icons::{FaChevronDown, FaChevronUp, FaCircleCheck, FaReply, FaXmark};
use crate::session::{use_config, use_session};
use crate::socket::{self, Inbound};
use crate::toast::use_toaster;
use crate::Icon;

#[component]
pub fn ChatPanel() -> Element {
    let config = use_config();
    let mut session = use_session();
    let toaster = use_toaster();
    let mut log = use_signal(ChatLog::new);
    let mut collapsed = use_signal(|| true);
    let mut draft = use_signal(String::new);
    let mut status = use_context::<Signal<ChatStatus>>();

    let socket = use_hook(move || {
        // An unusable URL still goes to `connect`, which reports the socket closed.
        let url = websocket_url(&config.api.socket_url)
            .map(|url| url.to_string())
            .unwrap_or_else(|e| {
                tracing::error!("chat socket url: {e}");
                config.api.socket_url.clone()
            });
        let (handle, mut inbound) = socket::connect(&url);
        let replies = handle.clone();
        spawn(async move {
            let mut protocol = ChatProtocol::new();
            while let Some(item) = inbound.next().await {
                match item {
                    Inbound::Frame(frame) => match protocol.on_frame(&frame) {
                        Ok(step) => {
                            for reply in step.replies {
                                if let Err(e) = replies.send(reply) {
                                    tracing::warn!("failed to answer chat server: {e}");
                                }
                            }
                            for event in step.events {
                                match event {
                                    ChatEvent::Connected => status.write().connected = true,
                                    ChatEvent::Closed => status.write().connected = false,
                                    _ => {}
                                }
                                log.write().apply(event);
                            }
                        }
                        Err(e) => tracing::warn!("chat frame rejected: {e}"),
                    },
                    Inbound::Closed(reason) => {
                        tracing::info!(%reason, "chat socket closed");
                        status.write().connected = false;
                        break;
                    }
                }
            }
        });
        handle
    });

    let closing = socket.clone();
    use_drop(move || {
        closing.close();
        if let Ok(mut s) = status.try_write() {
            s.connected = false;
        }
    });

    let mut on_send = move |_: ()| {
        let Some(me) = session.peek().user.clone() else {
            return;
        };
        let message = match log.write().compose(&draft(), &me, Utc::now()) {
            Ok(m) => m,
            Err(e) => {
                toaster.error(e.to_string());
                return;
            }
        };
        if let Err(e) = encode_send_message(&message).and_then(|frame| socket.send(frame)) {
            tracing::warn!("chat message not sent: {e}");
        }
        draft.set(String::new());
    };
    let mut send_on_enter = on_send.clone();

    let state = session();
    let member = state.is_member();
    let my_username = state.user.as_ref().map(|u| u.username.clone()).unwrap_or_default();

    let rows: Vec<(ChatMessage, Option<ChatMessage>)> = {
        let guard = log.read();
        guard
            .messages()
            .iter()
            .map(|m| (m.clone(), guard.resolve_parent(m).cloned()))
            .collect()
    };
    let pending = log.read().pending_reply().cloned();

    rsx! {
        aside {
            class: if collapsed() { "chat-panel collapsed" } else { "chat-panel" },
            header {
                class: "chat-header",
                onclick: move |_| collapsed.toggle(),
                span { "Live Chat" }
                crate::ChatIndicator {}
                if collapsed() {
                    Icon { icon: FaChevronUp, width: 12, height: 12 }
                } else {
                    Icon { icon: FaChevronDown, width: 12, height: 12 }
                }
            }

            if !collapsed() {
                div {
                    class: "chat-messages",
                    for (i, (message, parent)) in rows.into_iter().enumerate() {
                        ChatRow {
                            key: "{i}",
                            can_reply: member && message.username != my_username,
                            message,
                            parent,
                            on_reply: move |m: ChatMessage| {
                                let me = session.peek().user.as_ref().map(|u| u.username.clone());
                                if let Some(me) = me {
                                    log.write().select_reply(&m, &me);
                                }
                            },
                        }
                    }
                }

                if member {
                    if let Some(target) = pending {
                        div {
                            class: "chat-pending-reply",
                            span {
                                "Replying to "
                                strong { "{target.name}" }
                                ": {excerpt(&target.text, PENDING_EXCERPT_CHARS)}"
                            }
                            button {
                                class: "icon-button",
                                title: "Cancel reply",
                                onclick: move |_| log.write().cancel_reply(),
                                Icon { icon: FaXmark, width: 10, height: 10 }
                            }
                        }
                    }
                    div {
                        class: "chat-compose",
                        input {
                            r#type: "text",
                            maxlength: "{MAX_MESSAGE_CHARS}",
                            placeholder: "Say something",
                            value: draft(),
                            oninput: move |evt: FormEvent| draft.set(evt.value()),
                            onkeydown: move |evt: KeyboardEvent| {
                                if evt.key() == Key::Enter {
                                    send_on_enter(());
                                }
                            },
                        }
                        span { class: "muted small", "{char_counter(&draft())}" }
                        button { class: "btn primary small", onclick: move |_| on_send(()), "Send" }
                    }
                } else {
                    div {
                        class: "chat-guest",
                        "Log in to join the chat. "
                        button {
                            class: "btn outline small",
                            onclick: move |_| session.write().show_login = true,
                            "Log in"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ChatRow(
    message: ChatMessage,
    #[props(!optional)] parent: Option<ChatMessage>,
    can_reply: bool,
    on_reply: EventHandler<ChatMessage>,
) -> Element {
    let reply_target = message.clone();

    rsx! {
        div {
            class: "chat-message",
            img { class: "avatar small", src: "{message.avatar_url}", alt: "" }
            div {
                class: "chat-body",
                div {
                    class: "chat-meta",
                    span { class: "post-name", "{message.name}" }
                    if message.verified {
                        span {
                            class: "verified-badge",
                            Icon { icon: FaCircleCheck, width: 10, height: 10 }
                        }
                    }
                    span { class: "muted small", "{time::chat_time(&message.timestamp)}" }
                }
                if let Some(parent) = parent {
                    div {
                        class: "chat-reply-preview",
                        strong { "{parent.name}" }
                        " {excerpt(&parent.text, REPLY_EXCERPT_CHARS)}"
                    }
                }
                p { "{message.text}" }
            }
            if can_reply {
                button {
                    class: "icon-button",
                    title: "Reply",
                    onclick: move |_| on_reply.call(reply_target.clone()),
                    Icon { icon: FaReply, width: 10, height: 10 }
                }
            }
        }
    }
}
