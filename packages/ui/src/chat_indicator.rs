//! Live chat connection indicator for the side panel header.

use dioxus::prelude::*;

use crate::icons::{FaCircle, FaCircleNotch};
use crate::Icon;

/// Whether the chat socket has completed its handshake. Provided by the shell
/// and written by the chat panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChatStatus {
    pub connected: bool,
}

/// A small dot showing the chat connection state.
///
/// - **Connected**: green dot ("Live chat connected")
/// - **Otherwise**: gray spinner ("Connecting to live chat")
#[component]
pub fn ChatIndicator() -> Element {
    let Some(status) = try_use_context::<Signal<ChatStatus>>() else {
        return rsx! {};
    };

    if status().connected {
        rsx! {
            span {
                class: "chat-indicator chat-indicator--live",
                title: "Live chat connected",
                Icon { icon: FaCircle, width: 10, height: 10 }
            }
        }
    } else {
        rsx! {
            span {
                class: "chat-indicator chat-indicator--connecting",
                title: "Connecting to live chat",
                Icon { icon: FaCircleNotch, width: 10, height: 10 }
            }
        }
    }
}
