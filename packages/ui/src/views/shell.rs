use dioxus::prelude::*;
use store::Tab;

use super::{
    ChatPanel, FeedView, LeaderboardView, LivestreamsView, LoginModal, MessagesView, ModalOverlay,
    NotificationsView, ProfileView,
};
use crate::chat_indicator::ChatStatus;
use crate::session::use_session;
use crate::{ReportDialog, SidePanel};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The app frame: side panel, the active tab, the chat panel and the modals
/// that sit over all of them.
#[component]
pub fn Shell(#[props(!optional)] reset_token: Option<String>) -> Element {
    let mut session = use_session();
    use_context_provider(|| Signal::new(ChatStatus::default()));
    let mut reporting = use_signal(|| false);

    // A reset link opens the modal even over a resumed session.
    let resetting = reset_token.is_some();
    use_hook(move || {
        if resetting {
            session.write().show_login = true;
        }
    });

    let state = session();

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "shell",
            SidePanel { on_report: move |_| reporting.set(true) }

            main {
                class: "shell-main",
                match state.tab {
                    Tab::Home => rsx! { FeedView {} },
                    Tab::Messages => rsx! { MessagesView {} },
                    Tab::Live => rsx! { LivestreamsView {} },
                    Tab::Leaderboard => rsx! { LeaderboardView {} },
                    Tab::Profile => rsx! { ProfileView {} },
                    Tab::Notifications => rsx! { NotificationsView {} },
                }
            }

            if state.chat_visible() {
                ChatPanel {}
            }
        }

        if reporting() {
            ModalOverlay {
                on_close: move |_| reporting.set(false),
                ReportDialog { on_close: move |_| reporting.set(false) }
            }
        }

        if state.show_login {
            LoginModal { reset_token: reset_token.clone() }
        }
    }
}
