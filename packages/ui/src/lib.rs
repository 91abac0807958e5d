//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod browser;

mod storage;
pub use storage::make_session_store;

pub mod socket;

mod session;
pub use session::{
    open_profile, reload_user, sign_in, sign_out, use_api, use_config, use_rpc, use_session,
    SessionProvider,
};

mod toast;
pub use toast::{use_toaster, ToastContainer, Toaster};

pub mod wallet;

mod chat_indicator;
pub use chat_indicator::{ChatIndicator, ChatStatus};

mod side_panel;
pub use side_panel::SidePanel;

mod report_dialog;
pub use report_dialog::ReportDialog;

pub mod views;

pub const THEME_CSS: Asset = asset!("/assets/theme.css");
