use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::AppConfig;
use ui::views::Shell;
use ui::{SessionProvider, ToastContainer, THEME_CSS};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("logger already installed: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        let config = AppConfig::from_env();
        tracing::info!(api = %config.api.base_url, "starting Trench Social");
        config
    });
    // Read once: the modal clears the query string after a reset.
    let reset_token = use_hook(ui::browser::reset_token);

    rsx! {
        document::Stylesheet { href: THEME_CSS }
        document::Stylesheet { href: MAIN_CSS }

        SessionProvider {
            config,
            ToastContainer {}
            Shell { reset_token }
        }
    }
}
