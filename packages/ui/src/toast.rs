//! Toasts: the context handle views call and the container that renders them.

use dioxus::prelude::*;
use store::toast::{Toast, TOAST_MS};
use store::{ToastLevel, Toasts};

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// Copyable handle for raising toasts from event handlers and tasks.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    toasts: Signal<Toasts>,
}

impl Toaster {
    pub fn new(toasts: Signal<Toasts>) -> Self {
        Self { toasts }
    }

    pub fn show(mut self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ToastLevel::Error | ToastLevel::Warning => tracing::warn!("toast: {message}"),
            _ => tracing::debug!("toast: {message}"),
        }
        self.toasts.write().push(level, message);
    }

    pub fn info(self, message: impl Into<String>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn success(self, message: impl Into<String>) {
        self.show(ToastLevel::Success, message);
    }

    pub fn warning(self, message: impl Into<String>) {
        self.show(ToastLevel::Warning, message);
    }

    pub fn error(self, message: impl Into<String>) {
        self.show(ToastLevel::Error, message);
    }
}

pub fn use_toaster() -> Toaster {
    Toaster::new(use_context::<Signal<Toasts>>())
}

/// Renders the live toasts in the corner of the screen.
#[component]
pub fn ToastContainer() -> Element {
    let toasts = use_context::<Signal<Toasts>>();
    let entries = toasts().entries().to_vec();

    rsx! {
        document::Stylesheet { href: TOAST_CSS }
        div {
            class: "toast-container",
            for toast in entries {
                ToastItem { key: "{toast.id}", toast }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast) -> Element {
    let mut toasts = use_context::<Signal<Toasts>>();
    let id = toast.id;

    use_hook(move || {
        spawn(async move {
            crate::browser::sleep(TOAST_MS as u64).await;
            toasts.write().dismiss(id);
        })
    });

    rsx! {
        div {
            class: toast.level.class(),
            onclick: move |_| toasts.write().dismiss(id),
            span { class: "toast-icon", "{toast.level.icon()}" }
            span { class: "toast-message", "{toast.message}" }
        }
    }
}
