//! Page URL helpers. No-ops outside the browser.

/// The `resetToken` query parameter the page was opened with, if any.
pub fn reset_token() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let search = web_sys::window()?.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        params.get("resetToken").filter(|t| !t.is_empty())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Drop the query string from the address bar without reloading.
pub fn clear_query() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Ok(history) = window.history() {
            if let Err(e) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some("/"))
            {
                tracing::warn!("failed to clear the query string: {e:?}");
            }
        }
    }
}

/// Wait `ms` milliseconds on the current runtime.
pub(crate) async fn sleep(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(ms)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
