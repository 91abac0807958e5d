//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] owns everything views share: the [`Session`] signal,
//! the live toasts, the REST and RPC clients and the [`AppConfig`]. Views
//! reach them through the `use_*` hooks below.

use api::{ApiClient, RpcClient};
use dioxus::prelude::*;
use store::{AppConfig, Session, SessionStore, Toasts};

use crate::storage::make_session_store;
use crate::toast::Toaster;

/// Get the session signal. Writes re-render every view that reads it.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_rpc() -> RpcClient {
    use_context::<RpcClient>()
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>()
}

/// Provider component for the session and the shared clients.
/// Wrap the app with this component.
///
/// On mount a stored login snapshot is resumed by fetching the user again.
/// When that fetch fails the snapshot is dropped and the login modal stays up.
#[component]
pub fn SessionProvider(config: AppConfig, children: Element) -> Element {
    let api = use_hook(|| ApiClient::new(config.api.base_url.clone()));
    let rpc = use_hook(|| RpcClient::new(config.wallet.rpc_url.clone()));
    let mut session = use_signal(Session::default);
    let toasts = use_signal(Toasts::default);

    use_context_provider(|| config.clone());
    use_context_provider(|| api.clone());
    use_context_provider(|| rpc);
    use_context_provider(|| toasts);
    use_context_provider(|| session);

    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            let store = make_session_store();
            let Some(snapshot) = store.load().await else {
                return;
            };
            match api.get_user(&snapshot.id).await {
                Ok(user) => session.write().start(user),
                Err(e) => {
                    tracing::warn!("discarding stored session: {e}");
                    store.clear().await;
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Log in, load the full user, persist the snapshot and start the session.
pub async fn sign_in(
    api: &ApiClient,
    mut session: Signal<Session>,
    toaster: Toaster,
    email: &str,
    password: &str,
) -> api::Result<()> {
    let login = api.login(email, password).await?;
    let user = api.get_user(&login.user.id).await?;
    make_session_store().save(&login.user).await;
    toaster.success(format!("Welcome back {}", user.handle()));
    session.write().start(user);
    Ok(())
}

/// Forget the stored snapshot and return to the login modal.
pub async fn sign_out(mut session: Signal<Session>) {
    make_session_store().clear().await;
    session.write().logout();
}

/// Fetch the current user again and put the fresh copy in the session.
pub async fn reload_user(api: &ApiClient, mut session: Signal<Session>) -> api::Result<()> {
    let Some(id) = session.peek().user_id().map(str::to_string) else {
        return Ok(());
    };
    let user = api.get_user(&id).await?;
    session.write().refresh_profile(user);
    Ok(())
}

/// Open `username`'s profile. On failure the profile already on screen stays
/// (or the user's own) and one error toast is shown.
pub async fn open_profile(
    api: &ApiClient,
    mut session: Signal<Session>,
    toaster: Toaster,
    username: &str,
) {
    match api.get_user_by_username(username).await {
        Ok(user) => session.write().open_profile(user),
        Err(e) => {
            tracing::warn!(%username, "failed to open profile: {e}");
            let message = session.write().profile_open_failed();
            toaster.error(message);
        }
    }
}
