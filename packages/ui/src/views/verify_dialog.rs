use dioxus::prelude::*;
use store::wallet::{sol_amount, VERIFIED, VERIFY_FAILED};

use crate::session::{reload_user, use_api, use_config, use_rpc, use_session};
use crate::toast::use_toaster;
use crate::wallet::{failure_message, pay_for_verification, VerifyOutcome};

/// Pay for the verified badge with a Phantom wallet.
#[component]
pub fn VerifyDialog(on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let rpc = use_rpc();
    let config = use_config();
    let session = use_session();
    let toaster = use_toaster();
    let mut paying = use_signal(|| false);

    let price = sol_amount(config.wallet.lamports);
    let wallet = config.wallet.clone();

    let on_pay = move |_| {
        let Some(username) = session.peek().user.as_ref().map(|u| u.username.clone()) else {
            return;
        };
        let api = api.clone();
        let rpc = rpc.clone();
        let wallet = wallet.clone();
        paying.set(true);
        spawn(async move {
            match pay_for_verification(&api, &rpc, &wallet, &username, toaster).await {
                Ok(VerifyOutcome::Verified) => {
                    toaster.success(VERIFIED);
                    if let Err(e) = reload_user(&api, session).await {
                        tracing::warn!("failed to reload verified user: {e}");
                    }
                    on_close.call(());
                }
                Ok(VerifyOutcome::PaidNotVerified) => toaster.error(VERIFY_FAILED),
                Err(e) => {
                    tracing::warn!("verification payment failed: {e}");
                    toaster.error(failure_message(&e));
                }
            }
            paying.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Get Verified" }
            p {
                class: "modal-text",
                "A one-time payment of {price} SOL from your Phantom wallet adds the verified badge to your profile, posts and chat messages."
            }
            div {
                class: "modal-actions",
                button {
                    class: "btn primary",
                    disabled: paying(),
                    onclick: on_pay,
                    if paying() { "Waiting for confirmation..." } else { "Pay {price} SOL" }
                }
                button {
                    class: "btn outline",
                    disabled: paying(),
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
            }
        }
    }
}
