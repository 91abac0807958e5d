//! Verification payment through the browser's Phantom wallet.
//!
//! The flow is: connect the wallet, build a legacy transfer message against
//! the latest blockhash, let the wallet sign and submit it, poll the RPC until
//! the signature is confirmed, then ask the backend to mark the user verified.

use api::solana::parse_pubkey;
use api::{ApiClient, ApiError, Confirmation, RpcClient, TransferMessage};
use store::config::WalletConfig;
use store::wallet::{friendly_error, NOT_CONFIRMED, NO_PROVIDER, SUBMITTED};

use crate::toast::Toaster;

const POLL_ATTEMPTS: usize = 30;
const POLL_INTERVAL_MS: u64 = 2000;

/// How a payment that went through ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    /// Paid, but the backend refused to mark the user verified.
    PaidNotVerified,
}

/// Text to toast for a failed payment.
pub fn failure_message(e: &ApiError) -> String {
    match e {
        ApiError::Wallet(m) if m == NO_PROVIDER || m == NOT_CONFIRMED => m.clone(),
        other => friendly_error(&other.to_string()).to_string(),
    }
}

pub async fn pay_for_verification(
    api: &ApiClient,
    rpc: &RpcClient,
    wallet: &WalletConfig,
    username: &str,
    toaster: Toaster,
) -> api::Result<VerifyOutcome> {
    let from = parse_pubkey(&phantom::connect().await?)?;
    let to = parse_pubkey(&wallet.recipient)?;
    let recent_blockhash = rpc.latest_blockhash().await?;

    let message = TransferMessage {
        from,
        to,
        lamports: wallet.lamports,
        recent_blockhash,
    };
    let signature = phantom::sign_and_send(&message.to_base58()?).await?;
    tracing::info!(%signature, "verification payment submitted");
    toaster.info(SUBMITTED);

    wait_for_confirmation(rpc, &signature).await?;

    match api.verify_user(username).await {
        Ok(()) => Ok(VerifyOutcome::Verified),
        Err(e) => {
            tracing::error!(%username, "payment confirmed but verify failed: {e}");
            Ok(VerifyOutcome::PaidNotVerified)
        }
    }
}

async fn wait_for_confirmation(rpc: &RpcClient, signature: &str) -> api::Result<()> {
    for _ in 0..POLL_ATTEMPTS {
        let status = rpc.signature_status(signature).await?;
        match status.map(|s| s.confirmation()) {
            Some(Confirmation::Confirmed) => return Ok(()),
            Some(Confirmation::Failed(err)) => return Err(ApiError::Wallet(err)),
            Some(Confirmation::Pending) | None => {}
        }
        crate::browser::sleep(POLL_INTERVAL_MS).await;
    }
    Err(ApiError::Wallet(NOT_CONFIRMED.to_string()))
}

#[cfg(target_arch = "wasm32")]
mod phantom {
    use api::{ApiError, Result};
    use js_sys::{Function, Object, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::NO_PROVIDER;

    fn js_error(e: JsValue) -> ApiError {
        let message = Reflect::get(&e, &"message".into())
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| format!("{e:?}"));
        ApiError::Wallet(message)
    }

    fn get(target: &JsValue, key: &str) -> Result<JsValue> {
        Reflect::get(target, &key.into()).map_err(js_error)
    }

    /// `window.solana`, when it is Phantom.
    fn provider() -> Result<JsValue> {
        let missing = || ApiError::Wallet(NO_PROVIDER.to_string());
        let window = web_sys::window().ok_or_else(missing)?;
        let solana = get(&window, "solana")?;
        if solana.is_undefined() || solana.is_null() {
            return Err(missing());
        }
        let is_phantom = get(&solana, "isPhantom")?.as_bool().unwrap_or(false);
        if !is_phantom {
            return Err(missing());
        }
        Ok(solana)
    }

    async fn call(target: &JsValue, method: &str, arg: Option<&JsValue>) -> Result<JsValue> {
        let f: Function = get(target, method)?.dyn_into().map_err(js_error)?;
        let returned = match arg {
            Some(a) => f.call1(target, a),
            None => f.call0(target),
        }
        .map_err(js_error)?;
        let promise: Promise = returned.dyn_into().map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)
    }

    /// Connect and return the wallet's base58 public key.
    pub async fn connect() -> Result<String> {
        let solana = provider()?;
        let resp = call(&solana, "connect", None).await?;
        let key = get(&resp, "publicKey")?;
        let to_string: Function = get(&key, "toString")?.dyn_into().map_err(js_error)?;
        to_string
            .call0(&key)
            .map_err(js_error)?
            .as_string()
            .ok_or_else(|| ApiError::Wallet("wallet returned no public key".into()))
    }

    /// Hand a base58 message to the wallet and return the signature.
    pub async fn sign_and_send(message: &str) -> Result<String> {
        let solana = provider()?;
        let params = Object::new();
        Reflect::set(&params, &"message".into(), &message.into()).map_err(js_error)?;
        let request = Object::new();
        Reflect::set(&request, &"method".into(), &"signAndSendTransaction".into())
            .map_err(js_error)?;
        Reflect::set(&request, &"params".into(), &params).map_err(js_error)?;

        let resp = call(&solana, "request", Some(&request)).await?;
        get(&resp, "signature")?
            .as_string()
            .ok_or_else(|| ApiError::Wallet("wallet returned no signature".into()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod phantom {
    use api::{ApiError, Result};

    use super::NO_PROVIDER;

    pub async fn connect() -> Result<String> {
        Err(ApiError::Wallet(NO_PROVIDER.to_string()))
    }

    pub async fn sign_and_send(_message: &str) -> Result<String> {
        Err(ApiError::Wallet(NO_PROVIDER.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let missing = ApiError::Wallet(NO_PROVIDER.to_string());
        assert_eq!(failure_message(&missing), NO_PROVIDER);

        let rejected = ApiError::Wallet("User rejected the request.".into());
        assert_eq!(failure_message(&rejected), "Transaction cancelled by the user.");

        let rpc = ApiError::Rpc {
            code: -32002,
            message: "insufficient funds for rent".into(),
        };
        assert_eq!(
            failure_message(&rpc),
            "You don't have enough SOL to complete this transaction."
        );

        let timeout = ApiError::Wallet(NOT_CONFIRMED.to_string());
        assert_eq!(failure_message(&timeout), NOT_CONFIRMED);
    }
}
