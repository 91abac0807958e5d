//! Minimal Solana JSON-RPC client: the two calls the verification flow needs.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::solana::{parse_blockhash, Blockhash};

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
}

/// Status of a submitted transaction.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    #[serde(default)]
    pub confirmation_status: Option<String>,
    #[serde(default)]
    pub err: Option<Value>,
}

/// Where a transaction stands from the client's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Pending,
    Confirmed,
    Failed(String),
}

impl SignatureStatus {
    pub fn confirmation(&self) -> Confirmation {
        if let Some(err) = &self.err {
            return Confirmation::Failed(err.to_string());
        }
        match self.confirmation_status.as_deref() {
            Some("confirmed") | Some("finalized") => Confirmation::Confirmed,
            _ => Confirmation::Pending,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let resp = self.http.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(method, status = status.as_u16(), "rpc request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: Some(text),
            });
        }
        parse_response(&text)
    }

    pub async fn latest_blockhash(&self) -> Result<Blockhash> {
        let resp: WithContext<LatestBlockhash> = self
            .call("getLatestBlockhash", json!([{ "commitment": "finalized" }]))
            .await?;
        parse_blockhash(&resp.value.blockhash)
    }

    /// `None` while the cluster has not seen the signature yet.
    pub async fn signature_status(&self, signature: &str) -> Result<Option<SignatureStatus>> {
        let resp: WithContext<Vec<Option<SignatureStatus>>> = self
            .call(
                "getSignatureStatuses",
                json!([[signature], { "searchTransactionHistory": true }]),
            )
            .await?;
        Ok(resp.value.into_iter().next().flatten())
    }
}

fn parse_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let resp: RpcResponse<T> = serde_json::from_str(text)?;
    if let Some(err) = resp.error {
        return Err(ApiError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    resp.result.ok_or_else(|| ApiError::Rpc {
        code: 0,
        message: "response carried neither result nor error".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latest_blockhash() {
        let text = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":{"blockhash":"11111111111111111111111111111111","lastValidBlockHeight":9}},"id":1}"#;
        let resp: WithContext<LatestBlockhash> = parse_response(text).unwrap();
        let hash = parse_blockhash(&resp.value.blockhash).unwrap();
        assert_eq!(hash, Blockhash::default());
    }

    #[test]
    fn test_parse_rpc_error() {
        let text = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid params"},"id":1}"#;
        let err = parse_response::<Value>(text).unwrap_err();
        assert!(matches!(err, ApiError::Rpc { code: -32602, .. }));
    }

    #[test]
    fn test_signature_status_confirmation() {
        let text = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":[null]},"id":1}"#;
        let resp: WithContext<Vec<Option<SignatureStatus>>> = parse_response(text).unwrap();
        assert!(resp.value[0].is_none());

        let status: SignatureStatus =
            serde_json::from_str(r#"{"confirmationStatus":"processed","err":null}"#).unwrap();
        assert_eq!(status.confirmation(), Confirmation::Pending);

        let status: SignatureStatus =
            serde_json::from_str(r#"{"confirmationStatus":"finalized","err":null}"#).unwrap();
        assert_eq!(status.confirmation(), Confirmation::Confirmed);

        let status: SignatureStatus = serde_json::from_str(
            r#"{"confirmationStatus":"confirmed","err":{"InstructionError":[0,"Custom"]}}"#,
        )
        .unwrap();
        assert!(matches!(status.confirmation(), Confirmation::Failed(_)));
    }
}
