//! Login, registration and the email-code / password-reset endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, MessageBody};
use crate::error::Result;
use crate::models::LoginResponse;

/// Body of `POST /api/users/register`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
}

/// Result of `POST /api/auth/verify-code`. The backend answers with a
/// `success` flag and may do so on an error status, so the body is read
/// regardless of status.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CodeCheck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.send(
            Method::POST,
            self.url(&["api", "users", "login"])?,
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Returns the server's confirmation message, if any.
    pub async fn register(&self, registration: &Registration) -> Result<Option<String>> {
        let body: MessageBody = self
            .send(Method::POST, self.url(&["api", "users", "register"])?, registration)
            .await?;
        Ok(body.message)
    }

    pub async fn send_code(&self, email: &str) -> Result<()> {
        self.send_unit(
            Method::POST,
            self.url(&["api", "auth", "send-code"])?,
            Some(&json!({ "email": email })),
        )
        .await
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> Result<CodeCheck> {
        let resp = self
            .http
            .post(self.url(&["api", "auth", "verify-code"])?)
            .json(&json!({ "email": email, "code": code }))
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        let check: CodeCheck = serde_json::from_str(&text).unwrap_or_default();
        if !status.is_success() && check.error.is_none() {
            tracing::warn!(status = status.as_u16(), "verify-code rejected without reason");
        }
        Ok(check)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        self.send_unit(
            Method::POST,
            self.url(&["api", "auth", "forgot-password"])?,
            Some(&json!({ "email": email })),
        )
        .await
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> Result<()> {
        self.send_unit(
            Method::POST,
            self.url(&["api", "auth", "reset-password"])?,
            Some(&json!({ "token": token, "password": password })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_check_defaults_to_failure() {
        let check: CodeCheck = serde_json::from_str(r#"{"error": "Invalid code"}"#).unwrap();
        assert!(!check.success);
        assert_eq!(check.error.as_deref(), Some("Invalid code"));

        let check: CodeCheck = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(check.success);
    }
}
