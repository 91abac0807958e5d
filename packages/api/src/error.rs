use thiserror::Error;

/// Errors produced while talking to the backend, the socket server or the
/// chain RPC.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` holds the server's `message` or `error`
    /// field when the body had one.
    #[error("server returned {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid url: {0}")]
    Url(String),

    #[error("invalid address: {0}")]
    Address(String),

    #[error("wallet: {0}")]
    Wallet(String),

    #[error("socket: {0}")]
    Socket(String),
}

impl ApiError {
    /// Text to show the user: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(m), ..
            } if !m.is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Email already in use".into()),
        };
        assert_eq!(err.user_message("Login failed"), "Email already in use");
        assert_eq!(err.to_string(), "server returned 400: Email already in use");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Login failed"), "Login failed");
        assert_eq!(err.to_string(), "server returned 500");
        let err = ApiError::Socket("closed".into());
        assert_eq!(err.user_message("Chat unavailable"), "Chat unavailable");
    }
}
