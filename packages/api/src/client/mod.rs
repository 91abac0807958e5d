//! # Typed REST client for the Trench Social backend
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] and a base URL. Each endpoint the
//! UI consumes is one `async fn` on it, grouped by resource in the submodules:
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | `auth` | login, register, email code, password reset |
//! | `users` | profile reads, search list, follow, verify, profile update |
//! | `posts` | feed, post and comment mutations |
//! | `messages` | conversations, threads, sending |
//! | `leaderboard` | the five ranked aggregates |
//! | `feedback` | reports and notifications |
//!
//! Every call returns [`crate::Result`]. A non-2xx status becomes
//! [`ApiError::Status`] carrying the server's `message` (or `error`) field so
//! the caller can surface it in a toast. Nothing is retried, cached or
//! cancelled here; the caller owns those decisions.

mod auth;
mod feedback;
mod leaderboard;
mod messages;
mod posts;
mod users;

pub use auth::{CodeCheck, Registration};

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, Result};

/// Shape of the backend's error bodies.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Bodies that only carry a human-readable message.
#[derive(Debug, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The endpoint under the base URL made of `segments`, each one
    /// percent-encoded as a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Url(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let resp = self.http.get(url).send().await?;
        decode(check(resp).await?).await
    }

    async fn send<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.http.request(method, url).json(body).send().await?;
        decode(check(resp).await?).await
    }

    /// Like [`Self::send`] but ignores the response body.
    async fn send_unit<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        check(req.send().await?).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body.message.or(body.error);
    tracing::warn!(status = status.as_u16(), ?message, "backend rejected request");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("https://backend.example/");
        let url = client.url(&["api", "posts"]).unwrap();
        assert_eq!(url.as_str(), "https://backend.example/api/posts");
    }

    #[test]
    fn test_segments_are_escaped() {
        let client = ApiClient::new("https://backend.example");
        let url = client.url(&["api", "users", "username", "ann_99"]).unwrap();
        assert_eq!(url.as_str(), "https://backend.example/api/users/username/ann_99");
        let url = client.url(&["api", "users", "username", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://backend.example/api/users/username/a%20b%2Fc");
        let url = client.url(&["api", "posts", "a?b#c"]).unwrap();
        assert_eq!(url.path(), "/api/posts/a%3Fb%23c");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let client = ApiClient::new("http://localhost:5000/backend/");
        let url = client.url(&["api", "posts", "p1", "like"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/backend/api/posts/p1/like");
    }

    #[test]
    fn test_unusable_base_is_an_error() {
        let client = ApiClient::new("backend.example");
        assert!(matches!(client.url(&["api"]), Err(ApiError::Url(_))));
        let client = ApiClient::new("mailto:someone@example.com");
        assert!(matches!(client.url(&["api"]), Err(ApiError::Url(_))));
    }
}
