//! # Client configuration: `trench.toml`
//!
//! Where the client finds its backend, the socket server, the chain RPC and
//! which livestream channels it seeds the grid with.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://trenchsocial-backend.onrender.com"
//! socket_url = "https://trenchsocial-backend.onrender.com"
//!
//! [wallet]
//! rpc_url = "https://api.mainnet-beta.solana.com"
//! recipient = "6ezxBgxZ2WGhLjE675XcMW1wobR7io7vED49yaieuunj"
//! lamports = 100000000
//!
//! [streams]
//! parent_domain = "trenchsocial-frontend.vercel.app"
//! channels = ["ott4", "heyitsyolo", ...]
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AppConfig`] | Top-level config. TOML (de)serialisation and build-time overrides via [`AppConfig::from_env`]. |
//! | [`ApiConfig`] | REST base URL and Socket.IO server URL. |
//! | [`WalletConfig`] | RPC endpoint, verification recipient and price in lamports. |
//! | [`StreamsConfig`] | Embed parent domain and the default channel list. |
//!
//! Every section and key has a production default, so a missing or partial
//! file behaves like the default configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND: &str = "https://trenchsocial-backend.onrender.com";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub streams: StreamsConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_backend")]
    pub base_url: String,
    #[serde(default = "default_backend")]
    pub socket_url: String,
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend(),
            socket_url: default_backend(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Address that receives verification payments.
    #[serde(default = "default_recipient")]
    pub recipient: String,
    /// Price of verification. 0.1 SOL by default.
    #[serde(default = "default_lamports")]
    pub lamports: u64,
}

fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_recipient() -> String {
    "6ezxBgxZ2WGhLjE675XcMW1wobR7io7vED49yaieuunj".to_string()
}

fn default_lamports() -> u64 {
    100_000_000
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            recipient: default_recipient(),
            lamports: default_lamports(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamsConfig {
    /// Domain passed as `parent` to the Twitch player.
    #[serde(default = "default_parent_domain")]
    pub parent_domain: String,
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
}

fn default_parent_domain() -> String {
    "trenchsocial-frontend.vercel.app".to_string()
}

fn default_channels() -> Vec<String> {
    [
        "ott4",
        "heyitsyolo",
        "cupseyy",
        "dvces",
        "kreo",
        "cented",
        "dustdotsol",
        "betwithsize",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            parent_domain: default_parent_domain(),
            channels: default_channels(),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "trench.toml"
    }

    /// Defaults, with the URLs overridden by `TRENCH_API_URL`,
    /// `TRENCH_SOCKET_URL` and `TRENCH_SOLANA_RPC` when they were set at build
    /// time.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            option_env!("TRENCH_API_URL"),
            option_env!("TRENCH_SOCKET_URL"),
            option_env!("TRENCH_SOLANA_RPC"),
        )
    }

    fn with_overrides(
        mut self,
        api: Option<&str>,
        socket: Option<&str>,
        rpc: Option<&str>,
    ) -> Self {
        if let Some(url) = api.filter(|s| !s.is_empty()) {
            self.api.base_url = url.to_string();
        }
        if let Some(url) = socket.filter(|s| !s.is_empty()) {
            self.api.socket_url = url.to_string();
        }
        if let Some(url) = rpc.filter(|s| !s.is_empty()) {
            self.wallet.rpc_url = url.to_string();
        }
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.wallet.lamports, 100_000_000);
        assert_eq!(config.streams.channels.len(), 8);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "http://localhost:5000"

            [streams]
            channels = ["solo"]
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.socket_url, DEFAULT_BACKEND);
        assert_eq!(config.streams.channels, vec!["solo".to_string()]);
        assert_eq!(
            config.streams.parent_domain,
            "trenchsocial-frontend.vercel.app"
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_overrides_skip_empty_values() {
        let config =
            AppConfig::default().with_overrides(Some("http://api.local"), Some(""), None);
        assert_eq!(config.api.base_url, "http://api.local");
        assert_eq!(config.api.socket_url, DEFAULT_BACKEND);
        assert_eq!(config.wallet.rpc_url, "https://api.mainnet-beta.solana.com");
    }
}
