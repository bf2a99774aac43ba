use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shop: ShopConfig,
}

/// Shop API endpoints and client timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Base URL of the shop API (`/product` and `/order` are joined onto it).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// CDN base prefixed onto product image paths by the view layer.
    #[serde(default = "default_cdn_url")]
    pub cdn_url: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cdn_url: default_cdn_url(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_cdn_url() -> String {
    "http://127.0.0.1:3000/content".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    30
}
