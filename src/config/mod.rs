//! Application configuration: TOML file with serde field defaults.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ShopConfig};
