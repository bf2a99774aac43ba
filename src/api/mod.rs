//! Shop API: the network collaborator.
//!
//! The core depends on [`ShopApi`] only; [`HttpShopApi`] is the production
//! implementation. Results re-enter the system as events
//! (`catalog:loaded`, `order:confirmed`, `order:failed`).

mod client;
mod error;
mod types;

pub use client::{HttpShopApi, ShopApi};
pub use error::ApiError;
pub use types::{CatalogPage, OrderPayload, OrderReceipt};
